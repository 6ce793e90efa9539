use std::collections::BTreeMap;

use crate::{
    animation::value::{ValueAnimator, ValueFormat, ValueFrame, ValueRun},
    foundation::{
        core::ElementId,
        error::{MotionError, MotionResult},
    },
    reveal::engine::REVEALED_CLASS,
    schedule::frame::FrameQueue,
    surface::paint::{Paint, Patch},
    visibility::notifier::{ViewportGeometry, VisibilityConfig, VisibilityNotifier},
};

#[derive(Clone, Debug, PartialEq)]
pub struct ProgressBar {
    pub id: ElementId,
    /// Fill percentage as declared; not clamped.
    pub value: f64,
    /// Text element showing the percentage, if any.
    pub label: Option<ElementId>,
    pub fired: bool,
}

/// Progress bars that fill to their value the first time they become visible.
#[derive(Debug)]
pub struct ProgressBars {
    sensor: VisibilityNotifier,
    bars: BTreeMap<ElementId, ProgressBar>,
    duration_ms: u64,
}

impl ProgressBars {
    pub fn new(sensor: VisibilityConfig, duration_ms: u64) -> MotionResult<Self> {
        if duration_ms == 0 {
            return Err(MotionError::validation("progress duration must be > 0"));
        }
        Ok(Self {
            sensor: VisibilityNotifier::new(sensor)?,
            bars: BTreeMap::new(),
            duration_ms,
        })
    }

    /// Register a bar and return its empty initial state.
    pub fn register(&mut self, id: ElementId, value: f64, label: Option<ElementId>) -> Vec<Paint> {
        if self.bars.contains_key(&id) {
            return Vec::new();
        }
        self.bars.insert(
            id,
            ProgressBar {
                id,
                value,
                label,
                fired: false,
            },
        );
        self.sensor.watch(id);
        vec![Paint::with_patch(id, Patch::WidthPercent { pct: 0.0 })]
    }

    pub fn get(&self, id: ElementId) -> Option<&ProgressBar> {
        self.bars.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProgressBar> {
        self.bars.values()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Fill every bar that just came into view and start its label count-up.
    pub fn on_visibility<T: From<ValueFrame>>(
        &mut self,
        geometry: &impl ViewportGeometry,
        animator: &mut ValueAnimator,
        frames: &mut FrameQueue<T>,
    ) -> MotionResult<Vec<Paint>> {
        let mut paints = Vec::new();
        for id in self.sensor.poll(geometry) {
            let Some(bar) = self.bars.get_mut(&id) else {
                continue;
            };
            bar.fired = true;
            tracing::debug!(bar = %id, value = bar.value, "progress bar filled");
            paints.push(Paint::with_patch(id, Patch::WidthPercent { pct: bar.value }));
            paints.push(Paint::class(id, REVEALED_CLASS, true));
            if let Some(label) = bar.label {
                let format = ValueFormat {
                    suffix: "%".to_owned(),
                    ..ValueFormat::default()
                };
                let run = ValueRun::new(
                    label,
                    0,
                    bar.value.trunc() as i64,
                    self.duration_ms,
                    format.into_formatter(),
                )?;
                animator.animate(run, frames);
            }
        }
        Ok(paints)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/progress.rs"]
mod tests;
