use std::collections::BTreeMap;

use crate::{
    animation::value::{ValueAnimator, ValueFormat, ValueFrame, ValueRun},
    foundation::{
        core::ElementId,
        error::{MotionError, MotionResult},
    },
    schedule::frame::FrameQueue,
    visibility::notifier::{ViewportGeometry, VisibilityConfig, VisibilityNotifier},
};

/// A number that counts up from 0 to `target` the first time it becomes visible.
#[derive(Clone, Debug, PartialEq)]
pub struct Counter {
    pub id: ElementId,
    pub target: i64,
    pub format: ValueFormat,
}

#[derive(Debug)]
pub struct CounterSet {
    sensor: VisibilityNotifier,
    counters: BTreeMap<ElementId, Counter>,
    duration_ms: u64,
}

impl CounterSet {
    pub fn new(sensor: VisibilityConfig, duration_ms: u64) -> MotionResult<Self> {
        if duration_ms == 0 {
            return Err(MotionError::validation("counter duration must be > 0"));
        }
        Ok(Self {
            sensor: VisibilityNotifier::new(sensor)?,
            counters: BTreeMap::new(),
            duration_ms,
        })
    }

    /// Register a counter. Thousands are always grouped. Re-registration is a no-op.
    pub fn register(&mut self, id: ElementId, target: i64, prefix: &str, suffix: &str) -> bool {
        if self.counters.contains_key(&id) {
            return false;
        }
        self.counters.insert(
            id,
            Counter {
                id,
                target,
                format: ValueFormat {
                    prefix: prefix.to_owned(),
                    suffix: suffix.to_owned(),
                    group_thousands: true,
                },
            },
        );
        self.sensor.watch(id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Counter> {
        self.counters.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Counter> {
        self.counters.values()
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Start a count-up run for every counter that just came into view.
    pub fn on_visibility<T: From<ValueFrame>>(
        &mut self,
        geometry: &impl ViewportGeometry,
        animator: &mut ValueAnimator,
        frames: &mut FrameQueue<T>,
    ) -> MotionResult<usize> {
        let mut started = 0;
        for id in self.sensor.poll(geometry) {
            let Some(counter) = self.counters.get(&id) else {
                continue;
            };
            let run = ValueRun::new(
                id,
                0,
                counter.target,
                self.duration_ms,
                counter.format.clone().into_formatter(),
            )?;
            animator.animate(run, frames);
            started += 1;
        }
        Ok(started)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/counter.rs"]
mod tests;
