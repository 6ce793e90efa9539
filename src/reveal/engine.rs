use std::collections::BTreeMap;

use crate::{
    foundation::{core::ElementId, error::MotionResult},
    reveal::parallax::{ParallaxFrame, ParallaxLayer},
    schedule::{frame::FrameQueue, timer::TimerQueue},
    surface::paint::{Paint, Patch, Transform},
    visibility::notifier::{ViewportGeometry, VisibilityConfig, VisibilityNotifier},
};

/// Class marking an element's terminal "revealed" state.
pub const REVEALED_CLASS: &str = "is-animated";

/// Offset stagger children start from, in px below their resting position.
const STAGGER_START_OFFSET_PX: f64 = 20.0;
const STAGGER_TRANSITION: &str = "opacity 0.5s ease, transform 0.5s ease";

/// Environment's motion preference, read once when the engine is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionPreference {
    #[default]
    Full,
    Reduced,
}

/// Timer payloads scheduled by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealTask {
    Reveal(ElementId),
    StaggerChild { group: ElementId, child: ElementId },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Revealable {
    pub id: ElementId,
    pub delay_ms: u64,
    /// Monotonic: never returns to `false`.
    pub fired: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StaggerGroup {
    pub id: ElementId,
    pub interval_ms: u64,
    /// Children in document order, captured at registration.
    pub children: Vec<ElementId>,
    pub fired: bool,
}

/// Drives one-shot reveals, staggered child reveals and parallax offsets.
#[derive(Debug)]
pub struct RevealEngine {
    motion: MotionPreference,
    reveal_sensor: VisibilityNotifier,
    stagger_sensor: VisibilityNotifier,
    elements: BTreeMap<ElementId, Revealable>,
    groups: BTreeMap<ElementId, StaggerGroup>,
    parallax: ParallaxLayer,
}

impl RevealEngine {
    pub fn new(
        reveal_sensor: VisibilityConfig,
        stagger_sensor: VisibilityConfig,
        motion: MotionPreference,
    ) -> MotionResult<Self> {
        Ok(Self {
            motion,
            reveal_sensor: VisibilityNotifier::new(reveal_sensor)?,
            stagger_sensor: VisibilityNotifier::new(stagger_sensor)?,
            elements: BTreeMap::new(),
            groups: BTreeMap::new(),
            parallax: ParallaxLayer::new(),
        })
    }

    pub fn motion(&self) -> MotionPreference {
        self.motion
    }

    pub fn revealable(&self, id: ElementId) -> Option<&Revealable> {
        self.elements.get(&id)
    }

    pub fn group(&self, id: ElementId) -> Option<&StaggerGroup> {
        self.groups.get(&id)
    }

    pub fn revealables(&self) -> impl Iterator<Item = &Revealable> {
        self.elements.values()
    }

    pub fn groups(&self) -> impl Iterator<Item = &StaggerGroup> {
        self.groups.values()
    }

    pub fn parallax(&self) -> &ParallaxLayer {
        &self.parallax
    }

    pub fn reveal_sensor(&self) -> &VisibilityNotifier {
        &self.reveal_sensor
    }

    pub fn stagger_sensor(&self) -> &VisibilityNotifier {
        &self.stagger_sensor
    }

    /// Register a one-shot reveal. Re-registering a known handle is a no-op.
    ///
    /// Under reduced motion the element is marked fired at once and its final state is
    /// returned; the sensor is never involved.
    pub fn register_reveal(&mut self, id: ElementId, delay_ms: u64) -> Vec<Paint> {
        if self.elements.contains_key(&id) {
            return Vec::new();
        }
        let reduced = self.motion == MotionPreference::Reduced;
        self.elements.insert(
            id,
            Revealable {
                id,
                delay_ms,
                fired: reduced,
            },
        );
        if reduced {
            return settled_paints(id);
        }
        self.reveal_sensor.watch(id);
        Vec::new()
    }

    /// Register a stagger group. `children` order is frozen here. Returns the children's
    /// initial (hidden) state, or their final state under reduced motion.
    pub fn register_stagger_group(
        &mut self,
        id: ElementId,
        children: Vec<ElementId>,
        interval_ms: u64,
    ) -> Vec<Paint> {
        if self.groups.contains_key(&id) {
            return Vec::new();
        }
        let reduced = self.motion == MotionPreference::Reduced;
        let paints = if reduced {
            children.iter().flat_map(|&c| settled_paints(c)).collect()
        } else {
            children
                .iter()
                .flat_map(|&c| {
                    [
                        Paint::opacity(c, 0.0),
                        Paint::transform(
                            c,
                            Transform::TranslateY {
                                px: STAGGER_START_OFFSET_PX,
                            },
                        ),
                        Paint::with_patch(
                            c,
                            Patch::Transition {
                                css: STAGGER_TRANSITION.to_owned(),
                            },
                        ),
                    ]
                })
                .collect()
        };
        self.groups.insert(
            id,
            StaggerGroup {
                id,
                interval_ms,
                children,
                fired: reduced,
            },
        );
        if !reduced {
            self.stagger_sensor.watch(id);
        }
        paints
    }

    /// Register a parallax element. Ignored under reduced motion.
    pub fn register_parallax(&mut self, id: ElementId, speed: f64) -> bool {
        if self.motion == MotionPreference::Reduced {
            return false;
        }
        self.parallax.register(id, speed)
    }

    /// Re-evaluate visibility and schedule reveals for everything that just came into view.
    pub fn on_visibility<T: From<RevealTask>>(
        &mut self,
        geometry: &impl ViewportGeometry,
        timers: &mut TimerQueue<T>,
    ) {
        for id in self.reveal_sensor.poll(geometry) {
            let Some(el) = self.elements.get(&id) else {
                continue;
            };
            tracing::debug!(target_el = %id, delay_ms = el.delay_ms, "reveal scheduled");
            timers.schedule_once(el.delay_ms, RevealTask::Reveal(id).into());
        }
        for id in self.stagger_sensor.poll(geometry) {
            let Some(group) = self.groups.get_mut(&id) else {
                continue;
            };
            group.fired = true;
            tracing::debug!(
                group = %id,
                children = group.children.len(),
                interval_ms = group.interval_ms,
                "stagger group fired"
            );
            for (i, &child) in group.children.iter().enumerate() {
                let delay = group.interval_ms.saturating_mul(i as u64);
                timers.schedule_once(delay, RevealTask::StaggerChild { group: id, child }.into());
            }
        }
    }

    /// Apply a due reveal timer.
    pub fn on_timer(&mut self, task: RevealTask) -> Vec<Paint> {
        match task {
            RevealTask::Reveal(id) => {
                let Some(el) = self.elements.get_mut(&id) else {
                    return Vec::new();
                };
                el.fired = true;
                vec![Paint::class(id, REVEALED_CLASS, true)]
            }
            RevealTask::StaggerChild { child, .. } => vec![
                Paint::class(child, REVEALED_CLASS, true),
                Paint::opacity(child, 1.0),
                Paint::transform(child, Transform::TranslateY { px: 0.0 }),
            ],
        }
    }

    pub fn on_scroll<T: From<ParallaxFrame>>(&mut self, frames: &mut FrameQueue<T>) -> bool {
        self.parallax.on_scroll(frames)
    }

    pub fn on_parallax_frame(&mut self, geometry: &impl ViewportGeometry) -> Vec<Paint> {
        self.parallax.on_frame(geometry)
    }
}

/// Final state with no transition: used when motion is reduced.
fn settled_paints(id: ElementId) -> Vec<Paint> {
    vec![
        Paint::class(id, REVEALED_CLASS, true),
        Paint::opacity(id, 1.0),
        Paint::transform(id, Transform::None),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/engine.rs"]
mod tests;
