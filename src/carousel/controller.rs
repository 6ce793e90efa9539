use std::collections::BTreeMap;

use crate::{
    carousel::{gesture::SwipeTracker, view},
    focus::roving::{Orientation, Step},
    foundation::{
        core::{ElementId, Key},
        math::wrap_index,
    },
    schedule::timer::{TimerId, TimerQueue},
    surface::paint::{Paint, Patch},
};

/// Timer payload: advance carousel `root` by one slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoplayTick(pub ElementId);

/// Structural handles a carousel is built from. `track` is required; without it, or with
/// fewer than two slides, the carousel is inert.
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselParts {
    pub root: ElementId,
    pub track: Option<ElementId>,
    pub slides: Vec<ElementId>,
    /// Container receiving one indicator per slide, if present.
    pub dots: Option<ElementId>,
    /// Pre-allocated indicator handles, one per slide, when `dots` is present.
    pub indicators: Vec<ElementId>,
    /// Autoplay interval in ms; `0` disables autoplay.
    pub autoplay_ms: u64,
}

/// Per-instance carousel state.
#[derive(Clone, Debug, PartialEq)]
pub struct Carousel {
    root: ElementId,
    track: ElementId,
    slides: Vec<ElementId>,
    indicators: Vec<ElementId>,
    current: usize,
    autoplay_ms: u64,
    timer: Option<TimerId>,
    suspended: bool,
    swipe: SwipeTracker,
}

impl Carousel {
    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn track(&self) -> ElementId {
        self.track
    }

    pub fn slides(&self) -> &[ElementId] {
        &self.slides
    }

    pub fn indicators(&self) -> &[ElementId] {
        &self.indicators
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn autoplay_ms(&self) -> u64 {
        self.autoplay_ms
    }

    /// The armed autoplay timer. `Some` iff autoplay is enabled and not suspended.
    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    fn disarm<T>(&mut self, timers: &mut TimerQueue<T>) {
        if let Some(id) = self.timer.take() {
            timers.cancel(id);
        }
    }

    fn rearm<T: From<AutoplayTick>>(&mut self, timers: &mut TimerQueue<T>) {
        self.disarm(timers);
        if self.autoplay_ms > 0 && !self.suspended {
            self.timer =
                Some(timers.schedule_repeating(self.autoplay_ms, AutoplayTick(self.root).into()));
        }
    }
}

/// Owns every carousel instance and reconciles button, keyboard, swipe and autoplay input.
///
/// Each handler runs to completion: navigation cancels the pending autoplay tick and arms a
/// fresh one before returning, so user input always restarts the autoplay clock.
#[derive(Debug)]
pub struct CarouselController {
    carousels: BTreeMap<ElementId, Carousel>,
    gesture_threshold_px: f64,
}

impl CarouselController {
    pub fn new(gesture_threshold_px: f64) -> Self {
        Self {
            carousels: BTreeMap::new(),
            gesture_threshold_px,
        }
    }

    pub fn get(&self, root: ElementId) -> Option<&Carousel> {
        self.carousels.get(&root)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Carousel> {
        self.carousels.values()
    }

    pub fn len(&self) -> usize {
        self.carousels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carousels.is_empty()
    }

    /// Set up one carousel and show slide 0. Returns `None`, with no state kept, when the
    /// parts are incomplete or the root is already set up.
    pub fn setup<T: From<AutoplayTick>>(
        &mut self,
        parts: CarouselParts,
        timers: &mut TimerQueue<T>,
    ) -> Option<Vec<Paint>> {
        let root = parts.root;
        if self.carousels.contains_key(&root) {
            return None;
        }
        let Some(track) = parts.track else {
            tracing::debug!(%root, "carousel skipped: no track");
            return None;
        };
        if parts.slides.len() < 2 {
            tracing::debug!(%root, slides = parts.slides.len(), "carousel skipped: too few slides");
            return None;
        }
        let indicators = match parts.dots {
            Some(_) if parts.indicators.len() == parts.slides.len() => parts.indicators,
            _ => Vec::new(),
        };

        let mut paints = vec![Paint::with_patch(root, Patch::TabIndex { index: 0 })];
        if let Some(dots) = parts.dots {
            paints.extend(indicators.iter().enumerate().map(|(i, &child)| {
                Paint::with_patch(
                    dots,
                    Patch::AppendChild {
                        child,
                        class: view::INDICATOR_CLASS.to_owned(),
                        label: format!("Go to slide {}", i + 1),
                    },
                )
            }));
        }

        self.carousels.insert(
            root,
            Carousel {
                root,
                track,
                slides: parts.slides,
                indicators,
                current: 0,
                autoplay_ms: parts.autoplay_ms,
                timer: None,
                suspended: false,
                swipe: SwipeTracker::default(),
            },
        );
        tracing::debug!(%root, autoplay_ms = parts.autoplay_ms, "carousel ready");
        paints.extend(self.go_to(root, 0, timers));
        Some(paints)
    }

    /// Show slide `target` (wrapped into range) and restart autoplay.
    pub fn go_to<T: From<AutoplayTick>>(
        &mut self,
        root: ElementId,
        target: i64,
        timers: &mut TimerQueue<T>,
    ) -> Vec<Paint> {
        let Some(c) = self.carousels.get_mut(&root) else {
            return Vec::new();
        };
        c.current = wrap_index(target, c.slides.len());
        c.rearm(timers);
        tracing::debug!(%root, index = c.current, "carousel navigated");
        view::render(c)
    }

    pub fn step<T: From<AutoplayTick>>(
        &mut self,
        root: ElementId,
        step: Step,
        timers: &mut TimerQueue<T>,
    ) -> Vec<Paint> {
        let Some(c) = self.carousels.get(&root) else {
            return Vec::new();
        };
        let target = c.current as i64 + step.delta();
        self.go_to(root, target, timers)
    }

    pub fn on_key<T: From<AutoplayTick>>(
        &mut self,
        root: ElementId,
        key: Key,
        timers: &mut TimerQueue<T>,
    ) -> Vec<Paint> {
        match Orientation::Horizontal.step_for(key) {
            Some(step) => self.step(root, step, timers),
            None => Vec::new(),
        }
    }

    pub fn on_indicator<T: From<AutoplayTick>>(
        &mut self,
        root: ElementId,
        index: usize,
        timers: &mut TimerQueue<T>,
    ) -> Vec<Paint> {
        self.go_to(root, index as i64, timers)
    }

    pub fn on_touch_start(&mut self, root: ElementId, x: f64) {
        if let Some(c) = self.carousels.get_mut(&root) {
            c.swipe.touch_start(x);
        }
    }

    pub fn on_touch_end<T: From<AutoplayTick>>(
        &mut self,
        root: ElementId,
        x: f64,
        timers: &mut TimerQueue<T>,
    ) -> Vec<Paint> {
        let threshold = self.gesture_threshold_px;
        let Some(step) = self
            .carousels
            .get_mut(&root)
            .and_then(|c| c.swipe.touch_end(x, threshold))
        else {
            return Vec::new();
        };
        self.step(root, step, timers)
    }

    /// Pointer entered: suspend autoplay without rearming.
    pub fn on_pointer_enter<T>(&mut self, root: ElementId, timers: &mut TimerQueue<T>) {
        if let Some(c) = self.carousels.get_mut(&root) {
            c.suspended = true;
            c.disarm(timers);
        }
    }

    /// Pointer left: resume autoplay with a full fresh interval.
    pub fn on_pointer_leave<T: From<AutoplayTick>>(
        &mut self,
        root: ElementId,
        timers: &mut TimerQueue<T>,
    ) {
        if let Some(c) = self.carousels.get_mut(&root) {
            c.suspended = false;
            c.rearm(timers);
        }
    }

    /// Autoplay tick from timer `fired`. Ticks from timers the carousel no longer owns are
    /// dropped.
    pub fn on_autoplay<T: From<AutoplayTick>>(
        &mut self,
        tick: AutoplayTick,
        fired: TimerId,
        timers: &mut TimerQueue<T>,
    ) -> Vec<Paint> {
        let root = tick.0;
        match self.carousels.get(&root) {
            Some(c) if c.timer == Some(fired) => self.step(root, Step::Next, timers),
            _ => {
                tracing::trace!(%root, timer = fired.0, "stale autoplay tick dropped");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/controller.rs"]
mod tests;
