use std::collections::BTreeMap;

use crate::{
    animation::value::{ValueAnimator, ValueFrame},
    carousel::{
        controller::{AutoplayTick, CarouselController, CarouselParts},
        view::INDICATOR_CLASS,
    },
    focus::roving::Step,
    foundation::{
        attr,
        config::StageConfig,
        core::{ElementId, Key, Millis},
        error::{MotionError, MotionResult},
    },
    markup::document::Document,
    reveal::{
        engine::{MotionPreference, REVEALED_CLASS, RevealEngine, RevealTask},
        parallax::ParallaxFrame,
    },
    schedule::{frame::FrameQueue, timer::TimerQueue},
    surface::{
        memory::{InMemorySurface, Surface},
        paint::Paint,
    },
    widgets::{counter::CounterSet, progress::ProgressBars},
};

const CAROUSEL_CLASS: &str = "apex-testimonial-slider";
const TRACK_CLASS: &str = "apex-testimonial-slider__track";
const SLIDE_CLASS: &str = "apex-testimonial-slider__slide";
const PREV_CLASS: &str = "apex-testimonial-slider__prev";
const NEXT_CLASS: &str = "apex-testimonial-slider__next";
const DOTS_CLASS: &str = "apex-testimonial-slider__dots";
const COUNTER_CLASS: &str = "apex-counter__number";
const PROGRESS_CLASS: &str = "apex-progress__bar";
const PROGRESS_LABEL_CLASS: &str = "apex-progress__label";

/// Every timer payload the stage can schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageTask {
    Reveal(RevealTask),
    Autoplay(AutoplayTick),
}

impl From<RevealTask> for StageTask {
    fn from(task: RevealTask) -> Self {
        Self::Reveal(task)
    }
}

impl From<AutoplayTick> for StageTask {
    fn from(tick: AutoplayTick) -> Self {
        Self::Autoplay(tick)
    }
}

/// Every frame callback the stage can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameTask {
    Parallax,
    Value,
}

impl From<ParallaxFrame> for FrameTask {
    fn from(_: ParallaxFrame) -> Self {
        Self::Parallax
    }
}

impl From<ValueFrame> for FrameTask {
    fn from(_: ValueFrame) -> Self {
        Self::Value
    }
}

/// Host input events. Targets are element handles from the scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Input {
    Scroll { y: f64 },
    Resize { width: f64, height: f64 },
    /// Key pressed while focus is inside `target` (a carousel root).
    Key { target: ElementId, key: Key },
    /// Activation of a carousel control: previous/next button or an indicator.
    Click { target: ElementId },
    TouchStart { target: ElementId, x: f64 },
    TouchEnd { target: ElementId, x: f64 },
    PointerEnter { target: ElementId },
    PointerLeave { target: ElementId },
}

impl Input {
    pub fn target(&self) -> Option<ElementId> {
        match self {
            Self::Scroll { .. } | Self::Resize { .. } => None,
            Self::Key { target, .. }
            | Self::Click { target }
            | Self::TouchStart { target, .. }
            | Self::TouchEnd { target, .. }
            | Self::PointerEnter { target }
            | Self::PointerLeave { target } => Some(*target),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Control {
    Prev,
    Next,
    Indicator(usize),
}

/// What a setup pass registered.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SetupSummary {
    pub reduced_motion: bool,
    pub reveals: usize,
    pub stagger_groups: usize,
    pub parallax: usize,
    pub carousels: usize,
    pub counters: usize,
    pub progress_bars: usize,
}

/// Single-threaded host runtime: one clock, one timer queue, one frame queue.
///
/// Inputs and callbacks are dispatched one at a time and each runs to completion before the
/// next begins. Every visual change reaches the surface as a [`Paint`], stamped with the
/// stage time it was produced at.
#[derive(Debug)]
pub struct Stage<S = InMemorySurface> {
    config: StageConfig,
    document: Document,
    now: Millis,
    timers: TimerQueue<StageTask>,
    frames: FrameQueue<FrameTask>,
    reveal: RevealEngine,
    carousels: CarouselController,
    controls: BTreeMap<ElementId, (ElementId, Control)>,
    animator: ValueAnimator,
    counters: CounterSet,
    progress: ProgressBars,
    surface: S,
    set_up: bool,
}

impl Stage<InMemorySurface> {
    pub fn new(document: Document, config: StageConfig) -> MotionResult<Self> {
        Self::with_surface(document, config, InMemorySurface::new())
    }
}

impl<S: Surface> Stage<S> {
    pub fn with_surface(document: Document, config: StageConfig, surface: S) -> MotionResult<Self> {
        config.validate()?;
        let motion = if document.reduced_motion() {
            MotionPreference::Reduced
        } else {
            MotionPreference::Full
        };
        Ok(Self {
            reveal: RevealEngine::new(config.reveal_sensor, config.stagger_sensor, motion)?,
            carousels: CarouselController::new(config.gesture_threshold_px),
            counters: CounterSet::new(config.counter_sensor, config.counter_duration_ms)?,
            progress: ProgressBars::new(config.progress_sensor, config.progress_duration_ms)?,
            frames: FrameQueue::new(config.frame_interval_ms),
            timers: TimerQueue::new(),
            controls: BTreeMap::new(),
            animator: ValueAnimator::new(),
            now: Millis::ZERO,
            set_up: false,
            document,
            config,
            surface,
        })
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn reveal(&self) -> &RevealEngine {
        &self.reveal
    }

    pub fn carousels(&self) -> &CarouselController {
        &self.carousels
    }

    pub fn animator(&self) -> &ValueAnimator {
        &self.animator
    }

    pub fn counters(&self) -> &CounterSet {
        &self.counters
    }

    pub fn progress(&self) -> &ProgressBars {
        &self.progress
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending_count()
    }

    pub fn summary(&self) -> SetupSummary {
        SetupSummary {
            reduced_motion: self.reveal.motion() == MotionPreference::Reduced,
            reveals: self.reveal.revealables().count(),
            stagger_groups: self.reveal.groups().count(),
            parallax: self.reveal.parallax().elements().len(),
            carousels: self.carousels.len(),
            counters: self.counters.len(),
            progress_bars: self.progress.len(),
        }
    }

    /// Scan the document and register every declarative component, then evaluate visibility
    /// once. Calling it again is a no-op.
    #[tracing::instrument(skip(self))]
    pub fn setup(&mut self) -> MotionResult<SetupSummary> {
        if self.set_up {
            return Ok(self.summary());
        }
        self.set_up = true;

        self.setup_reveals();
        self.setup_carousels()?;
        self.setup_widgets();

        self.refresh_visibility()?;
        self.flush_due();
        let summary = self.summary();
        tracing::debug!(?summary, "stage set up");
        Ok(summary)
    }

    fn setup_reveals(&mut self) {
        let mut paints = Vec::new();
        for id in self.document.query_attr("data-apex-animate") {
            if self.document.has_class(id, REVEALED_CLASS) {
                continue;
            }
            let delay = attr::delay_ms(self.document.attr(id, "data-apex-delay"));
            paints.extend(self.reveal.register_reveal(id, delay));
        }
        for id in self.document.query_attr("data-apex-stagger") {
            let interval = attr::stagger_interval_ms(
                self.document.attr(id, "data-apex-stagger"),
                self.config.default_stagger_ms,
            );
            let children = self.document.children(id).to_vec();
            paints.extend(self.reveal.register_stagger_group(id, children, interval));
        }
        for id in self.document.query_attr("data-apex-parallax") {
            let speed = attr::parallax_speed(
                self.document.attr(id, "data-apex-parallax"),
                self.config.default_parallax_speed,
            );
            self.reveal.register_parallax(id, speed);
        }
        self.paint(paints);
    }

    fn setup_carousels(&mut self) -> MotionResult<()> {
        for root in self.document.query_class(None, CAROUSEL_CLASS) {
            let track = self.document.first_class(root, TRACK_CLASS);
            let slides = self.document.query_class(Some(root), SLIDE_CLASS);
            if track.is_none() || slides.len() < 2 {
                tracing::debug!(%root, "carousel markup incomplete");
                continue;
            }
            let dots = self.document.first_class(root, DOTS_CLASS);
            let mut indicators = Vec::new();
            if let Some(dots) = dots {
                for _ in &slides {
                    indicators.push(self.document.create_element(dots, INDICATOR_CLASS)?);
                }
            }
            let autoplay_ms = attr::autoplay_interval_ms(
                self.document.attr(root, "data-autoplay"),
                self.config.default_autoplay_ms,
            );
            let parts = CarouselParts {
                root,
                track,
                slides,
                dots,
                indicators: indicators.clone(),
                autoplay_ms,
            };
            let Some(paints) = self.carousels.setup(parts, &mut self.timers) else {
                continue;
            };
            if let Some(prev) = self.document.first_class(root, PREV_CLASS) {
                self.controls.insert(prev, (root, Control::Prev));
            }
            if let Some(next) = self.document.first_class(root, NEXT_CLASS) {
                self.controls.insert(next, (root, Control::Next));
            }
            for (i, dot) in indicators.into_iter().enumerate() {
                self.controls.insert(dot, (root, Control::Indicator(i)));
            }
            self.paint(paints);
        }
        Ok(())
    }

    fn setup_widgets(&mut self) {
        for id in self.document.query_class(None, COUNTER_CLASS) {
            let Some(target) = attr::parse_int(self.document.attr(id, "data-count")) else {
                continue;
            };
            let prefix = self.document.attr(id, "data-prefix").unwrap_or_default();
            let suffix = self.document.attr(id, "data-suffix").unwrap_or_default();
            self.counters.register(id, target, prefix, suffix);
        }

        let mut paints = Vec::new();
        for id in self.document.query_class(None, PROGRESS_CLASS) {
            let raw = self
                .document
                .attr(id, "data-value")
                .filter(|v| !v.is_empty())
                .or_else(|| self.document.attr(id, "aria-valuenow"));
            let value = attr::parse_float(raw).unwrap_or(0.0);
            let label = self.document.first_class(id, PROGRESS_LABEL_CLASS);
            paints.extend(self.progress.register(id, value, label));
        }
        self.paint(paints);
    }

    /// Deliver one input at the current stage time, then run any zero-delay timers it armed.
    #[tracing::instrument(skip(self))]
    pub fn dispatch(&mut self, input: Input) -> MotionResult<()> {
        if let Some(target) = input.target()
            && !self.document.contains(target)
        {
            return Err(MotionError::scene(format!("unknown element {target}")));
        }

        let paints = match input {
            Input::Scroll { y } => {
                self.document.set_scroll_y(y);
                self.reveal.on_scroll(&mut self.frames);
                self.refresh_visibility()?;
                Vec::new()
            }
            Input::Resize { width, height } => {
                if !(width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0) {
                    return Err(MotionError::scene("viewport size must be finite and >= 0"));
                }
                self.document.set_viewport_size(width, height);
                self.refresh_visibility()?;
                Vec::new()
            }
            Input::Key { target, key } => self.carousels.on_key(target, key, &mut self.timers),
            Input::Click { target } => match self.controls.get(&target).copied() {
                Some((root, Control::Prev)) => {
                    self.carousels.step(root, Step::Prev, &mut self.timers)
                }
                Some((root, Control::Next)) => {
                    self.carousels.step(root, Step::Next, &mut self.timers)
                }
                Some((root, Control::Indicator(i))) => {
                    self.carousels.on_indicator(root, i, &mut self.timers)
                }
                None => Vec::new(),
            },
            Input::TouchStart { target, x } => {
                self.carousels.on_touch_start(target, x);
                Vec::new()
            }
            Input::TouchEnd { target, x } => {
                self.carousels.on_touch_end(target, x, &mut self.timers)
            }
            Input::PointerEnter { target } => {
                self.carousels.on_pointer_enter(target, &mut self.timers);
                Vec::new()
            }
            Input::PointerLeave { target } => {
                self.carousels.on_pointer_leave(target, &mut self.timers);
                Vec::new()
            }
        };
        self.paint(paints);
        self.flush_due();
        Ok(())
    }

    /// Run the clock forward to `until`, firing timers and frames in time order. A timer and
    /// a frame due at the same instant run timer first.
    #[tracing::instrument(skip(self))]
    pub fn advance_to(&mut self, until: Millis) {
        loop {
            let timer_at = self.timers.next_deadline().filter(|&t| t <= until);
            let frame_at = self.frames.next_frame_after(self.now).filter(|&t| t <= until);
            match (timer_at, frame_at) {
                (Some(t), Some(f)) if t <= f => self.fire_timer(t),
                (Some(t), None) => self.fire_timer(t),
                (_, Some(f)) => self.fire_frame(f),
                (None, None) => break,
            }
        }
        self.now = self.now.max(until);
        self.timers.advance_clock(self.now);
    }

    fn flush_due(&mut self) {
        while self.timers.next_deadline().is_some_and(|t| t <= self.now) {
            self.fire_timer(self.now);
        }
    }

    fn fire_timer(&mut self, until: Millis) {
        let Some(fired) = self.timers.pop_due(until) else {
            return;
        };
        self.now = self.now.max(fired.at);
        let paints = match fired.task {
            StageTask::Reveal(task) => self.reveal.on_timer(task),
            StageTask::Autoplay(tick) => self.carousels.on_autoplay(tick, fired.id, &mut self.timers),
        };
        self.paint(paints);
    }

    fn fire_frame(&mut self, at: Millis) {
        self.now = at;
        self.timers.advance_clock(at);
        tracing::trace!(at = at.0, "frame");
        for (_, task) in self.frames.take_frame() {
            let paints = match task {
                FrameTask::Parallax => self.reveal.on_parallax_frame(&self.document),
                FrameTask::Value => self.animator.on_frame(at, &mut self.frames),
            };
            self.paint(paints);
        }
    }

    fn refresh_visibility(&mut self) -> MotionResult<()> {
        self.reveal.on_visibility(&self.document, &mut self.timers);
        self.counters
            .on_visibility(&self.document, &mut self.animator, &mut self.frames)?;
        let paints = self
            .progress
            .on_visibility(&self.document, &mut self.animator, &mut self.frames)?;
        self.paint(paints);
        Ok(())
    }

    fn paint(&mut self, paints: Vec<Paint>) {
        for p in &paints {
            self.surface.apply(self.now, p);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/runtime.rs"]
mod tests;
