use std::collections::BTreeMap;
use std::fmt;

use crate::{
    animation::ease::ease_out_cubic,
    foundation::{
        core::{ElementId, Millis},
        error::{MotionError, MotionResult},
        math::group_thousands,
    },
    schedule::frame::FrameQueue,
    surface::paint::Paint,
};

/// Renders a display value as text.
pub type Formatter = Box<dyn Fn(i64) -> String>;

/// Built-in formatter: `prefix`, the value (optionally with thousands separators), `suffix`.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ValueFormat {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(default)]
    pub group_thousands: bool,
}

impl ValueFormat {
    pub fn format(&self, value: i64) -> String {
        let body = if self.group_thousands {
            group_thousands(value)
        } else {
            value.to_string()
        };
        format!("{}{}{}", self.prefix, body, self.suffix)
    }

    pub fn into_formatter(self) -> Formatter {
        Box::new(move |v| self.format(v))
    }
}

/// Output of one progress tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickOutput {
    pub value: i64,
    pub text: String,
    pub done: bool,
}

/// One interpolation run from `start` to `end`.
///
/// The start timestamp is taken from the first tick, so the first rendered value is always
/// `start`; the tick that reaches full progress renders `end` exactly.
pub struct ValueRun {
    target: ElementId,
    start: i64,
    end: i64,
    duration_ms: u64,
    started_at: Option<Millis>,
    progress: f64,
    formatter: Formatter,
}

impl fmt::Debug for ValueRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueRun")
            .field("target", &self.target)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("duration_ms", &self.duration_ms)
            .field("started_at", &self.started_at)
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}

impl ValueRun {
    pub fn new(
        target: ElementId,
        start: i64,
        end: i64,
        duration_ms: u64,
        formatter: Formatter,
    ) -> MotionResult<Self> {
        if duration_ms == 0 {
            return Err(MotionError::validation("value run duration must be > 0"));
        }
        Ok(Self {
            target,
            start,
            end,
            duration_ms,
            started_at: None,
            progress: 0.0,
            formatter,
        })
    }

    pub fn target(&self) -> ElementId {
        self.target
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn tick(&mut self, now: Millis) -> TickOutput {
        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_since(started_at) as f64;
        let progress = (elapsed / self.duration_ms as f64).min(1.0);
        // Never step backwards within a run.
        self.progress = self.progress.max(progress);

        let done = self.progress >= 1.0;
        let value = if done {
            self.end
        } else {
            let eased = ease_out_cubic(self.progress);
            let span = self.end as f64 - self.start as f64;
            (self.start as f64 + span * eased).floor() as i64
        };
        TickOutput {
            value,
            text: (self.formatter)(value),
            done,
        }
    }
}

/// Frame callback requested by the animator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueFrame;

/// Drives every active [`ValueRun`] from the display-refresh clock.
///
/// At most one run exists per target: starting a run on a target that is mid-run replaces
/// the earlier run. Runs cannot be cancelled otherwise; they always finish.
#[derive(Debug, Default)]
pub struct ValueAnimator {
    runs: BTreeMap<ElementId, ValueRun>,
    frame_requested: bool,
}

impl ValueAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self, target: ElementId) -> bool {
        self.runs.contains_key(&target)
    }

    pub fn active_len(&self) -> usize {
        self.runs.len()
    }

    /// Start a run; its first tick happens on the next frame.
    pub fn animate<T: From<ValueFrame>>(
        &mut self,
        run: ValueRun,
        frames: &mut FrameQueue<T>,
    ) {
        let target = run.target;
        if self.runs.insert(target, run).is_some() {
            tracing::debug!(%target, "value run superseded");
        } else {
            tracing::debug!(%target, "value run started");
        }
        self.request_frame(frames);
    }

    /// Advance every run by one tick at frame time `now`.
    pub fn on_frame<T: From<ValueFrame>>(
        &mut self,
        now: Millis,
        frames: &mut FrameQueue<T>,
    ) -> Vec<Paint> {
        self.frame_requested = false;
        let mut paints = Vec::with_capacity(self.runs.len());
        self.runs.retain(|target, run| {
            let out = run.tick(now);
            paints.push(Paint::text(*target, out.text));
            if out.done {
                tracing::debug!(%target, value = out.value, "value run complete");
            }
            !out.done
        });
        if !self.runs.is_empty() {
            self.request_frame(frames);
        }
        paints
    }

    fn request_frame<T: From<ValueFrame>>(&mut self, frames: &mut FrameQueue<T>) {
        if !self.frame_requested {
            frames.request(ValueFrame.into());
            self.frame_requested = true;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/value.rs"]
mod tests;
