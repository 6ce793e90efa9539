use crate::{
    foundation::error::{MotionError, MotionResult},
    visibility::notifier::{RootMargin, VisibilityConfig},
};

/// Stage-wide tuning knobs.
///
/// Every field has a default, so an empty JSON object is a valid configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StageConfig {
    /// Display-refresh cadence in ms.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    /// Sensor for single revealable elements.
    #[serde(default = "default_reveal_sensor")]
    pub reveal_sensor: VisibilityConfig,
    /// Sensor for stagger group containers.
    #[serde(default = "default_stagger_sensor")]
    pub stagger_sensor: VisibilityConfig,
    /// Sensor for animated counters.
    #[serde(default = "default_counter_sensor")]
    pub counter_sensor: VisibilityConfig,
    /// Sensor for progress bars.
    #[serde(default = "default_progress_sensor")]
    pub progress_sensor: VisibilityConfig,
    /// Minimum absolute horizontal travel (exclusive) for a touch sequence to count as a swipe.
    #[serde(default = "default_gesture_threshold_px")]
    pub gesture_threshold_px: f64,
    /// Autoplay interval used when the carousel attribute is unparseable.
    #[serde(default = "default_autoplay_ms")]
    pub default_autoplay_ms: u64,
    /// Stagger interval used when the group attribute is unparseable or non-positive.
    #[serde(default = "default_stagger_ms")]
    pub default_stagger_ms: u64,
    /// Parallax speed used when the element attribute is unparseable or zero.
    #[serde(default = "default_parallax_speed")]
    pub default_parallax_speed: f64,
    /// Counter run duration.
    #[serde(default = "default_counter_duration_ms")]
    pub counter_duration_ms: u64,
    /// Progress label run duration.
    #[serde(default = "default_progress_duration_ms")]
    pub progress_duration_ms: u64,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval_ms(),
            reveal_sensor: default_reveal_sensor(),
            stagger_sensor: default_stagger_sensor(),
            counter_sensor: default_counter_sensor(),
            progress_sensor: default_progress_sensor(),
            gesture_threshold_px: default_gesture_threshold_px(),
            default_autoplay_ms: default_autoplay_ms(),
            default_stagger_ms: default_stagger_ms(),
            default_parallax_speed: default_parallax_speed(),
            counter_duration_ms: default_counter_duration_ms(),
            progress_duration_ms: default_progress_duration_ms(),
        }
    }
}

impl StageConfig {
    pub fn from_json_str(s: &str) -> MotionResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> MotionResult<()> {
        if self.frame_interval_ms == 0 {
            return Err(MotionError::config("frame_interval_ms must be > 0"));
        }
        for (name, sensor) in [
            ("reveal_sensor", &self.reveal_sensor),
            ("stagger_sensor", &self.stagger_sensor),
            ("counter_sensor", &self.counter_sensor),
            ("progress_sensor", &self.progress_sensor),
        ] {
            sensor
                .validate()
                .map_err(|e| MotionError::config(format!("{name}: {e}")))?;
        }
        if !self.gesture_threshold_px.is_finite() || self.gesture_threshold_px < 0.0 {
            return Err(MotionError::config(
                "gesture_threshold_px must be finite and >= 0",
            ));
        }
        if self.default_stagger_ms == 0 {
            return Err(MotionError::config("default_stagger_ms must be > 0"));
        }
        if self.counter_duration_ms == 0 || self.progress_duration_ms == 0 {
            return Err(MotionError::config("value animation durations must be > 0"));
        }
        if !self.default_parallax_speed.is_finite() {
            return Err(MotionError::config("default_parallax_speed must be finite"));
        }
        Ok(())
    }
}

fn default_frame_interval_ms() -> u64 {
    16
}

fn default_reveal_sensor() -> VisibilityConfig {
    VisibilityConfig {
        threshold: 0.1,
        root_margin: RootMargin {
            bottom: -50.0,
            ..RootMargin::default()
        },
    }
}

fn default_stagger_sensor() -> VisibilityConfig {
    VisibilityConfig::with_threshold(0.2)
}

fn default_counter_sensor() -> VisibilityConfig {
    VisibilityConfig::with_threshold(0.5)
}

fn default_progress_sensor() -> VisibilityConfig {
    VisibilityConfig::with_threshold(0.3)
}

fn default_gesture_threshold_px() -> f64 {
    50.0
}

fn default_autoplay_ms() -> u64 {
    5000
}

fn default_stagger_ms() -> u64 {
    100
}

fn default_parallax_speed() -> f64 {
    0.3
}

fn default_counter_duration_ms() -> u64 {
    2000
}

fn default_progress_duration_ms() -> u64 {
    1200
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
