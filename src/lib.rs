#![forbid(unsafe_code)]
//! Motion core for the Apex theme.
//!
//! Visibility-triggered reveals, staggered groups, scroll parallax, value count-ups and
//! slide carousels, all driven by one virtual-time scheduler. Subsystems never touch a
//! display: they emit [`Paint`] records that a [`Surface`] applies.
//!
//! [`Stage`] is the entry point: build a [`Document`] (or load a scene JSON), call
//! [`Stage::setup`], then feed it [`Input`]s and advance its clock.

pub mod animation;
pub mod carousel;
pub mod focus;
pub mod foundation;
pub mod markup;
pub mod reveal;
pub mod schedule;
pub mod stage;
pub mod surface;
pub mod visibility;
pub mod widgets;

pub use animation::ease::ease_out_cubic;
pub use animation::value::{ValueAnimator, ValueFormat, ValueRun};
pub use carousel::controller::{CarouselController, CarouselParts};
pub use focus::roving::{Orientation, RovingFocus, Step};
pub use foundation::config::StageConfig;
pub use foundation::core::{ElementId, Key, Millis, Rect, Viewport};
pub use foundation::error::{MotionError, MotionResult};
pub use markup::document::{Document, ElementDef, SceneDef};
pub use reveal::engine::{MotionPreference, RevealEngine};
pub use schedule::{frame::FrameQueue, timer::TimerQueue};
pub use stage::runtime::{Input, SetupSummary, Stage};
pub use stage::script::{Script, ScriptStep};
pub use surface::memory::{InMemorySurface, Surface};
pub use surface::paint::{Paint, Patch, Transform};
pub use visibility::notifier::{VisibilityConfig, VisibilityNotifier};
