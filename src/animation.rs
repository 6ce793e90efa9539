/// Easing curve.
pub mod ease;
/// Frame-driven numeric interpolation (the Value Animator).
pub mod value;
