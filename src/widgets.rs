//! Standalone visibility-triggered widgets built on the Value Animator.
pub mod counter;
pub mod progress;
