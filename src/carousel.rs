//! Slide carousels: index state, autoplay, swipe resolution and rendering.
pub mod controller;
pub mod gesture;
pub mod view;
