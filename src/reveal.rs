//! Scroll-triggered reveal, stagger and parallax.

/// Reveal Engine: single reveals and stagger groups.
pub mod engine;
/// Frame-coalesced scroll offsets.
pub mod parallax;
