//! Render-step output and the sink that consumes it.

/// Surface trait and the in-memory implementation.
pub mod memory;
/// `Paint` records and their patches.
pub mod paint;
