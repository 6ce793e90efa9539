//! Timer Scheduler and display-refresh clock.
//!
//! Both queues hold task values instead of closures; the stage pops them and dispatches to
//! the owning subsystem, one at a time.

/// Display-refresh frame queue.
pub mod frame;
/// One-shot and repeating timers on a virtual clock.
pub mod timer;
