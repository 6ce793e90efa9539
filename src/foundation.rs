pub mod attr;
pub mod config;
pub mod core;
pub mod error;
pub(crate) mod math;
