//! Host runtime: wires the document, the schedulers and every subsystem together.
pub mod runtime;
pub mod script;
