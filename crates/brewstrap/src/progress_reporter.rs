//! User-facing status lines, kept apart from `tracing` diagnostics

pub mod port;
pub mod recording;
pub mod terminal;

pub use port::{MessageType, ProgressReporter};
