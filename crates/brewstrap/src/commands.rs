//! Command execution abstractions and implementations

pub mod runner;
pub mod shell;


pub use runner::{CommandError, CommandOutput, CommandRunner, OutputCallback, OutputChunk};
pub use shell::ShellCommandRunner;
