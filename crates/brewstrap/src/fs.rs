//! File system abstractions and the real implementation

pub mod filesystem;
pub mod real;

pub use filesystem::{FileSystem, FileSystemError};
