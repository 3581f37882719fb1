//! Common test utilities shared across the brewstrap crates.
//!
//! Everything here works against real processes and real directories: a scratch
//! [`TestWorkspace`] with its own working and home directories, and a [`FakeBrew`] script
//! that stands in for Homebrew and logs how it was called.

pub mod constants;
pub mod fake_brew;
pub mod rooted_fs;
pub mod workspace;

pub use constants::*;
pub use fake_brew::FakeBrew;
pub use rooted_fs::RootedFileSystem;
pub use workspace::TestWorkspace;

// Re-export commonly used items for convenience
pub use brewstrap::config::SetupConfigBuilder;
pub use tempfile::TempDir;
