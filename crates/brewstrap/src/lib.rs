//! Brewstrap - bootstrap a machine from a single YAML setup file
//!
//! The `brewstrap` library makes sure Homebrew is present, registers the declared taps,
//! installs the declared formulae and casks, and copies dotfiles into the user's home
//! directory. Everything outside of the orchestration logic is reached through ports so the
//! orchestration can be exercised without a real package manager or home directory.
//!
//! # Main Components
//!
//! - [`setup`] - The ordered bootstrap steps and their error type
//! - [`config`] - The setup file model and its loader
//! - [`commands`] - Command execution abstractions
//! - [`fs`] - File system abstractions
//! - [`progress_reporter`] - User-facing status lines
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//!
//! use brewstrap::{
//!     commands::ShellCommandRunner,
//!     fs::real::RealFileSystem,
//!     progress_reporter::terminal::TerminalProgressReporter,
//!     setup::{Brew, SetupService},
//! };
//!
//! # async fn run() -> Result<(), brewstrap::setup::SetupError> {
//! let service = SetupService::new(
//!     ShellCommandRunner::new("/bin/sh", None),
//!     RealFileSystem,
//!     TerminalProgressReporter::new(true),
//!     Brew::default(),
//! );
//! let summary = service.run(Path::new("config.yaml")).await?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod config;
pub mod fs;
pub mod progress_reporter;
pub mod setup;
