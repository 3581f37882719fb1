//! The bootstrap itself
//!
//! A run is a single forward pass: make sure Homebrew exists, load the setup file, then
//! taps, formulae, casks and dotfiles, in that order. The first unhandled error ends the
//! run; nothing already done is rolled back, and a second run simply repeats every step,
//! relying on Homebrew's own idempotence and on dotfiles being overwritten.

mod bootstrap;
mod brew;
mod casks;
mod classify;
mod dotfiles;
mod formulae;
mod taps;

#[cfg(test)]
mod testing;
#[cfg(test)]
mod tests;

pub use self::{
    bootstrap::BootstrapOutcome,
    brew::{Brew, HOMEBREW_INSTALLER_URL, PackageKind},
    classify::{CaskFailure, classify_cask_failure},
    dotfiles::DOTFILES_DIR,
};

use std::{fmt, path::Path, path::PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    commands::{CommandError, CommandRunner, OutputCallback},
    config::{ConfigLoadError, ConfigLoader, SetupConfig, YamlLoader},
    fs::{FileSystem, FileSystemError},
    progress_reporter::ProgressReporter,
};

/// Why a run stopped
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Homebrew setup failed: {0}")]
    Bootstrap(#[source] CommandError),

    #[error("failed to load setup file: {0}")]
    Config(#[from] ConfigLoadError),

    #[error("tap {tap}: {source}")]
    Tap {
        tap: String,
        #[source]
        source: CommandError,
    },

    #[error("install formula {name}: {source}")]
    Formula {
        name: String,
        #[source]
        source: CommandError,
    },

    #[error("install cask {name} failed: {source}{}", output_block(.output))]
    Cask {
        name: String,
        #[source]
        source: CommandError,
        output: String,
    },

    #[error("write {}: {source}", path.display())]
    DotfileWrite {
        path: PathBuf,
        #[source]
        source: FileSystemError,
    },

    #[error("cannot locate dotfile directories: {0}")]
    Environment(#[source] FileSystemError),
}

// Captured install output, on its own lines; nothing when there was none.
fn output_block(output: &str) -> String {
    if output.trim().is_empty() {
        String::new()
    } else {
        format!("\n{}", output.trim_end())
    }
}

/// What happened to a single formula or cask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Homebrew already reported it as installed; nothing was run
    AlreadyInstalled,
    /// The install command ran and succeeded
    Installed,
    /// The install command failed because the app exists outside Homebrew's tracking
    PresentOutsideBrew,
}

impl InstallOutcome {
    #[must_use]
    pub fn is_skip(self) -> bool {
        !matches!(self, Self::Installed)
    }
}

/// Counts for one package kind over a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackageTally {
    pub installed: usize,
    pub skipped: usize,
}

impl PackageTally {
    pub(crate) fn record(&mut self, outcome: InstallOutcome) {
        if outcome.is_skip() {
            self.skipped += 1;
        } else {
            self.installed += 1;
        }
    }
}

/// Counts for the dotfile step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DotfileTally {
    pub copied: usize,
    pub skipped: usize,
}

/// What a completed run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub bootstrap: Option<BootstrapOutcome>,
    pub taps: usize,
    pub formulae: PackageTally,
    pub casks: PackageTally,
    pub dotfiles: DotfileTally,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} taps, {} formulae installed ({} skipped), {} casks installed ({} skipped), \
             {} dotfiles copied ({} skipped)",
            self.taps,
            self.formulae.installed,
            self.formulae.skipped,
            self.casks.installed,
            self.casks.skipped,
            self.dotfiles.copied,
            self.dotfiles.skipped,
        )
    }
}

/// Runs the bootstrap steps against the given ports
#[derive(Debug)]
pub struct SetupService<CR, FS, R> {
    command_runner: CR,
    fs: FS,
    reporter: R,
    brew: Brew,
    echo_output: bool,
}

impl<CR, FS, R> SetupService<CR, FS, R>
where
    CR: CommandRunner,
    FS: FileSystem,
    R: ProgressReporter,
{
    pub fn new(command_runner: CR, fs: FS, reporter: R, brew: Brew) -> Self {
        Self {
            command_runner,
            fs,
            reporter,
            brew,
            echo_output: true,
        }
    }

    /// Whether streamed command output is copied to this process's stdout/stderr.
    /// On by default.
    #[must_use]
    pub fn with_echo_output(mut self, echo_output: bool) -> Self {
        self.echo_output = echo_output;
        self
    }

    #[must_use]
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Load the setup file at `config_path` without running anything.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Config`] if the file is missing, unreadable or malformed.
    pub fn load_config(&self, config_path: &Path) -> Result<SetupConfig, SetupError> {
        let config = YamlLoader::new(&self.fs).load_config(config_path)?;
        debug!(?config, "setup file loaded");
        Ok(config)
    }

    /// The full bootstrap: Homebrew, setup file, taps, formulae, casks, dotfiles.
    ///
    /// # Errors
    ///
    /// Returns the first [`SetupError`] any step produces; later steps are not attempted.
    pub async fn run(&self, config_path: &Path) -> Result<RunSummary, SetupError> {
        let bootstrap = self.ensure_homebrew().await?;

        let config = self.load_config(config_path)?;
        self.reporter.report_info(format!(
            "Loaded {} taps, {} formula categories, {} cask categories",
            config.taps().len(),
            config.formulae().len(),
            config.casks().len(),
        ));

        let mut summary = self.apply(&config).await?;
        summary.bootstrap = Some(bootstrap);
        Ok(summary)
    }

    /// Taps, formulae, casks and dotfiles for an already loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`SetupError`] any step produces; later steps are not attempted.
    pub async fn apply(&self, config: &SetupConfig) -> Result<RunSummary, SetupError> {
        let taps = self.ensure_taps(config.taps()).await?;
        let formulae = self.ensure_formulae(config.formulae()).await?;
        let casks = self.ensure_casks(config.casks()).await?;
        let dotfiles = self.ensure_dotfiles(config.dotfiles())?;

        let summary = RunSummary {
            bootstrap: None,
            taps,
            formulae,
            casks,
            dotfiles,
        };
        info!(%summary, "setup complete");
        Ok(summary)
    }

    /// Ask Homebrew whether `name` is installed. A non-zero exit means "no".
    async fn is_installed(&self, kind: PackageKind, name: &str) -> Result<bool, CommandError> {
        let list_cmd = self.brew.list(kind, name);
        let output = self.command_runner.execute(&list_cmd).await?;
        Ok(output.is_success())
    }

    fn output_callback(&self) -> OutputCallback {
        if self.echo_output {
            Box::new(|chunk| {
                if let Err(error) = chunk.echo() {
                    debug!(%error, "cannot echo command output");
                }
            })
        } else {
            Box::new(|_| {})
        }
    }
}
