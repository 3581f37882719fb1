use tracing::{debug, info};

use crate::{commands::CommandRunner, fs::FileSystem, progress_reporter::ProgressReporter};

use super::{SetupError, SetupService};

/// How the package manager check ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    AlreadyInstalled,
    Installed,
}

impl<CR, FS, R> SetupService<CR, FS, R>
where
    CR: CommandRunner,
    FS: FileSystem,
    R: ProgressReporter,
{
    /// Make sure `brew` can be run, installing Homebrew if it can't.
    ///
    /// The installer's output is streamed to the user. The installer is trusted to have
    /// done its job when it exits successfully; `brew` is not probed a second time.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Bootstrap`] if the installer cannot be started or fails.
    pub async fn ensure_homebrew(&self) -> Result<BootstrapOutcome, SetupError> {
        let version_cmd = self.brew.version();

        match self.command_runner.execute(&version_cmd).await {
            Ok(output) if output.is_success() => {
                debug!(version = %output.stdout_str().trim(), "brew is available");
                self.reporter.report_skip("Homebrew is already installed");
                return Ok(BootstrapOutcome::AlreadyInstalled);
            }
            Ok(output) => {
                debug!(exit_code = output.exit_code(), "brew --version failed");
            }
            Err(error) => {
                debug!(%error, "brew could not be run");
            }
        }

        self.reporter.report_progress("Installing Homebrew...");
        let installer = self.brew.installer();
        info!(command = %installer, "running Homebrew installer");

        self.command_runner
            .execute_streaming(&installer, self.output_callback())
            .await
            .and_then(|output| output.ensure_success(&installer))
            .map_err(|error| {
                self.reporter
                    .report_error(format!("Homebrew installation failed: {error}"));
                SetupError::Bootstrap(error)
            })?;

        self.reporter.report_success("Homebrew installed successfully");
        Ok(BootstrapOutcome::Installed)
    }
}
