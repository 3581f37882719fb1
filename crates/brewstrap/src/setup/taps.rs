use tracing::info;

use crate::{commands::CommandRunner, fs::FileSystem, progress_reporter::ProgressReporter};

use super::{SetupError, SetupService};

impl<CR, FS, R> SetupService<CR, FS, R>
where
    CR: CommandRunner,
    FS: FileSystem,
    R: ProgressReporter,
{
    /// Register every tap, in declared order.
    ///
    /// `brew tap` is run unconditionally; re-tapping something already tapped is a no-op
    /// for Homebrew. Returns how many taps were processed.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Tap`] for the first tap that fails; the taps after it are not
    /// attempted and the ones before it stay registered.
    pub async fn ensure_taps(&self, taps: &[String]) -> Result<usize, SetupError> {
        for tap in taps {
            self.reporter.report_progress(format!("Tapping {tap}..."));
            info!(%tap, "ensuring tap");

            let tap_cmd = self.brew.tap(tap);
            self.command_runner
                .execute_streaming(&tap_cmd, self.output_callback())
                .await
                .and_then(|output| output.ensure_success(&tap_cmd))
                .map_err(|source| SetupError::Tap {
                    tap: tap.clone(),
                    source,
                })?;
        }

        Ok(taps.len())
    }
}
