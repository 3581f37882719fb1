use tracing::{debug, info};

use crate::{
    commands::CommandRunner, config::Categories, fs::FileSystem,
    progress_reporter::ProgressReporter,
};

use super::{InstallOutcome, PackageKind, PackageTally, SetupError, SetupService};

impl<CR, FS, R> SetupService<CR, FS, R>
where
    CR: CommandRunner,
    FS: FileSystem,
    R: ProgressReporter,
{
    /// Install every declared formula that is missing, category by category.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Formula`] for the first formula that cannot be installed;
    /// nothing after it, in this category or any later one, is attempted.
    pub async fn ensure_formulae(&self, categories: &Categories) -> Result<PackageTally, SetupError> {
        let mut tally = PackageTally::default();

        for (category, packages) in categories {
            self.reporter
                .report_info(format!("Category {category} ({})", packages.len()));
            info!(%category, count = packages.len(), "ensuring formulae");

            for name in packages {
                tally.record(self.install_formula(name).await?);
            }
        }

        Ok(tally)
    }

    /// Install a single formula unless Homebrew already has it.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Formula`] if the query or the install cannot be run, or the
    /// install exits non-zero.
    pub async fn install_formula(&self, name: &str) -> Result<InstallOutcome, SetupError> {
        let wrap = |source| SetupError::Formula {
            name: name.to_string(),
            source,
        };

        if self.is_installed(PackageKind::Formula, name).await.map_err(wrap)? {
            debug!(formula = name, "already installed");
            self.reporter.report_skip(format!("{name} already installed"));
            return Ok(InstallOutcome::AlreadyInstalled);
        }

        self.reporter
            .report_progress(format!("Installing formula {name}"));
        let install_cmd = self.brew.install(PackageKind::Formula, name);

        self.command_runner
            .execute_streaming(&install_cmd, self.output_callback())
            .await
            .and_then(|output| output.ensure_success(&install_cmd))
            .map_err(wrap)?;

        info!(formula = name, "installed");
        Ok(InstallOutcome::Installed)
    }
}
