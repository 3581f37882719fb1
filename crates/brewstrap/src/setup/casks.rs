use tracing::{debug, info, warn};

use crate::{
    commands::CommandRunner, config::Categories, fs::FileSystem,
    progress_reporter::ProgressReporter,
};

use super::{
    CaskFailure, InstallOutcome, PackageKind, PackageTally, SetupError, SetupService,
    classify_cask_failure,
};

impl<CR, FS, R> SetupService<CR, FS, R>
where
    CR: CommandRunner,
    FS: FileSystem,
    R: ProgressReporter,
{
    /// Install every declared cask that is missing, category by category.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Cask`] for the first cask that cannot be installed; nothing
    /// after it, in this category or any later one, is attempted.
    pub async fn ensure_casks(&self, categories: &Categories) -> Result<PackageTally, SetupError> {
        let mut tally = PackageTally::default();

        for (category, packages) in categories {
            self.reporter
                .report_info(format!("Cask category {category} ({})", packages.len()));
            info!(%category, count = packages.len(), "ensuring casks");

            for name in packages {
                tally.record(self.install_cask(name).await?);
            }
        }

        Ok(tally)
    }

    /// Install a single cask unless Homebrew already has it.
    ///
    /// The install output is captured rather than streamed so that a failure can be
    /// inspected with [`classify_cask_failure`].
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Cask`] if the query or the install cannot be run, or the
    /// install fails for any reason other than the app already being present.
    pub async fn install_cask(&self, name: &str) -> Result<InstallOutcome, SetupError> {
        let wrap = |source| SetupError::Cask {
            name: name.to_string(),
            source,
            output: String::new(),
        };

        if self.is_installed(PackageKind::Cask, name).await.map_err(wrap)? {
            debug!(cask = name, "already installed");
            self.reporter
                .report_skip(format!("{name} already installed (cask)"));
            return Ok(InstallOutcome::AlreadyInstalled);
        }

        self.reporter.report_progress(format!("Installing cask {name}"));
        let install_cmd = self.brew.install(PackageKind::Cask, name);
        let output = self
            .command_runner
            .execute(&install_cmd)
            .await
            .map_err(wrap)?;

        if output.is_success() {
            info!(cask = name, "installed");
            self.reporter.report_success(format!("Installed cask {name}"));
            return Ok(InstallOutcome::Installed);
        }

        let combined = output.combined_output();
        match classify_cask_failure(&combined) {
            CaskFailure::PresentOutsideBrew => {
                warn!(cask = name, "app already present outside Homebrew");
                self.reporter
                    .report_skip(format!("{name} already present outside Homebrew, skipping"));
                Ok(InstallOutcome::PresentOutsideBrew)
            }
            CaskFailure::Fatal => Err(SetupError::Cask {
                name: name.to_string(),
                source: output.into_error(&install_cmd),
                output: combined,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commands::{
            CommandOutput,
            runner::{CommandError, MockCommandRunner},
        },
        config::SetupConfigBuilder,
        fs::filesystem::MockFileSystem,
        progress_reporter::MessageType,
        setup::testing::{failed, ok, service},
    };

    #[tokio::test]
    async fn test_installed_cask_is_not_reinstalled() {
        let mut runner = MockCommandRunner::new();
        runner.mock_installed(PackageKind::Cask, "firefox", true);
        runner.forbid("brew install --cask firefox");

        let service = service(runner, MockFileSystem::new());

        assert_eq!(
            service.install_cask("firefox").await.unwrap(),
            InstallOutcome::AlreadyInstalled
        );
    }

    #[tokio::test]
    async fn test_missing_cask_is_installed_with_captured_output() {
        let mut runner = MockCommandRunner::new();
        runner.mock_installed(PackageKind::Cask, "raycast", false);
        runner.mock_execute("brew install --cask raycast", ok("🍺  raycast was successfully installed!\n"));
        runner.expect_execute_streaming().never();

        let service = service(runner, MockFileSystem::new());

        assert_eq!(
            service.install_cask("raycast").await.unwrap(),
            InstallOutcome::Installed
        );
        assert!(service.reporter().contains(MessageType::Success, "raycast"));
    }

    #[tokio::test]
    async fn test_existing_app_is_a_successful_skip() {
        let mut runner = MockCommandRunner::new();
        runner.mock_installed(PackageKind::Cask, "slack", false);
        runner.mock_execute(
            "brew install --cask slack",
            failed(1, "Error: It seems there is already an App at '/Applications/Slack.app'."),
        );

        let service = service(runner, MockFileSystem::new());

        let outcome = service.install_cask("slack").await.unwrap();

        assert_eq!(outcome, InstallOutcome::PresentOutsideBrew);
        assert!(service.reporter().contains(MessageType::Skip, "outside Homebrew"));
    }

    #[tokio::test]
    async fn test_marker_on_stdout_is_also_recognised() {
        let mut runner = MockCommandRunner::new();
        runner.mock_installed(PackageKind::Cask, "zoom", false);
        runner.mock_execute(
            "brew install --cask zoom",
            CommandOutput::from_exit_code(1, "there is already an app at /Applications/zoom.us.app", ""),
        );

        let service = service(runner, MockFileSystem::new());

        assert_eq!(
            service.install_cask("zoom").await.unwrap(),
            InstallOutcome::PresentOutsideBrew
        );
    }

    #[tokio::test]
    async fn test_unrelated_failure_carries_the_output() {
        let mut runner = MockCommandRunner::new();
        runner.mock_installed(PackageKind::Cask, "not-an-app", false);
        runner.mock_execute(
            "brew install --cask not-an-app",
            failed(1, "Error: Cask 'not-an-app' is unavailable: No Cask with this name exists."),
        );

        let service = service(runner, MockFileSystem::new());

        let error = service.install_cask("not-an-app").await.unwrap_err();

        match &error {
            SetupError::Cask {
                name,
                source,
                output,
            } => {
                assert_eq!(name, "not-an-app");
                assert!(output.contains("No Cask with this name exists"));
                assert!(matches!(source, CommandError::NonZeroExit { exit_code: 1, .. }));
            }
            other => panic!("Expected Cask error, got: {other:?}"),
        }
        assert!(error.to_string().contains("install cask not-an-app failed"));
        assert!(error.to_string().contains("No Cask with this name exists"));
    }

    #[tokio::test]
    async fn test_unrelated_failure_aborts_later_categories() {
        let config = SetupConfigBuilder::default()
            .casks("browsers", ["firefox", "broken-app"])
            .casks("chat", ["slack"])
            .build();

        let mut runner = MockCommandRunner::new();
        runner.mock_installed(PackageKind::Cask, "firefox", true);
        runner.mock_installed(PackageKind::Cask, "broken-app", false);
        runner.mock_execute(
            "brew install --cask broken-app",
            failed(1, "Error: Download failed on Cask 'broken-app'"),
        );
        runner.forbid("brew list --cask slack");

        let service = service(runner, MockFileSystem::new());

        let error = service.ensure_casks(config.casks()).await.unwrap_err();

        assert!(matches!(error, SetupError::Cask { ref name, .. } if name == "broken-app"));
    }

    #[tokio::test]
    async fn test_skips_and_installs_are_tallied() {
        let config = SetupConfigBuilder::default()
            .casks("apps", ["firefox", "slack", "raycast"])
            .build();

        let mut runner = MockCommandRunner::new();
        runner.mock_installed(PackageKind::Cask, "firefox", true);
        runner.mock_installed(PackageKind::Cask, "slack", false);
        runner.mock_execute(
            "brew install --cask slack",
            failed(1, "Error: It seems there is already an App at '/Applications/Slack.app'."),
        );
        runner.mock_installed(PackageKind::Cask, "raycast", false);
        runner.mock_execute("brew install --cask raycast", ok(""));

        let service = service(runner, MockFileSystem::new());

        let tally = service.ensure_casks(config.casks()).await.unwrap();

        assert_eq!(tally, PackageTally { installed: 1, skipped: 2 });
    }

    #[tokio::test]
    async fn test_failed_query_message_has_no_trailing_output_block() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_execute()
            .withf(|cmd| cmd == "brew list --cask firefox")
            .times(1)
            .returning(|cmd| {
                Err(CommandError::io(
                    cmd,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "no shell"),
                ))
            });

        let service = service(runner, MockFileSystem::new());

        let message = service.install_cask("firefox").await.unwrap_err().to_string();

        assert!(message.starts_with("install cask firefox failed: IO Error executing command"));
        assert!(!message.ends_with('\n'));
        assert_eq!(message.lines().count(), 1);
    }

    #[tokio::test]
    async fn test_install_output_follows_the_message_on_its_own_line() {
        let mut runner = MockCommandRunner::new();
        runner.mock_installed(PackageKind::Cask, "broken-app", false);
        runner.mock_execute(
            "brew install --cask broken-app",
            failed(1, "Error: Download failed on Cask 'broken-app'\n"),
        );

        let service = service(runner, MockFileSystem::new());

        let message = service.install_cask("broken-app").await.unwrap_err().to_string();

        assert_eq!(
            message.lines().collect::<Vec<_>>(),
            [
                "install cask broken-app failed: Command failed with exit code 1: \
                 brew install --cask broken-app",
                "Error: Download failed on Cask 'broken-app'",
            ]
        );
    }
}
