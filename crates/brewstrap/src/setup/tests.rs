//! Whole-run tests for the setup service

use std::path::Path;

use mockall::{Sequence, predicate::eq};

use super::*;
use crate::{
    commands::runner::MockCommandRunner,
    config::SetupConfigBuilder,
    fs::filesystem::MockFileSystem,
    progress_reporter::MessageType,
    setup::testing::{failed, ok, service},
};

const CONFIG_PATH: &str = "/work/config.yaml";

#[tokio::test]
async fn test_empty_config_invokes_nothing() {
    // No expectations on either port: any command or file access would panic.
    let service = service(MockCommandRunner::new(), MockFileSystem::new());

    let summary = service.apply(&SetupConfig::default()).await.unwrap();

    assert_eq!(summary, RunSummary::default());
}

#[tokio::test]
async fn test_run_with_empty_setup_file_only_checks_for_brew() {
    let mut runner = MockCommandRunner::new();
    runner.mock_execute("brew --version", ok("Homebrew 4.4.0"));

    let mut fs = MockFileSystem::new();
    fs.mock_read_file(CONFIG_PATH, "brew: {}\ndotfiles: []\n");

    let service = service(runner, fs);

    let summary = service.run(Path::new(CONFIG_PATH)).await.unwrap();

    assert_eq!(summary.bootstrap, Some(BootstrapOutcome::AlreadyInstalled));
    assert_eq!(summary.taps, 0);
    assert_eq!(summary.formulae, PackageTally::default());
    assert_eq!(summary.casks, PackageTally::default());
    assert_eq!(summary.dotfiles, DotfileTally::default());
    assert!(service.reporter().contains(
        MessageType::Info,
        "Loaded 0 taps, 0 formula categories, 0 cask categories"
    ));
}

#[tokio::test]
async fn test_failed_bootstrap_stops_before_reading_the_setup_file() {
    let mut runner = MockCommandRunner::new();
    runner.mock_execute("brew --version", failed(127, "brew: not found"));
    runner.mock_execute_streaming(&Brew::default().installer(), failed(1, "curl: failed"));

    // No file system expectations: reading the setup file would panic.
    let service = service(runner, MockFileSystem::new());

    let error = service.run(Path::new(CONFIG_PATH)).await.unwrap_err();

    assert!(matches!(error, SetupError::Bootstrap(_)));
}

#[tokio::test]
async fn test_unloadable_setup_file_stops_the_run() {
    let mut runner = MockCommandRunner::new();
    runner.mock_execute("brew --version", ok(""));

    let mut fs = MockFileSystem::new();
    fs.mock_read_file(CONFIG_PATH, "brew: [unclosed");

    let service = service(runner, fs);

    let error = service.run(Path::new(CONFIG_PATH)).await.unwrap_err();

    assert!(matches!(error, SetupError::Config(ConfigLoadError::Parse { .. })));
    assert!(error.to_string().starts_with("failed to load setup file"));
}

#[tokio::test]
async fn test_steps_run_in_order() {
    let config = SetupConfigBuilder::default()
        .tap("homebrew/cask-fonts")
        .formulae("dev", ["jq"])
        .casks("apps", ["firefox"])
        .dotfile(".zshrc")
        .build();

    let mut seq = Sequence::new();
    let mut runner = MockCommandRunner::new();
    runner
        .expect_execute_streaming()
        .withf(|cmd, _| cmd == "brew tap homebrew/cask-fonts")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(ok("")));
    runner
        .expect_execute()
        .with(eq("brew list --formula jq"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(failed(1, "")));
    runner
        .expect_execute_streaming()
        .withf(|cmd, _| cmd == "brew install jq")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(ok("")));
    runner
        .expect_execute()
        .with(eq("brew list --cask firefox"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(failed(1, "")));
    runner
        .expect_execute()
        .with(eq("brew install --cask firefox"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(ok("")));

    let mut fs = MockFileSystem::new();
    fs.mock_dirs("/work", "/home/me");
    fs.mock_read_bytes("/work/dotfiles/.zshrc", "zsh");
    fs.mock_write_file("/home/me/.zshrc", "zsh");

    let service = service(runner, fs);

    let summary = service.apply(&config).await.unwrap();

    assert_eq!(
        summary,
        RunSummary {
            bootstrap: None,
            taps: 1,
            formulae: PackageTally { installed: 1, skipped: 0 },
            casks: PackageTally { installed: 1, skipped: 0 },
            dotfiles: DotfileTally { copied: 1, skipped: 0 },
        }
    );
}

#[tokio::test]
async fn test_failed_tap_skips_packages_and_dotfiles() {
    let config = SetupConfigBuilder::default()
        .tap("nope/missing")
        .formulae("dev", ["jq"])
        .casks("apps", ["firefox"])
        .dotfile(".zshrc")
        .build();

    let mut runner = MockCommandRunner::new();
    runner.mock_execute_streaming("brew tap nope/missing", failed(1, ""));
    // No other expectations: package queries would panic.

    // No file system expectations either: dotfiles must not be touched.
    let service = service(runner, MockFileSystem::new());

    let error = service.apply(&config).await.unwrap_err();

    assert!(matches!(error, SetupError::Tap { .. }));
}

#[tokio::test]
async fn test_cask_failure_leaves_dotfiles_alone() {
    let config = SetupConfigBuilder::default()
        .casks("apps", ["broken-app"])
        .dotfile(".zshrc")
        .build();

    let mut runner = MockCommandRunner::new();
    runner.mock_installed(PackageKind::Cask, "broken-app", false);
    runner.mock_execute("brew install --cask broken-app", failed(1, "Error: boom"));

    let service = service(runner, MockFileSystem::new());

    let error = service.apply(&config).await.unwrap_err();

    assert!(matches!(error, SetupError::Cask { .. }));
}

#[test]
fn test_run_summary_display() {
    let summary = RunSummary {
        bootstrap: Some(BootstrapOutcome::AlreadyInstalled),
        taps: 2,
        formulae: PackageTally { installed: 3, skipped: 4 },
        casks: PackageTally { installed: 1, skipped: 0 },
        dotfiles: DotfileTally { copied: 2, skipped: 1 },
    };

    assert_eq!(
        summary.to_string(),
        "2 taps, 3 formulae installed (4 skipped), 1 casks installed (0 skipped), \
         2 dotfiles copied (1 skipped)"
    );
}

#[test]
fn test_install_outcome_skip_classification() {
    assert!(InstallOutcome::AlreadyInstalled.is_skip());
    assert!(InstallOutcome::PresentOutsideBrew.is_skip());
    assert!(!InstallOutcome::Installed.is_skip());
}
