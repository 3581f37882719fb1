//! Shared fixtures for the setup step tests

use mockall::predicate::{always, eq};

use crate::{
    commands::{CommandOutput, runner::MockCommandRunner},
    fs::filesystem::MockFileSystem,
    progress_reporter::recording::RecordingReporter,
};

use super::{Brew, PackageKind, SetupService};

pub(crate) type TestService = SetupService<MockCommandRunner, MockFileSystem, RecordingReporter>;

pub(crate) fn service(runner: MockCommandRunner, fs: MockFileSystem) -> TestService {
    SetupService::new(runner, fs, RecordingReporter::new(), Brew::default()).with_echo_output(false)
}

pub(crate) fn ok(stdout: &str) -> CommandOutput {
    CommandOutput::from_exit_code(0, stdout, "")
}

pub(crate) fn failed(exit_code: i32, stderr: &str) -> CommandOutput {
    CommandOutput::from_exit_code(exit_code, "", stderr)
}

impl MockCommandRunner {
    /// Expect `command` to be executed (captured) exactly once.
    pub(crate) fn mock_execute(&mut self, command: &str, output: CommandOutput) {
        self.expect_execute()
            .with(eq(command.to_string()))
            .times(1)
            .returning(move |_| Ok(output.clone()));
    }

    /// Expect `command` to be executed (streamed) exactly once.
    pub(crate) fn mock_execute_streaming(&mut self, command: &str, output: CommandOutput) {
        self.expect_execute_streaming()
            .with(eq(command.to_string()), always())
            .times(1)
            .returning(move |_, _| Ok(output.clone()));
    }

    /// Expect the installed-state query for `name` and answer it.
    pub(crate) fn mock_installed(&mut self, kind: PackageKind, name: &str, installed: bool) {
        let output = if installed {
            CommandOutput::from_exit_code(0, name, "")
        } else {
            CommandOutput::from_exit_code(1, "", &format!("Error: No such keg: {name}"))
        };
        self.mock_execute(&Brew::default().list(kind, name), output);
    }

    /// Expect that `command` is never executed, in either mode.
    pub(crate) fn forbid(&mut self, command: &str) {
        self.expect_execute()
            .with(eq(command.to_string()))
            .never();
        self.expect_execute_streaming()
            .with(eq(command.to_string()), always())
            .never();
    }
}
