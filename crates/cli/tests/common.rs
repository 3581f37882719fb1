use assert_cmd::Command;
use test_common::TestWorkspace;

// Helper function to get a command running inside the workspace, with the workspace's
// home directory and fake `brew`
#[must_use]
pub fn get_command_in_workspace(workspace: &TestWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("brewstrap").unwrap();
    cmd.current_dir(workspace.work_dir())
        .env("HOME", workspace.home_dir())
        .arg("--no-color")
        .arg("--brew")
        .arg(workspace.brew().executable());
    cmd
}
