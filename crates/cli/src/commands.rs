pub(crate) mod apply;
pub(crate) mod config;

use std::path::Path;

use brewstrap::{
    commands::CommandRunner, fs::FileSystem, progress_reporter::ProgressReporter,
    setup::SetupService,
};
use tracing::debug;

use crate::cli::{ClapCommands, ConfigSubcommands};

/// Primary command dispatcher that routes to the appropriate command handler
pub(crate) async fn dispatch_command<CR, FS, R>(
    command: Option<&ClapCommands>,
    service: &SetupService<CR, FS, R>,
    config_path: &Path,
) -> i32
where
    CR: CommandRunner,
    FS: FileSystem,
    R: ProgressReporter,
{
    debug!("Dispatching command: {:?}", command);

    match command {
        None | Some(ClapCommands::Apply) => apply::handle_apply(service, config_path).await,
        Some(ClapCommands::Config(config_cmd)) => match config_cmd.command {
            ConfigSubcommands::Show => config::handle_show(service, config_path),
            ConfigSubcommands::Validate => config::handle_validate(service, config_path),
        },
    }
}
