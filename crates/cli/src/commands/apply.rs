use std::path::Path;

use brewstrap::{
    commands::CommandRunner, fs::FileSystem, progress_reporter::ProgressReporter,
    setup::SetupService,
};

pub(crate) async fn handle_apply<CR, FS, R>(
    service: &SetupService<CR, FS, R>,
    config_path: &Path,
) -> i32
where
    CR: CommandRunner,
    FS: FileSystem,
    R: ProgressReporter,
{
    match service.run(config_path).await {
        Ok(summary) => {
            service
                .reporter()
                .report_success(format!("Setup complete: {summary}"));
            0
        }
        Err(e) => {
            service.reporter().report_error(e);
            1
        }
    }
}
