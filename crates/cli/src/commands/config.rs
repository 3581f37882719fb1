use std::path::Path;

use brewstrap::{
    commands::CommandRunner, fs::FileSystem, progress_reporter::ProgressReporter,
    setup::SetupService,
};

pub(crate) fn handle_show<CR, FS, R>(service: &SetupService<CR, FS, R>, config_path: &Path) -> i32
where
    CR: CommandRunner,
    FS: FileSystem,
    R: ProgressReporter,
{
    let config = match service.load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            service.reporter().report_error(e);
            return 1;
        }
    };

    match config.to_yaml() {
        Ok(yaml) => {
            print!("{yaml}");
            0
        }
        Err(e) => {
            service
                .reporter()
                .report_error(format!("cannot serialize setup file: {e}"));
            1
        }
    }
}

pub(crate) fn handle_validate<CR, FS, R>(
    service: &SetupService<CR, FS, R>,
    config_path: &Path,
) -> i32
where
    CR: CommandRunner,
    FS: FileSystem,
    R: ProgressReporter,
{
    match service.load_config(config_path) {
        Ok(config) => {
            if config.is_empty() {
                service
                    .reporter()
                    .report_warning("Setup file declares nothing to do");
            }
            let brew = config.brew();
            service.reporter().report_success(format!(
                "Setup file is valid: {} taps, {} formulae in {} categories, \
                 {} casks in {} categories, {} dotfiles",
                brew.taps().len(),
                brew.formula_count(),
                brew.formulae().len(),
                brew.cask_count(),
                brew.casks().len(),
                config.dotfiles().len(),
            ));
            0
        }
        Err(e) => {
            service.reporter().report_error(e);
            1
        }
    }
}
