use std::path::{Component, Path, PathBuf};

use tracing::{info, warn};

use crate::{
    commands::CommandRunner,
    fs::{FileSystem, filesystem::DOTFILE_MODE},
    progress_reporter::ProgressReporter,
};

use super::{DotfileTally, SetupError, SetupService};

/// Name of the source directory, relative to the working directory.
pub const DOTFILES_DIR: &str = "dotfiles";

impl<CR, FS, R> SetupService<CR, FS, R>
where
    CR: CommandRunner,
    FS: FileSystem,
    R: ProgressReporter,
{
    /// Copy each declared dotfile from `./dotfiles` into the home directory.
    ///
    /// Does nothing at all, not even a directory lookup, when `files` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Environment`] if the working or home directory cannot be
    /// determined, and whatever [`copy_dotfiles`](Self::copy_dotfiles) returns.
    pub fn ensure_dotfiles(&self, files: &[String]) -> Result<DotfileTally, SetupError> {
        if files.is_empty() {
            return Ok(DotfileTally::default());
        }

        let source_dir = self
            .fs
            .current_dir()
            .map_err(SetupError::Environment)?
            .join(DOTFILES_DIR);
        let home_dir = self.fs.home_dir().map_err(SetupError::Environment)?;

        self.reporter.report_info("Copying dotfiles...");
        self.copy_dotfiles(files, &source_dir, &home_dir)
    }

    /// Copy `source_dir/<name>` to `home_dir/<name>` for every name, in order.
    ///
    /// A source that cannot be read is reported and skipped. Destinations are created or
    /// overwritten with [`DOTFILE_MODE`].
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::DotfileWrite`] for the first destination that cannot be
    /// written; the remaining dotfiles are not copied.
    pub fn copy_dotfiles(
        &self,
        files: &[String],
        source_dir: &Path,
        home_dir: &Path,
    ) -> Result<DotfileTally, SetupError> {
        let mut tally = DotfileTally::default();

        for name in files {
            let relative = relative_name(name);
            let source = source_dir.join(&relative);
            let destination = home_dir.join(&relative);

            let data = match self.fs.read_bytes(&source) {
                Ok(data) => data,
                Err(error) => {
                    warn!(source = %source.display(), %error, "skipping unreadable dotfile");
                    self.reporter.report_skip(format!(
                        "unable to read {}, skipping ({error})",
                        source.display()
                    ));
                    tally.skipped += 1;
                    continue;
                }
            };

            self.fs
                .write_file(&destination, &data, DOTFILE_MODE)
                .map_err(|source| SetupError::DotfileWrite {
                    path: destination.clone(),
                    source,
                })?;

            info!(
                source = %source.display(),
                destination = %destination.display(),
                "copied dotfile"
            );
            self.reporter.report_success(format!(
                "copied {} -> {}",
                source.display(),
                destination.display()
            ));
            tally.copied += 1;
        }

        Ok(tally)
    }
}

/// `name` with any root or drive prefix dropped, so joining it can never leave the base
/// directory's tree through an absolute path.
fn relative_name(name: &str) -> PathBuf {
    Path::new(name)
        .components()
        .filter(|component| !matches!(component, Component::RootDir | Component::Prefix(_)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commands::runner::MockCommandRunner,
        fs::{FileSystemError, filesystem::MockFileSystem},
        progress_reporter::MessageType,
        setup::testing::service,
    };

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_empty_list_touches_nothing() {
        // No expectations: any file system call would panic.
        let service = service(MockCommandRunner::new(), MockFileSystem::new());

        let tally = service.ensure_dotfiles(&[]).unwrap();

        assert_eq!(tally, DotfileTally::default());
        assert!(service.reporter().lines().is_empty());
    }

    #[test]
    fn test_dotfiles_are_copied_from_working_directory_to_home() {
        let mut fs = MockFileSystem::new();
        fs.mock_dirs("/work/machine-setup", "/Users/me");
        fs.mock_read_bytes("/work/machine-setup/dotfiles/.zshrc", "export EDITOR=nvim\n");
        fs.mock_write_file("/Users/me/.zshrc", "export EDITOR=nvim\n");
        fs.mock_read_bytes("/work/machine-setup/dotfiles/.gitconfig", "[user]\n");
        fs.mock_write_file("/Users/me/.gitconfig", "[user]\n");

        let service = service(MockCommandRunner::new(), fs);

        let tally = service
            .ensure_dotfiles(&names(&[".zshrc", ".gitconfig"]))
            .unwrap();

        assert_eq!(tally, DotfileTally { copied: 2, skipped: 0 });
    }

    #[test]
    fn test_unreadable_source_is_skipped_and_copying_continues() {
        let mut fs = MockFileSystem::new();
        fs.mock_read_bytes_missing("/src/.missing");
        fs.mock_read_bytes("/src/.vimrc", "set number\n");
        fs.mock_write_file("/home/me/.vimrc", "set number\n");

        let service = service(MockCommandRunner::new(), fs);

        let tally = service
            .copy_dotfiles(
                &names(&[".missing", ".vimrc"]),
                Path::new("/src"),
                Path::new("/home/me"),
            )
            .unwrap();

        assert_eq!(tally, DotfileTally { copied: 1, skipped: 1 });
        assert!(service.reporter().contains(MessageType::Skip, "/src/.missing"));
    }

    #[test]
    fn test_write_failure_aborts_remaining_copies() {
        let mut fs = MockFileSystem::new();
        fs.mock_read_bytes("/src/.zshrc", "zsh");
        fs.expect_write_file()
            .withf(|p, _, _| p == Path::new("/home/me/.zshrc"))
            .times(1)
            .returning(|p, _, _| {
                Err(FileSystemError::io(
                    p,
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                ))
            });
        // `.bashrc` must never be read once the write above failed.

        let service = service(MockCommandRunner::new(), fs);

        let error = service
            .copy_dotfiles(
                &names(&[".zshrc", ".bashrc"]),
                Path::new("/src"),
                Path::new("/home/me"),
            )
            .unwrap_err();

        match error {
            SetupError::DotfileWrite { path, source } => {
                assert_eq!(path, PathBuf::from("/home/me/.zshrc"));
                assert_eq!(source.io_kind(), Some(std::io::ErrorKind::PermissionDenied));
            }
            other => panic!("Expected DotfileWrite error, got: {other:?}"),
        }
    }

    #[test]
    fn test_missing_home_directory_is_an_environment_error() {
        let mut fs = MockFileSystem::new();
        fs.expect_current_dir()
            .returning(|| Ok(PathBuf::from("/work")));
        fs.expect_home_dir()
            .returning(|| Err(FileSystemError::HomeDirNotFound));

        let service = service(MockCommandRunner::new(), fs);

        let error = service.ensure_dotfiles(&names(&[".zshrc"])).unwrap_err();

        assert!(matches!(
            error,
            SetupError::Environment(FileSystemError::HomeDirNotFound)
        ));
    }

    #[test]
    fn test_nested_names_keep_their_relative_path() {
        let mut fs = MockFileSystem::new();
        fs.mock_read_bytes("/src/.config/starship.toml", "add_newline = false\n");
        fs.mock_write_file("/home/me/.config/starship.toml", "add_newline = false\n");

        let service = service(MockCommandRunner::new(), fs);

        let tally = service
            .copy_dotfiles(
                &names(&[".config/starship.toml"]),
                Path::new("/src"),
                Path::new("/home/me"),
            )
            .unwrap();

        assert_eq!(tally.copied, 1);
    }

    #[test]
    fn test_absolute_names_stay_under_both_directories() {
        let mut fs = MockFileSystem::new();
        fs.mock_read_bytes("/src/etc/hosts.local", "127.0.0.1 dev\n");
        fs.mock_write_file("/home/me/etc/hosts.local", "127.0.0.1 dev\n");

        let service = service(MockCommandRunner::new(), fs);

        let tally = service
            .copy_dotfiles(
                &names(&["/etc/hosts.local"]),
                Path::new("/src"),
                Path::new("/home/me"),
            )
            .unwrap();

        assert_eq!(tally, DotfileTally { copied: 1, skipped: 0 });
        assert!(service.reporter().contains(
            MessageType::Success,
            "copied /src/etc/hosts.local -> /home/me/etc/hosts.local"
        ));
    }

    #[test]
    fn test_absolute_name_without_a_source_is_skipped() {
        let mut fs = MockFileSystem::new();
        fs.mock_read_bytes_missing("/src/tmp/secret");
        // No write expectation: touching `/tmp/secret` or anything else would panic.

        let service = service(MockCommandRunner::new(), fs);

        let tally = service
            .copy_dotfiles(
                &names(&["/tmp/secret"]),
                Path::new("/src"),
                Path::new("/home/me"),
            )
            .unwrap();

        assert_eq!(tally, DotfileTally { copied: 0, skipped: 1 });
    }

    #[test]
    fn test_relative_name_drops_the_root() {
        assert_eq!(relative_name("/tmp/x/secret"), PathBuf::from("tmp/x/secret"));
        assert_eq!(relative_name(".zshrc"), PathBuf::from(".zshrc"));
        assert_eq!(
            relative_name(".config/nvim/init.lua"),
            PathBuf::from(".config/nvim/init.lua")
        );
    }
}
