//! A real file system with pinned working and home directories

use std::path::{Path, PathBuf};

use brewstrap::fs::{FileSystem, FileSystemError, real::RealFileSystem};

/// [`RealFileSystem`] for everything except where "here" and "home" are.
///
/// Tests run in parallel inside one process, so changing the process's working directory
/// or `HOME` is not an option.
#[derive(Debug, Clone)]
pub struct RootedFileSystem {
    inner: RealFileSystem,
    current_dir: PathBuf,
    home_dir: PathBuf,
}

impl RootedFileSystem {
    #[must_use]
    pub fn new(current_dir: impl Into<PathBuf>, home_dir: impl Into<PathBuf>) -> Self {
        Self {
            inner: RealFileSystem,
            current_dir: current_dir.into(),
            home_dir: home_dir.into(),
        }
    }
}

impl FileSystem for RootedFileSystem {
    fn read_file(&self, path: &Path) -> Result<String, FileSystemError> {
        self.inner.read_file(path)
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, FileSystemError> {
        self.inner.read_bytes(path)
    }

    fn write_file(&self, path: &Path, data: &[u8], mode: u32) -> Result<(), FileSystemError> {
        self.inner.write_file(path, data, mode)
    }

    fn expand_path(&self, path: &Path) -> Result<PathBuf, FileSystemError> {
        match path.strip_prefix("~") {
            Ok(rest) => Ok(self.home_dir.join(rest)),
            Err(_) => Ok(path.to_path_buf()),
        }
    }

    fn current_dir(&self) -> Result<PathBuf, FileSystemError> {
        Ok(self.current_dir.clone())
    }

    fn home_dir(&self) -> Result<PathBuf, FileSystemError> {
        Ok(self.home_dir.clone())
    }
}
