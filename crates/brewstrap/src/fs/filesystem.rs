//! File system abstraction layer
//!
//! Every file the bootstrap touches, from the setup file to each dotfile, goes through the
//! [`FileSystem`] port so the setup steps can be tested against a mock.

use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use thiserror::Error;

/// Permission bits given to every dotfile written into the home directory.
pub const DOTFILE_MODE: u32 = 0o644;

/// Port for file system operations
#[cfg_attr(test, mockall::automock)]
pub trait FileSystem: Send + Sync {
    /// Read a file and return its contents as a string
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError`] if the file does not exist, cannot be read, or is not
    /// valid UTF-8.
    fn read_file(&self, path: &Path) -> Result<String, FileSystemError>;

    /// Read a file and return its raw bytes
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError`] if the file does not exist or cannot be read.
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, FileSystemError>;

    /// Write data to a file
    ///
    /// Creates the file if it doesn't exist or truncates it if it does. Missing parent
    /// directories are created. `mode` is applied to newly created files on Unix; an
    /// existing file keeps its permissions.
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError`] if:
    /// - Permission is denied to write to the file or directory
    /// - The parent directory cannot be created
    /// - Any other IO error occurs during writing
    fn write_file(&self, path: &Path, data: &[u8], mode: u32) -> Result<(), FileSystemError>;

    /// Expand a leading `~` to the user's home directory
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError::HomeDirNotFound`] if the home directory is needed but
    /// cannot be determined.
    fn expand_path(&self, path: &Path) -> Result<PathBuf, FileSystemError>;

    /// The process's current working directory
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError`] if the working directory was removed or is inaccessible.
    fn current_dir(&self) -> Result<PathBuf, FileSystemError>;

    /// The current user's home directory
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError::HomeDirNotFound`] if it cannot be determined.
    fn home_dir(&self) -> Result<PathBuf, FileSystemError>;
}

/// Errors that can occur during file system operations
#[derive(Error, Debug, Clone)]
pub enum FileSystemError {
    /// General IO error occurred during file system operation
    #[error("IO error at {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },

    /// Home directory could not be determined
    #[error("Home directory not found")]
    HomeDirNotFound,
}

impl FileSystemError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::IoError {
            path: path.to_path_buf(),
            source: Arc::new(source),
        }
    }

    /// The underlying IO error kind, if this is an IO error.
    #[must_use]
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::IoError { source, .. } => Some(source.kind()),
            Self::HomeDirNotFound => None,
        }
    }
}

#[cfg(test)]
impl MockFileSystem {
    /// Set up a mock for reading a text file with specific content
    pub(crate) fn mock_read_file<P, S>(&mut self, path: P, content: S)
    where
        PathBuf: From<P>,
        S: ToString,
    {
        let path_buf = PathBuf::from(path);
        let content_string = content.to_string();
        self.expect_read_file()
            .with(mockall::predicate::eq(path_buf))
            .returning(move |_| Ok(content_string.clone()));
    }

    /// Set up a mock for reading a file's bytes
    pub(crate) fn mock_read_bytes<P, S>(&mut self, path: P, content: S)
    where
        PathBuf: From<P>,
        S: AsRef<[u8]>,
    {
        let path_buf = PathBuf::from(path);
        let content = content.as_ref().to_vec();
        self.expect_read_bytes()
            .with(mockall::predicate::eq(path_buf))
            .returning(move |_| Ok(content.clone()));
    }

    /// Make reading `path` fail with a "not found" IO error
    pub(crate) fn mock_read_bytes_missing<P>(&mut self, path: P)
    where
        PathBuf: From<P>,
    {
        let path_buf = PathBuf::from(path);
        self.expect_read_bytes()
            .with(mockall::predicate::eq(path_buf))
            .returning(|p| {
                Err(FileSystemError::io(
                    p,
                    io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
                ))
            });
    }

    /// Expect exactly one write of `content` to `path` with the dotfile mode
    pub(crate) fn mock_write_file<P, S>(&mut self, path: P, content: S)
    where
        PathBuf: From<P>,
        S: AsRef<[u8]>,
    {
        let path_buf = PathBuf::from(path);
        let content = content.as_ref().to_vec();
        self.expect_write_file()
            .withf(move |p, data, mode| p == path_buf && data == content && *mode == DOTFILE_MODE)
            .times(1)
            .returning(|_, _, _| Ok(()));
    }

    /// Set up the working directory and home directory lookups
    pub(crate) fn mock_dirs<P>(&mut self, current_dir: P, home_dir: P)
    where
        PathBuf: From<P>,
    {
        let current_dir = PathBuf::from(current_dir);
        let home_dir = PathBuf::from(home_dir);
        self.expect_current_dir()
            .returning(move || Ok(current_dir.clone()));
        self.expect_home_dir().returning(move || Ok(home_dir.clone()));
    }
}
