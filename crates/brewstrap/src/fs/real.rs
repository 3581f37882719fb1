// Real file system adapter implementation

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use super::filesystem::{FileSystem, FileSystemError};

/// Real file system implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_file(&self, path: &Path) -> Result<String, FileSystemError> {
        fs::read_to_string(path).map_err(|e| FileSystemError::io(path, e))
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, FileSystemError> {
        fs::read(path).map_err(|e| FileSystemError::io(path, e))
    }

    fn write_file(&self, path: &Path, data: &[u8], mode: u32) -> Result<(), FileSystemError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| FileSystemError::io(parent, e))?;
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(mode);
        }
        #[cfg(not(unix))]
        let _ = mode;

        let mut file = options
            .open(path)
            .map_err(|e| FileSystemError::io(path, e))?;
        file.write_all(data)
            .map_err(|e| FileSystemError::io(path, e))
    }

    fn expand_path(&self, path: &Path) -> Result<PathBuf, FileSystemError> {
        let binding = path.to_string_lossy();
        let expanded = shellexpand::tilde_with_context(&binding, || {
            etcetera::home_dir()
                .ok()
                .map(|home| home.to_string_lossy().into_owned())
        });

        let wants_home = binding == "~" || binding.starts_with("~/");
        if wants_home && expanded.starts_with('~') {
            return Err(FileSystemError::HomeDirNotFound);
        }

        Ok(PathBuf::from(expanded.as_ref()))
    }

    fn current_dir(&self) -> Result<PathBuf, FileSystemError> {
        std::env::current_dir().map_err(|e| FileSystemError::io(Path::new("."), e))
    }

    fn home_dir(&self) -> Result<PathBuf, FileSystemError> {
        etcetera::home_dir().map_err(|_| FileSystemError::HomeDirNotFound)
    }
}
