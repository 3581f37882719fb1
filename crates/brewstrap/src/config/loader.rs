pub mod yaml;

pub use self::yaml::Yaml;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{config::SetupConfig, fs::FileSystemError};

/// Where the setup file is looked for when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Port for loading the setup file from disk
///
pub trait ConfigLoader: Send + Sync {
    /// Read and parse the setup file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigLoadError`] if the file cannot be read or does not describe a
    /// [`SetupConfig`]. No partially parsed configuration is ever returned.
    fn load_config(&self, path: &Path) -> Result<SetupConfig, ConfigLoadError>;
}

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error(transparent)]
    FileSystemError(#[from] FileSystemError),

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
