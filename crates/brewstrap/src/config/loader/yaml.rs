use std::path::Path;

use tracing::debug;

use crate::{config::SetupConfig, fs::FileSystem};

use super::{ConfigLoadError, ConfigLoader};

pub struct Yaml<'a, F: FileSystem> {
    fs: &'a F,
}

impl<'a, F: FileSystem> Yaml<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }
}

impl<F: FileSystem> ConfigLoader for Yaml<'_, F> {
    fn load_config(&self, path: &Path) -> Result<SetupConfig, ConfigLoadError> {
        debug!(path = %path.display(), "loading setup file");

        let file_contents = self.fs.read_file(path)?;

        // An empty file declares nothing, same as `{}`.
        if file_contents.trim().is_empty() {
            return Ok(SetupConfig::default());
        }

        serde_yaml::from_str(&file_contents).map_err(|source| ConfigLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
