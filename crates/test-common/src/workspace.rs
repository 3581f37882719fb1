//! Scratch directories laid out the way a real run expects them

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::fake_brew::FakeBrew;

/// A temporary machine: a working directory holding `config.yaml` and `dotfiles/`, a
/// separate home directory, and a [`FakeBrew`] to install things with.
///
/// Everything is removed when the workspace is dropped.
///
/// # Example
/// ```rust
/// let workspace = TestWorkspace::new();
/// workspace.write_config(SMALL_CONFIG);
/// workspace.write_dotfile(".zshrc", ZSHRC);
/// ```
pub struct TestWorkspace {
    root: TempDir,
    brew: FakeBrew,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    #[must_use]
    pub fn new() -> Self {
        let root = TempDir::new().expect("create temp dir");
        for dir in ["work/dotfiles", "home", "brew"] {
            fs::create_dir_all(root.path().join(dir)).expect("create workspace dir");
        }
        let brew = FakeBrew::install(&root.path().join("brew"));

        Self { root, brew }
    }

    /// The directory a run starts in.
    #[must_use]
    pub fn work_dir(&self) -> PathBuf {
        self.root.path().join("work")
    }

    #[must_use]
    pub fn home_dir(&self) -> PathBuf {
        self.root.path().join("home")
    }

    #[must_use]
    pub fn dotfiles_dir(&self) -> PathBuf {
        self.work_dir().join("dotfiles")
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.work_dir().join("config.yaml")
    }

    #[must_use]
    pub fn brew(&self) -> &FakeBrew {
        &self.brew
    }

    /// Write `config.yaml` into the working directory.
    pub fn write_config(&self, yaml: &str) -> PathBuf {
        let path = self.config_path();
        fs::write(&path, yaml).expect("write config");
        path
    }

    /// Write a dotfile source under `dotfiles/`.
    pub fn write_dotfile(&self, name: &str, content: &str) -> PathBuf {
        write_creating_parents(&self.dotfiles_dir().join(name), content)
    }

    /// Write a file directly into the home directory.
    pub fn write_home_file(&self, name: &str, content: &str) -> PathBuf {
        write_creating_parents(&self.home_dir().join(name), content)
    }

    /// Contents of `name` in the home directory, if it exists.
    #[must_use]
    pub fn home_file(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.home_dir().join(name)).ok()
    }
}

fn write_creating_parents(path: &Path, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, content).expect("write file");
    path.to_path_buf()
}
