pub mod loader;

pub use self::loader::{ConfigLoadError, ConfigLoader, DEFAULT_CONFIG_FILE, Yaml as YamlLoader};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Package names grouped under a free-form category name, in declaration order.
pub type Categories = IndexMap<String, Vec<String>>;

/// Everything the setup file declares
///
/// Loaded once at startup and never mutated afterwards. Every section is optional; a
/// missing or empty section simply means that step has nothing to do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) brew: BrewConfig,

    /// File names relative to the `dotfiles` source directory and to the home directory
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) dotfiles: Vec<String>,
}

/// The Homebrew section of the setup file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrewConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) taps: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) formulae: Categories,

    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) casks: Categories,
}

// `formulae:` with nothing after it parses as null rather than as an empty mapping.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl SetupConfig {
    #[must_use]
    pub fn brew(&self) -> &BrewConfig {
        &self.brew
    }

    #[must_use]
    pub fn taps(&self) -> &[String] {
        &self.brew.taps
    }

    #[must_use]
    pub fn formulae(&self) -> &Categories {
        &self.brew.formulae
    }

    #[must_use]
    pub fn casks(&self) -> &Categories {
        &self.brew.casks
    }

    #[must_use]
    pub fn dotfiles(&self) -> &[String] {
        &self.dotfiles
    }

    /// True when no step has anything to do.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.brew.taps.is_empty()
            && self.brew.formulae.is_empty()
            && self.brew.casks.is_empty()
            && self.dotfiles.is_empty()
    }

    /// Serialize back to YAML, keeping every declared ordering.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_yaml::Error`]; in practice this cannot fail for a
    /// configuration made of strings, lists and string-keyed maps.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

impl BrewConfig {
    #[must_use]
    pub fn taps(&self) -> &[String] {
        &self.taps
    }

    #[must_use]
    pub fn formulae(&self) -> &Categories {
        &self.formulae
    }

    #[must_use]
    pub fn casks(&self) -> &Categories {
        &self.casks
    }

    /// Total number of formulae across every category.
    #[must_use]
    pub fn formula_count(&self) -> usize {
        self.formulae.values().map(Vec::len).sum()
    }

    /// Total number of casks across every category.
    #[must_use]
    pub fn cask_count(&self) -> usize {
        self.casks.values().map(Vec::len).sum()
    }
}

/// Builder pattern for `SetupConfig` testing
///
#[derive(Default, Debug)]
pub struct SetupConfigBuilder {
    config: SetupConfig,
}

impl SetupConfigBuilder {
    #[must_use]
    pub fn tap(mut self, tap: &str) -> Self {
        self.config.brew.taps.push(tap.to_string());
        self
    }

    /// Append `packages` to formula category `category`, creating it if needed.
    #[must_use]
    pub fn formulae<I, S>(mut self, category: &str, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .brew
            .formulae
            .entry(category.to_string())
            .or_default()
            .extend(packages.into_iter().map(Into::into));
        self
    }

    /// Append `packages` to cask category `category`, creating it if needed.
    #[must_use]
    pub fn casks<I, S>(mut self, category: &str, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .brew
            .casks
            .entry(category.to_string())
            .or_default()
            .extend(packages.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn dotfile(mut self, name: &str) -> Self {
        self.config.dotfiles.push(name.to_string());
        self
    }

    #[must_use]
    pub fn build(self) -> SetupConfig {
        self.config
    }
}
