//! Command lines for the `brew` CLI

use std::{borrow::Cow, fmt};

use shell_escape::escape;

/// The official Homebrew install script.
pub const HOMEBREW_INSTALLER_URL: &str =
    "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    Formula,
    Cask,
}

impl PackageKind {
    fn list_flag(self) -> &'static str {
        match self {
            Self::Formula => "--formula",
            Self::Cask => "--cask",
        }
    }
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Formula => f.write_str("formula"),
            Self::Cask => f.write_str("cask"),
        }
    }
}

/// Builds shell command lines for one `brew` executable
///
/// Every user supplied value is shell-quoted, so a tap or package name can never turn into
/// a second command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brew {
    executable: String,
}

impl Default for Brew {
    fn default() -> Self {
        Self::new("brew")
    }
}

impl Brew {
    #[must_use]
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    #[must_use]
    pub fn executable(&self) -> &str {
        &self.executable
    }

    #[must_use]
    pub fn version(&self) -> String {
        format!("{} --version", self.exe())
    }

    #[must_use]
    pub fn tap(&self, tap: &str) -> String {
        format!("{} tap {}", self.exe(), quote(tap))
    }

    #[must_use]
    pub fn list(&self, kind: PackageKind, name: &str) -> String {
        format!("{} list {} {}", self.exe(), kind.list_flag(), quote(name))
    }

    #[must_use]
    pub fn install(&self, kind: PackageKind, name: &str) -> String {
        match kind {
            PackageKind::Formula => format!("{} install {}", self.exe(), quote(name)),
            PackageKind::Cask => format!("{} install --cask {}", self.exe(), quote(name)),
        }
    }

    /// Download the official installer and pipe it into bash.
    #[must_use]
    pub fn installer(&self) -> String {
        format!("curl -fsSL {HOMEBREW_INSTALLER_URL} | bash")
    }

    fn exe(&self) -> Cow<'_, str> {
        quote(&self.executable)
    }
}

fn quote(value: &str) -> Cow<'_, str> {
    escape(Cow::Borrowed(value))
}
