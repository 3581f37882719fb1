//! A stand-in `brew` executable for end-to-end tests
//!
//! The script keeps its state in plain text files next to itself, one name per line, so
//! tests can both arrange what is "installed" and check what was run afterwards.

use std::{
    fs,
    path::{Path, PathBuf},
};

const INVOCATIONS: &str = "invocations.log";
const INSTALLED: &str = "installed.txt";
const PRESENT_OUTSIDE: &str = "present-outside.txt";
const FAILING: &str = "failing.txt";
const FAILING_TAPS: &str = "failing-taps.txt";

/// Handle on a generated fake `brew` script and its state files
///
/// Behavior:
/// - `--version` and `tap` succeed (unless the tap was marked failing)
/// - `list --formula|--cask NAME` succeeds only for installed names
/// - `install [--cask] NAME` fails with Homebrew's "already an App at" message for names
///   marked present outside Homebrew, fails outright for names marked failing, and
///   otherwise records the name as installed
/// - every invocation is appended to a log, one line of arguments per call
#[derive(Debug, Clone)]
pub struct FakeBrew {
    dir: PathBuf,
}

impl FakeBrew {
    /// Write the script and empty state files into `dir`.
    #[must_use]
    pub fn install(dir: &Path) -> Self {
        let fake = Self {
            dir: dir.to_path_buf(),
        };
        for state in [INVOCATIONS, INSTALLED, PRESENT_OUTSIDE, FAILING, FAILING_TAPS] {
            fs::write(fake.dir.join(state), "").expect("create fake brew state");
        }

        let script = fake.executable();
        fs::write(&script, fake.script()).expect("write fake brew");
        make_executable(&script);
        fake
    }

    #[must_use]
    pub fn executable(&self) -> PathBuf {
        self.dir.join("brew")
    }

    /// Mark `names` as already installed.
    pub fn with_installed<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> &Self {
        self.append(INSTALLED, names)
    }

    /// Mark casks whose install should fail because the app already exists.
    pub fn with_present_outside<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> &Self {
        self.append(PRESENT_OUTSIDE, names)
    }

    /// Mark packages whose install should fail.
    pub fn with_failing<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> &Self {
        self.append(FAILING, names)
    }

    /// Mark taps that cannot be added.
    pub fn with_failing_taps<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> &Self {
        self.append(FAILING_TAPS, names)
    }

    /// Arguments of every call so far, oldest first.
    #[must_use]
    pub fn invocations(&self) -> Vec<String> {
        self.read_lines(INVOCATIONS)
    }

    /// Calls whose arguments start with `prefix`.
    #[must_use]
    pub fn invocations_starting_with(&self, prefix: &str) -> Vec<String> {
        self.invocations()
            .into_iter()
            .filter(|line| line.starts_with(prefix))
            .collect()
    }

    /// Everything the fake considers installed, in install order.
    #[must_use]
    pub fn installed(&self) -> Vec<String> {
        self.read_lines(INSTALLED)
    }

    fn append<'a>(&self, state: &str, names: impl IntoIterator<Item = &'a str>) -> &Self {
        let mut content = fs::read_to_string(self.dir.join(state)).unwrap_or_default();
        for name in names {
            content.push_str(name);
            content.push('\n');
        }
        fs::write(self.dir.join(state), content).expect("update fake brew state");
        self
    }

    fn read_lines(&self, state: &str) -> Vec<String> {
        fs::read_to_string(self.dir.join(state))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn state_path(&self, state: &str) -> String {
        self.dir.join(state).display().to_string()
    }

    fn script(&self) -> String {
        format!(
            r#"#!/bin/sh
LOG='{log}'
INSTALLED='{installed}'
PRESENT_OUTSIDE='{present}'
FAILING='{failing}'
FAILING_TAPS='{failing_taps}'

echo "$*" >> "$LOG"

has() {{
    grep -qxF -- "$1" "$2"
}}

case "$1" in
    --version)
        echo "Homebrew 4.4.0 (fake)"
        ;;
    tap)
        if has "$2" "$FAILING_TAPS"; then
            echo "Error: Invalid tap name '$2'" >&2
            exit 1
        fi
        echo "==> Tapping $2"
        ;;
    list)
        if has "$3" "$INSTALLED"; then
            echo "$3"
        else
            echo "Error: No such keg: $3" >&2
            exit 1
        fi
        ;;
    install)
        if [ "$2" = "--cask" ]; then name="$3"; else name="$2"; fi
        if has "$name" "$PRESENT_OUTSIDE"; then
            echo "==> Installing Cask $name"
            echo "Error: It seems there is already an App at '/Applications/$name.app'." >&2
            exit 1
        fi
        if has "$name" "$FAILING"; then
            echo "Error: No available formula or cask with the name \"$name\"." >&2
            exit 1
        fi
        echo "==> Installing $name"
        echo "$name" >> "$INSTALLED"
        ;;
    *)
        echo "fake brew: unexpected arguments: $*" >&2
        exit 2
        ;;
esac
"#,
            log = self.state_path(INVOCATIONS),
            installed = self.state_path(INSTALLED),
            present = self.state_path(PRESENT_OUTSIDE),
            failing = self.state_path(FAILING),
            failing_taps = self.state_path(FAILING_TAPS),
        )
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).expect("chmod fake brew");
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}
