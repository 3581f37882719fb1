//! Reading Homebrew's cask install failures
//!
//! `brew install --cask` fails when the app bundle already exists but was not installed by
//! Homebrew. The only signal for that is the human-readable error text, so the check below
//! is a substring match and will silently stop working if Homebrew rewords its messages.

/// Phrases Homebrew prints when the app is already on disk, lowercased.
const PRESENT_OUTSIDE_BREW_MARKERS: [&str; 2] = ["already an app at", "already installed"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaskFailure {
    /// The app exists outside Homebrew's tracking; safe to treat as done
    PresentOutsideBrew,
    /// Anything else
    Fatal,
}

/// Classify the combined output of a failed `brew install --cask`.
///
/// Matching ignores case: Homebrew prints "already an App at".
#[must_use]
pub fn classify_cask_failure(output: &str) -> CaskFailure {
    let output = output.to_lowercase();

    if PRESENT_OUTSIDE_BREW_MARKERS
        .iter()
        .any(|marker| output.contains(marker))
    {
        CaskFailure::PresentOutsideBrew
    } else {
        CaskFailure::Fatal
    }
}
