//! Shared setup file contents used across test suites

/// A setup file that asks for nothing at all.
pub const EMPTY_CONFIG: &str = "brew: {}\ndotfiles: []\n";

/// One of everything, in a fixed order.
pub const SMALL_CONFIG: &str = r"
brew:
  taps:
    - homebrew/cask-fonts
  formulae:
    shell:
      - zsh
    dev:
      - jq
      - git
  casks:
    apps:
      - firefox
dotfiles:
  - .zshrc
";

/// Not YAML a loader can make sense of.
pub const MALFORMED_CONFIG: &str = "brew: [unclosed\n";

pub const ZSHRC: &str = "export EDITOR=vim\n";
