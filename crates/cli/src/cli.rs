use std::path::PathBuf;

use brewstrap::config::DEFAULT_CONFIG_FILE;
use clap::{Args, Parser, Subcommand};

/// Brewstrap - bootstrap a Mac from a single YAML setup file
///
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct ClapCli {
    /// Path to the setup file
    ///
    #[clap(long, short = 'c', global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub(crate) config: PathBuf,

    /// The `brew` executable to run
    ///
    #[clap(long, global = true, default_value = "brew")]
    pub(crate) brew: String,

    /// Give up on any single command after this many seconds
    ///
    #[clap(long, global = true)]
    pub(crate) timeout: Option<u64>,

    /// Show detailed output
    ///
    #[clap(long, short = 'v', global = true, default_value_t = false)]
    pub(crate) verbose: bool,

    /// Disable colored output
    ///
    #[clap(long, global = true, default_value_t = false)]
    pub(crate) no_color: bool,

    /// Subcommand to execute; `apply` when omitted
    ///
    #[clap(subcommand)]
    pub(crate) command: Option<ClapCommands>,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum ClapCommands {
    /// Install Homebrew if needed, then taps, formulae, casks and dotfiles
    ///
    Apply,

    /// Inspect the setup file without changing anything
    ///
    Config(ConfigCommands),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ConfigCommands {
    #[clap(subcommand)]
    pub(crate) command: ConfigSubcommands,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum ConfigSubcommands {
    /// Print the setup file as it was understood
    Show,

    /// Check that the setup file loads and summarize it
    Validate,
}
