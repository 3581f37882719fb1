mod cli;
mod commands;

use std::{process, time::Duration};

use anyhow::Context;
use brewstrap::{
    commands::ShellCommandRunner,
    fs::{FileSystem, real::RealFileSystem},
    progress_reporter::terminal::TerminalProgressReporter,
    setup::{Brew, SetupService},
};
use clap::Parser;
use tracing::{Level, debug};

use crate::{cli::ClapCli, commands::dispatch_command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ClapCli::parse();
    init_tracing(&args);
    debug!("CLI arguments: {:#?}", &args);

    let fs = RealFileSystem;
    let config_path = fs
        .expand_path(&args.config)
        .with_context(|| format!("cannot expand {}", args.config.display()))?;

    let reporter = TerminalProgressReporter::new(!args.no_color);
    let runner = ShellCommandRunner::new("/bin/sh", args.timeout.map(Duration::from_secs));
    let service = SetupService::new(runner, fs, reporter, Brew::new(args.brew.as_str()));

    let exit_code = dispatch_command(args.command.as_ref(), &service, &config_path).await;

    process::exit(exit_code)
}

fn init_tracing(args: &ClapCli) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_ansi(!args.no_color)
        .init();
}
