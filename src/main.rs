mod cli;
mod commands;
mod config;
mod function;
mod intent;
mod naming;
mod paths;
mod resource;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use config::FunctionConfig;
use std::io;
use std::path::PathBuf;

/// Global context for the application
pub struct Context {
    pub quiet: bool,
    pub config_path: PathBuf,
    pub config: FunctionConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();

    if let Command::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "compose-bucket", &mut io::stdout());
        return Ok(());
    }

    let config_path = paths::config_file(cli.config.as_deref())?;
    let config = FunctionConfig::load(&config_path)?;

    let ctx = Context {
        quiet: cli.quiet,
        config_path,
        config,
    };

    match cli.command {
        Command::Run(args) => commands::run::run(&ctx, args),
        Command::Render(args) => commands::render::run(&ctx, args),
        Command::Config(cmd) => commands::config::run(&ctx, cmd),
        Command::Completions { .. } => Ok(()),
    }
}
