use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "compose-bucket")]
#[command(version)]
#[command(about = "Compose a storage bucket into resource group, account and container", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (default: ~/.config/compose-bucket/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the function on a request, writing the response to stdout
    Run(RunArgs),

    /// Compose a bucket from local documents and show the result
    Render(RenderArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct RunArgs {
    /// Request file (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Pretty-print the response
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args)]
pub struct RenderArgs {
    /// Composite resource (XStorageBucket) document, JSON
    #[arg(long, value_name = "FILE")]
    pub composite: PathBuf,

    /// Observed composed resources, a JSON object keyed by logical key
    #[arg(long, value_name = "FILE")]
    pub observed: Option<PathBuf>,

    /// Request tag to echo back
    #[arg(long, default_value = "")]
    pub tag: String,

    /// Print the raw response instead of a summary
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// Config Commands
// ============================================================================

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Print the config file path
    Path,
}
