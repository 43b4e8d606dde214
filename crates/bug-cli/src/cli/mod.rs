use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::{Commands, CreateArgs, EditArgs};

/// Top-level CLI parser for the `bugs` binary.
#[derive(Debug, Parser)]
#[command(name = "bugs", version, about = "Bug tracker client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// API server URL (defaults to client.server_url from config)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            server: self.server.clone(),
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}
