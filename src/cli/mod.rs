pub mod completions;
pub mod convert;
pub mod init;
pub mod stats;
pub mod validate;

use clap::{ArgAction, Parser, Subcommand};

/// map2tscn - Convert brush/mesh map files into Cyclops Level Builder scenes
#[derive(Parser, Debug)]
#[command(name = "map2tscn")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default log filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert map files into .tscn scenes
    Convert(convert::ConvertArgs),

    /// Parse and check map files without writing scenes
    Validate(validate::ValidateArgs),

    /// Print per-brush geometry counts for a map file
    Stats(stats::StatsArgs),

    /// Initialize a project (generates map2tscn.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
