use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "entrycheck")]
#[command(author, version, about = "Store round-trip verification tool")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file (overrides config and ENTRYCHECK_DATABASE)
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `run`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Insert a test entry, read all entries back, and report both
    Run,

    /// Print every stored test entry
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply pending schema migrations and print the schema version
    Migrate,

    /// Display version information
    Version,
}
