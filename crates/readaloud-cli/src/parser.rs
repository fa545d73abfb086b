//! Root CLI parser and global options.

use clap::Parser;

use crate::commands::Commands;

/// Read text aloud with Azure neural voices.
#[derive(Parser)]
#[command(name = "readaloud")]
#[command(about = "Read text aloud or save it as audio using Azure Speech")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
