//! Command-line adapter for readaloud.
//!
//! `main.rs` parses arguments and hands the composed [`CliContext`] to the
//! handlers. Everything else lives here so it can be tested.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tokio_test as _;

// Used by main.rs only
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod player;

pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, ConfigCommand};
pub use error::CliError;
pub use parser::Cli;
pub use player::CommandPlayer;
