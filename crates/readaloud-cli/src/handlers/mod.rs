//! Command handlers.
//!
//! Handlers follow the same shape:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Read input, call into the pipeline crates, format output for the terminal
//! - Pipeline errors are converted into [`CliError`](crate::CliError) so
//!   `main` can pick the exit code

pub mod chunk;
pub mod config;
pub mod download;
pub mod languages;
pub mod read;
pub mod sanitize;
pub mod voices;

mod input;

pub use input::read_input;
