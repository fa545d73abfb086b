//! Sanitize command handler.

use std::path::Path;

use anyhow::Result;
use readaloud_text::sanitize;

use super::read_input;

/// Print the speakable markup for the input.
pub async fn execute(file: Option<&Path>) -> Result<()> {
    let text = read_input(file).await?;
    println!("{}", sanitize(&text).as_str());
    Ok(())
}
