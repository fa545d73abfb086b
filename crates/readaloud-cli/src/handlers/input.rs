//! Text input from a file or stdin.

use std::path::Path;

use tokio::io::AsyncReadExt;

use crate::error::CliError;

/// Read all of `file`, or stdin when `file` is `None`.
///
/// Whitespace-only input is rejected.
pub async fn read_input(file: Option<&Path>) -> Result<String, CliError> {
    let text = match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?,
        None => {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            text
        }
    };

    if text.trim().is_empty() {
        return Err(CliError::Arguments("No text to read".into()));
    }
    Ok(text)
}
