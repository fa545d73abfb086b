//! Download command handler.

use std::path::{Path, PathBuf};

use anyhow::Result;
use readaloud_playback::{Command, CommandOutcome, Download};

use super::read_input;
use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Synthesize the whole input and save it as one file.
pub async fn execute(ctx: &CliContext, file: Option<&Path>, output: Option<PathBuf>) -> Result<()> {
    let text = read_input(file).await?;
    let settings = ctx.settings().await?;

    let (handler, _events) = ctx.command_handler(settings);
    let outcome = handler
        .dispatch(Command::Download, &text)
        .await
        .map_err(CliError::from)?;

    let CommandOutcome::Downloaded(download) = outcome else {
        return Err(CliError::Core(format!("Unexpected outcome for download: {outcome:?}")).into());
    };

    let path = save(&download, output).await?;
    println!(
        "✓ Saved {} ({} bytes, {})",
        path.display(),
        download.clip.bytes.len(),
        download.clip.encoding
    );
    Ok(())
}

async fn save(download: &Download, output: Option<PathBuf>) -> Result<PathBuf, CliError> {
    let path = output.unwrap_or_else(|| PathBuf::from(&download.file_name));
    tokio::fs::write(&path, &download.clip.bytes)
        .await
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), "Download saved");
    Ok(path)
}
