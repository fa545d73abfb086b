//! Audio output through an external player process.

use std::io::Write as _;
use std::process::Stdio;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use readaloud_core::{AudioPlayer, DataUri, PlaybackError};
use tokio::process::Command;
use tokio::sync::oneshot;

/// Plays each clip by writing it to a temporary file and running the
/// configured command with the file path appended.
///
/// `player_command` is split on whitespace, so arguments cannot contain
/// spaces.
pub struct CommandPlayer {
    program: Option<String>,
    args: Vec<String>,
    stop_tx: Mutex<Option<oneshot::Sender<()>>>,
}

impl CommandPlayer {
    pub fn new(command: &str) -> Self {
        let mut parts = command.split_whitespace().map(str::to_string);
        Self {
            program: parts.next(),
            args: parts.collect(),
            stop_tx: Mutex::new(None),
        }
    }

    fn stop_slot(&self) -> MutexGuard<'_, Option<oneshot::Sender<()>>> {
        self.stop_tx.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl AudioPlayer for CommandPlayer {
    async fn play(&self, uri: &str) -> Result<(), PlaybackError> {
        let program = self
            .program
            .as_deref()
            .ok_or_else(|| PlaybackError::Device("No player command configured".into()))?;
        let audio = DataUri::parse(uri).map_err(device)?;

        let mut file = tempfile::Builder::new()
            .prefix("readaloud-")
            .suffix(&format!(".{}", audio.subtype()))
            .tempfile()
            .map_err(device)?;
        file.write_all(&audio.bytes).map_err(device)?;
        file.flush().map_err(device)?;

        let (stop_tx, stop_rx) = oneshot::channel();
        *self.stop_slot() = Some(stop_tx);

        let mut child = Command::new(program)
            .args(&self.args)
            .arg(file.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| PlaybackError::Device(format!("Failed to start {program}: {e}")))?;
        tracing::debug!(program, bytes = audio.bytes.len(), "Player started");

        tokio::select! {
            status = child.wait() => {
                self.stop_slot().take();
                let status = status.map_err(device)?;
                if status.success() {
                    Ok(())
                } else {
                    Err(PlaybackError::Device(format!("{program} exited with {status}")))
                }
            }
            _ = stop_rx => {
                if let Err(e) = child.kill().await {
                    tracing::warn!(error = %e, "Failed to kill player");
                }
                Err(PlaybackError::Interrupted)
            }
        }
    }

    fn stop(&self) {
        if let Some(tx) = self.stop_slot().take() {
            let _ = tx.send(());
        }
    }
}

fn device(err: impl std::fmt::Display) -> PlaybackError {
    PlaybackError::Device(err.to_string())
}
