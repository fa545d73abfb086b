//! User commands and their handlers.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use readaloud_core::{
    AudioEncoding, Chunk, ReadAloudError, Settings, SynthesisGateway, SynthesisParams,
};
use readaloud_text::{Chunker, sanitize};
use thiserror::Error;

use crate::download::{Download, download};
use crate::orchestrator::{Orchestrator, SessionOutcome};

// ── Commands ───────────────────────────────────────────────────────

/// Speed preset for [`Command::ReadAloud`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadRate {
    /// Use the speed from settings.
    #[default]
    Default,
    X1,
    X1_5,
    X2,
}

impl ReadRate {
    pub const ALL: [Self; 4] = [Self::Default, Self::X1, Self::X1_5, Self::X2];

    /// Speed replacing the configured one, if any.
    pub const fn speed_override(self) -> Option<f32> {
        match self {
            Self::Default => None,
            Self::X1 => Some(1.0),
            Self::X1_5 => Some(1.5),
            Self::X2 => Some(2.0),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::X1 => "1x",
            Self::X1_5 => "1.5x",
            Self::X2 => "2x",
        }
    }
}

impl fmt::Display for ReadRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown read rate '{0}' (expected default, 1x, 1.5x or 2x)")]
pub struct ParseReadRateError(String);

impl FromStr for ReadRate {
    type Err = ParseReadRateError;

    /// Accepts `default`, `1x`, `1.5x` and `2x`; the `x` is optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let bare = normalized.strip_suffix('x').unwrap_or(&normalized);
        match bare {
            "default" => Ok(Self::Default),
            "1" => Ok(Self::X1),
            "1.5" => Ok(Self::X1_5),
            "2" => Ok(Self::X2),
            _ => Err(ParseReadRateError(s.to_string())),
        }
    }
}

/// Everything a user can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ReadAloud(ReadRate),
    Stop,
    Download,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadAloud(rate) => write!(f, "read-aloud ({rate})"),
            Self::Stop => f.write_str("stop"),
            Self::Download => f.write_str("download"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Session(SessionOutcome),
    Stopped,
    Downloaded(Download),
}

// ── Handler ────────────────────────────────────────────────────────

/// Routes each [`Command`] to its handler.
///
/// Read-aloud failures inside a session are reported through the
/// orchestrator's `Notice` event and come back as
/// [`SessionOutcome::Failed`]. Errors returned from
/// [`dispatch`](Self::dispatch) have not been reported to the user yet.
pub struct CommandHandler {
    orchestrator: Arc<Orchestrator>,
    gateway: Arc<dyn SynthesisGateway>,
    settings: Settings,
}

impl CommandHandler {
    pub fn new(
        orchestrator: Arc<Orchestrator>,
        gateway: Arc<dyn SynthesisGateway>,
        settings: Settings,
    ) -> Self {
        Self {
            orchestrator,
            gateway,
            settings,
        }
    }

    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Handle `command` for the selected raw text. `Stop` ignores the selection.
    pub async fn dispatch(
        &self,
        command: Command,
        selection: &str,
    ) -> Result<CommandOutcome, ReadAloudError> {
        tracing::info!(%command, selection_len = selection.len(), "Handling command");
        match command {
            Command::ReadAloud(rate) => self.read_aloud(rate, selection).await,
            Command::Stop => self.stop().await,
            Command::Download => self.download(selection).await,
        }
    }

    async fn read_aloud(
        &self,
        rate: ReadRate,
        selection: &str,
    ) -> Result<CommandOutcome, ReadAloudError> {
        let params = self.params(self.settings.read_aloud_encoding, rate.speed_override())?;
        let chunks = self.prepare(selection);

        let outcome = match self.orchestrator.play(chunks, params).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!(error = %e, "Read aloud failed, already reported");
                SessionOutcome::Failed
            }
        };
        Ok(CommandOutcome::Session(outcome))
    }

    async fn stop(&self) -> Result<CommandOutcome, ReadAloudError> {
        self.orchestrator.cancel().await;
        Ok(CommandOutcome::Stopped)
    }

    async fn download(&self, selection: &str) -> Result<CommandOutcome, ReadAloudError> {
        let params = self.params(self.settings.download_encoding, None)?;
        let chunks = self.prepare(selection);
        download(self.gateway.as_ref(), chunks, &params)
            .await
            .map(CommandOutcome::Downloaded)
    }

    fn prepare(&self, selection: &str) -> Vec<Chunk> {
        let markup = sanitize(selection);
        let chunks = Chunker::new(self.settings.chunk_max_chars).chunk(&markup);
        tracing::debug!(chunks = chunks.len(), "Prepared selection");
        chunks
    }

    fn params(
        &self,
        encoding: AudioEncoding,
        speed_override: Option<f32>,
    ) -> Result<SynthesisParams, ReadAloudError> {
        let voice = self
            .settings
            .voice_for_language()
            .ok_or(ReadAloudError::NoVoicesConfigured)?;

        Ok(SynthesisParams {
            voice: voice.to_string(),
            encoding,
            prosody: self.settings.prosody(speed_override),
            credentials: self.settings.credentials(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rates() {
        assert_eq!("default".parse(), Ok(ReadRate::Default));
        assert_eq!("1x".parse(), Ok(ReadRate::X1));
        assert_eq!("1.5X".parse(), Ok(ReadRate::X1_5));
        assert_eq!(" 2 ".parse(), Ok(ReadRate::X2));
        assert!("3x".parse::<ReadRate>().is_err());
    }

    #[test]
    fn rates_round_trip_through_display() {
        for rate in ReadRate::ALL {
            assert_eq!(rate.to_string().parse(), Ok(rate));
        }
    }

    #[test]
    fn only_presets_override_speed() {
        assert_eq!(ReadRate::Default.speed_override(), None);
        assert_eq!(ReadRate::X1_5.speed_override(), Some(1.5));
    }
}
