//! Error taxonomy shared by the pipeline crates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths::PathError;
use crate::ports::{CatalogError, PlaybackError, RepositoryError, SynthesisError};
use crate::settings::SettingsError;

const CREDENTIALS_HELP: &str = "Please enter a valid Azure subscription key and region. \
     Instructions: https://docs.microsoft.com/azure/cognitive-services/speech-service/";

/// Errors surfaced by read-aloud and download operations.
#[derive(Debug, Error)]
pub enum ReadAloudError {
    /// Subscription key or region is not configured.
    #[error("Azure credentials are missing")]
    CredentialsMissing,

    /// The speech service rejected a request or was unreachable.
    #[error("Failed to synthesize text: {0}")]
    SynthesisFailed(String),

    /// The player failed, usually because playback was superseded.
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    /// No voice is configured for the selected language, or the catalog is empty.
    #[error("No voices found")]
    NoVoicesConfigured,

    /// The voice catalog could not be fetched.
    #[error("Failed to fetch voices: {0}")]
    CatalogUnavailable(String),

    /// The requested encoding cannot be delivered as a single file.
    #[error("{0} clips cannot be joined into one file")]
    EncodingNotConcatenable(crate::domain::AudioEncoding),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReadAloudError {
    /// The message to show the user, or `None` for failures that are
    /// expected side effects of cancellation and only get logged.
    pub fn notice(&self) -> Option<UserNotice> {
        match self {
            Self::CredentialsMissing => Some(UserNotice::new(self.to_string(), CREDENTIALS_HELP)),
            Self::SynthesisFailed(detail) => {
                Some(UserNotice::new("Failed to synthesize text", detail.clone()))
            }
            Self::PlaybackFailed(_) => None,
            Self::NoVoicesConfigured => Some(UserNotice::new(
                "No voices found",
                "Check your credentials and region, then pick a voice for the selected language.",
            )),
            other => Some(UserNotice::new("Read aloud failed", other.to_string())),
        }
    }
}

impl From<SynthesisError> for ReadAloudError {
    fn from(err: SynthesisError) -> Self {
        match err {
            SynthesisError::CredentialsMissing => Self::CredentialsMissing,
            SynthesisError::Failed(detail) => Self::SynthesisFailed(detail),
        }
    }
}

impl From<PlaybackError> for ReadAloudError {
    fn from(err: PlaybackError) -> Self {
        Self::PlaybackFailed(err.to_string())
    }
}

impl From<CatalogError> for ReadAloudError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::CredentialsMissing => Self::NoVoicesConfigured,
            CatalogError::Unavailable(detail) => Self::CatalogUnavailable(detail),
        }
    }
}

/// A user-facing error message with a short title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserNotice {
    pub title: String,
    pub message: String,
}

impl UserNotice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesis_errors_map_onto_taxonomy() {
        assert!(matches!(
            ReadAloudError::from(SynthesisError::CredentialsMissing),
            ReadAloudError::CredentialsMissing
        ));
        let err = ReadAloudError::from(SynthesisError::Failed("HTTP 401".into()));
        assert!(matches!(err, ReadAloudError::SynthesisFailed(ref d) if d == "HTTP 401"));
    }

    #[test]
    fn credentials_notice_points_at_settings() {
        let notice = ReadAloudError::CredentialsMissing.notice().unwrap();
        assert_eq!(notice.title, "Azure credentials are missing");
        assert!(notice.message.contains("subscription key and region"));
    }

    #[test]
    fn synthesis_notice_carries_provider_detail() {
        let notice = ReadAloudError::SynthesisFailed("quota exceeded".into())
            .notice()
            .unwrap();
        assert_eq!(notice.title, "Failed to synthesize text");
        assert_eq!(notice.message, "quota exceeded");
    }

    #[test]
    fn playback_failures_are_not_surfaced() {
        let err = ReadAloudError::from(PlaybackError::Interrupted);
        assert!(err.notice().is_none());
    }

    #[test]
    fn catalog_without_credentials_means_no_voices() {
        assert!(matches!(
            ReadAloudError::from(CatalogError::CredentialsMissing),
            ReadAloudError::NoVoicesConfigured
        ));
    }
}
