//! CLI error type and exit codes.

use readaloud_core::{PathError, ReadAloudError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Pipeline failure.
    #[error("{0}")]
    Core(String),

    /// Invalid or missing input.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Missing credentials, bad settings values.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Settings file could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Already shown to the user while the command ran.
    #[error("Command failed")]
    Reported,
}

impl CliError {
    /// Map error to exit code, following sysexits.h where one fits.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) | Self::Reported => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Storage(_) => 73,  // EX_CANTCREAT
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

impl From<ReadAloudError> for CliError {
    fn from(err: ReadAloudError) -> Self {
        match err {
            ReadAloudError::CredentialsMissing | ReadAloudError::NoVoicesConfigured => {
                let message = err
                    .notice()
                    .map_or_else(|| err.to_string(), |n| format!("{}. {}", n.title, n.message));
                Self::Config(message)
            }
            ReadAloudError::Settings(e) => Self::Config(e.to_string()),
            ReadAloudError::EncodingNotConcatenable(_) => Self::Config(err.to_string()),
            ReadAloudError::Path(e) => e.into(),
            ReadAloudError::Repository(e) => Self::Storage(e.to_string()),
            ReadAloudError::Io(e) => e.into(),
            other => Self::Core(other.to_string()),
        }
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
