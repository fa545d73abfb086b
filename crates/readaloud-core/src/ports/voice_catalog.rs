//! Voice catalog port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Credentials, Voice};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Speech service credentials are missing")]
    CredentialsMissing,

    #[error("Voice catalog unavailable: {0}")]
    Unavailable(String),
}

/// Lists the voices a speech service offers.
#[async_trait]
pub trait VoiceCatalog: Send + Sync {
    async fn list_voices(&self, credentials: &Credentials) -> Result<Vec<Voice>, CatalogError>;
}
