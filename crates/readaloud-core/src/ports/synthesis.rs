//! Speech synthesis port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{AudioClip, SynthesisRequest};

/// Why a chunk could not be synthesized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    /// Subscription key or region is empty. No request was sent.
    #[error("Speech service credentials are missing")]
    CredentialsMissing,

    /// The provider or the network rejected the request.
    #[error("Speech synthesis failed: {0}")]
    Failed(String),
}

/// Turns one chunk into encoded audio.
///
/// Implementations must not retry on their own; the orchestrator aborts the
/// session on the first failure.
#[async_trait]
pub trait SynthesisGateway: Send + Sync {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioClip, SynthesisError>;
}
