//! Azure Speech client implementing the core synthesis and catalog ports.

use async_trait::async_trait;
use readaloud_core::{
    AudioClip, CatalogError, Credentials, SynthesisError, SynthesisGateway, SynthesisRequest,
    Voice, VoiceCatalog,
};
use url::Url;

use crate::config::AzureClientConfig;
use crate::error::{AzureError, AzureResult};
use crate::http::{ReqwestBackend, SpeechBackend};
use crate::models::output_format;
use crate::ssml::build_ssml;
use crate::url::{synthesis_url, voices_url};

// ============================================================================
// Type Aliases
// ============================================================================

/// Default Azure client using the reqwest HTTP backend.
pub type DefaultAzureClient = AzureSpeechClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the Azure Speech REST API, generic over its HTTP backend.
///
/// Use [`DefaultAzureClient`] in production code.
pub struct AzureSpeechClient<B: SpeechBackend> {
    backend: B,
    endpoint: Option<Url>,
}

impl DefaultAzureClient {
    pub fn new(config: &AzureClientConfig) -> AzureResult<Self> {
        let endpoint = config.endpoint.as_deref().map(Url::parse).transpose()?;
        Ok(Self {
            backend: ReqwestBackend::new(config)?,
            endpoint,
        })
    }
}

impl<B: SpeechBackend> AzureSpeechClient<B> {
    /// Create a new client with a custom backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(backend: B, endpoint: Option<Url>) -> Self {
        Self { backend, endpoint }
    }

    async fn fetch_audio(&self, request: &SynthesisRequest) -> AzureResult<Vec<u8>> {
        let credentials = request.credentials();
        let url = synthesis_url(self.endpoint.as_ref(), &credentials.region)?;
        let ssml = build_ssml(request);

        tracing::debug!(
            voice = request.voice(),
            encoding = %request.encoding(),
            ssml_len = ssml.len(),
            "Sending synthesis request"
        );

        let audio = self
            .backend
            .synthesize(
                &url,
                credentials.subscription_key.trim(),
                output_format(request.encoding()),
                ssml,
            )
            .await?;

        if audio.is_empty() {
            return Err(AzureError::EmptyAudio);
        }
        Ok(audio)
    }

    async fn fetch_voices(&self, credentials: &Credentials) -> AzureResult<Vec<Voice>> {
        let url = voices_url(self.endpoint.as_ref(), &credentials.region)?;
        let dtos = self
            .backend
            .list_voices(&url, credentials.subscription_key.trim())
            .await?;
        Ok(dtos.into_iter().map(Voice::from).collect())
    }
}

#[async_trait]
impl<B: SpeechBackend> SynthesisGateway for AzureSpeechClient<B> {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioClip, SynthesisError> {
        if !request.credentials().is_complete() {
            tracing::warn!("Azure credentials are missing, not sending synthesis request");
            return Err(SynthesisError::CredentialsMissing);
        }

        match self.fetch_audio(request).await {
            Ok(bytes) => {
                tracing::debug!(bytes = bytes.len(), "Synthesis succeeded");
                Ok(AudioClip::new(request.encoding(), bytes))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Azure synthesis failed");
                Err(SynthesisError::Failed(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl<B: SpeechBackend> VoiceCatalog for AzureSpeechClient<B> {
    async fn list_voices(&self, credentials: &Credentials) -> Result<Vec<Voice>, CatalogError> {
        if !credentials.is_complete() {
            tracing::warn!("Azure credentials not configured");
            return Err(CatalogError::CredentialsMissing);
        }

        self.fetch_voices(credentials).await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to fetch voices");
            CatalogError::Unavailable(e.to_string())
        })
    }
}
