//! HTTP backend abstraction for the Azure Speech REST API.
//!
//! The production implementation uses reqwest. Voice-list requests are
//! retried with exponential backoff on transient errors; synthesis requests
//! are sent exactly once because the orchestrator owns failure policy.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::config::AzureClientConfig;
use crate::error::{AzureError, AzureResult};
use crate::models::VoiceDto;

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const OUTPUT_FORMAT_HEADER: &str = "X-Microsoft-OutputFormat";
const SSML_CONTENT_TYPE: &str = "application/ssml+xml";

/// Longest error body kept in an [`AzureError::ApiRequestFailed`].
const MAX_ERROR_BODY_CHARS: usize = 512;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// The two REST calls the client needs.
///
/// This is an implementation detail - external code should use the core
/// `SynthesisGateway` and `VoiceCatalog` ports.
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    /// POST markup and return the encoded audio body.
    async fn synthesize(
        &self,
        url: &Url,
        subscription_key: &str,
        output_format: &str,
        ssml: String,
    ) -> AzureResult<Vec<u8>>;

    /// GET the voice list.
    async fn list_voices(&self, url: &Url, subscription_key: &str) -> AzureResult<Vec<VoiceDto>>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay_ms: u64,
}

impl ReqwestBackend {
    pub fn new(config: &AzureClientConfig) -> AzureResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            #[allow(clippy::cast_possible_truncation)] // Duration milliseconds won't exceed u64 in practice
            retry_base_delay_ms: config.retry_base_delay.as_millis() as u64,
        })
    }

    /// GET a URL with automatic retry for transient errors.
    async fn get_with_retry(
        &self,
        url: &Url,
        subscription_key: &str,
    ) -> AzureResult<reqwest::Response> {
        let mut last_error: Option<AzureError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_millis(
                    self.retry_base_delay_ms * 2u64.pow(u32::from(attempt) - 1),
                );
                tracing::debug!(attempt, ?delay, "Retrying voice list request");
                tokio::time::sleep(delay).await;
            }

            let request = self
                .client
                .get(url.as_str())
                .header(SUBSCRIPTION_KEY_HEADER, subscription_key);

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    let error = error_from_response(response).await;
                    // 5xx errors are retryable (server-side issues)
                    if status.is_server_error() && attempt < self.max_retries {
                        last_error = Some(error);
                        continue;
                    }
                    return Err(error);
                }
                Err(e) => {
                    // Network errors are retryable
                    if attempt < self.max_retries {
                        last_error = Some(e.into());
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(last_error.unwrap_or(AzureError::ApiRequestFailed {
            status: 0,
            body: "no response".to_string(),
        }))
    }
}

async fn error_from_response(response: reqwest::Response) -> AzureError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    AzureError::ApiRequestFailed {
        status,
        body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
    }
}

#[async_trait]
impl SpeechBackend for ReqwestBackend {
    async fn synthesize(
        &self,
        url: &Url,
        subscription_key: &str,
        output_format: &str,
        ssml: String,
    ) -> AzureResult<Vec<u8>> {
        let response = self
            .client
            .post(url.as_str())
            .header(SUBSCRIPTION_KEY_HEADER, subscription_key)
            .header(CONTENT_TYPE, SSML_CONTENT_TYPE)
            .header(OUTPUT_FORMAT_HEADER, output_format)
            .body(ssml)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(response.bytes().await?.to_vec())
    }

    async fn list_voices(&self, url: &Url, subscription_key: &str) -> AzureResult<Vec<VoiceDto>> {
        let response = self.get_with_retry(url, subscription_key).await?;
        Ok(response.json().await?)
    }
}


// ============================================================================
// Fake Backend for Testing
// ============================================================================
