//! Internal error types for Azure Speech operations.
//!
//! These errors are mapped to core port errors at the client boundary.

use thiserror::Error;

/// Result type alias for Azure Speech operations.
pub type AzureResult<T> = Result<T, AzureError>;

#[derive(Debug, Error)]
pub enum AzureError {
    /// The service answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    ApiRequestFailed {
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// The region is not a bare Azure region name such as `eastus`.
    #[error("Invalid Azure region '{0}'")]
    InvalidRegion(String),

    /// The service returned a successful response without audio.
    #[error("Speech service returned no audio")]
    EmptyAudio,

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_carries_status_and_body() {
        let error = AzureError::ApiRequestFailed {
            status: 401,
            body: "Access denied due to invalid subscription key".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.starts_with("HTTP 401"));
        assert!(msg.contains("invalid subscription key"));
    }

    #[test]
    fn invalid_region_names_the_region() {
        let error = AzureError::InvalidRegion("east us".to_string());
        assert!(error.to_string().contains("'east us'"));
    }
}
