//! Public configuration for the Azure Speech client.

use std::time::Duration;

/// Configuration for the Azure Speech client.
///
/// # Example
///
/// ```
/// use readaloud_azure::AzureClientConfig;
/// use std::time::Duration;
///
/// let config = AzureClientConfig::new()
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct AzureClientConfig {
    /// Base URL replacing `https://{region}.tts.speech.microsoft.com/`
    pub(crate) endpoint: Option<String>,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// Retry attempts for transient voice-list errors. Synthesis is never retried.
    pub(crate) max_retries: u8,
    /// Base delay for exponential backoff
    pub(crate) retry_base_delay: Duration,
}

impl Default for AzureClientConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            user_agent: concat!("readaloud/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

impl AzureClientConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Send requests to `url` instead of the regional endpoint, e.g. a
    /// container deployment or a local mock.
    #[must_use]
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Defaults to 3 retries.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Defaults to 500ms.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }
}
