//! Voice catalog queries scoped to the user's settings.

use std::sync::Arc;

use crate::domain::{Voice, VoiceType, distinct_locales};
use crate::error::ReadAloudError;
use crate::ports::VoiceCatalog;
use crate::settings::Settings;

pub struct VoiceService {
    catalog: Arc<dyn VoiceCatalog>,
}

impl VoiceService {
    pub fn new(catalog: Arc<dyn VoiceCatalog>) -> Self {
        Self { catalog }
    }

    /// All voices available with the configured credentials.
    ///
    /// Missing credentials and an empty catalog both mean no voices.
    pub async fn voices(&self, settings: &Settings) -> Result<Vec<Voice>, ReadAloudError> {
        let credentials = settings.credentials();
        if !credentials.is_complete() {
            tracing::warn!("Speech credentials not configured");
            return Err(ReadAloudError::NoVoicesConfigured);
        }

        let voices = self.catalog.list_voices(&credentials).await?;
        if voices.is_empty() {
            return Err(ReadAloudError::NoVoicesConfigured);
        }

        tracing::debug!(count = voices.len(), "Fetched voices");
        Ok(voices)
    }

    /// Voices for one locale, filtered by the configured engine.
    pub async fn voices_for_locale(
        &self,
        settings: &Settings,
        locale: &str,
    ) -> Result<Vec<Voice>, ReadAloudError> {
        let voices = self.voices(settings).await?;
        Ok(voices
            .into_iter()
            .filter(|v| v.locale.eq_ignore_ascii_case(locale))
            .filter(|v| engine_matches(&settings.engine, v))
            .collect())
    }

    /// Distinct locales offered by the catalog.
    pub async fn languages(&self, settings: &Settings) -> Result<Vec<String>, ReadAloudError> {
        let voices = self.voices(settings).await?;
        Ok(distinct_locales(&voices))
    }
}

fn engine_matches(engine: &str, voice: &Voice) -> bool {
    let wanted = match engine {
        "standard" => VoiceType::Standard,
        _ => VoiceType::Neural,
    };
    voice.voice_type == wanted
}
