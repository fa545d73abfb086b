//! Settings domain types and validation.
//!
//! The field names serialize in camelCase so a settings file mirrors the
//! keys the browser extension kept in synced storage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{AudioEncoding, Credentials, Prosody};

/// Default per-request budget for the chunker, in bytes.
pub const DEFAULT_CHUNK_MAX_CHARS: usize = 5000;

/// Smallest chunk budget accepted; below this the markup wrapper dominates.
pub const MIN_CHUNK_MAX_CHARS: usize = 256;

pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_VOICE: &str = "en-US-JennyNeural";
pub const DEFAULT_REGION: &str = "eastus";
pub const DEFAULT_PLAYER_COMMAND: &str = "ffplay -nodisp -autoexit -loglevel quiet";

/// User settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Selected language, used to pick a voice from [`voices`](Self::voices).
    pub language: String,

    /// Speaking rate multiplier (0.25-4.0).
    pub speed: f32,

    /// Pitch shift in percent (-50 to 50).
    pub pitch: f32,

    /// Volume gain in dB (-40 to 16).
    pub volume_gain_db: f32,

    /// Chosen voice per language.
    pub voices: BTreeMap<String, String>,

    pub read_aloud_encoding: AudioEncoding,

    /// Encoding for downloads. Must support byte-level concatenation.
    pub download_encoding: AudioEncoding,

    pub subscription_key: String,

    pub region: String,

    /// `neural` or `standard`; filters the voice list.
    pub engine: String,

    pub audio_profile: String,

    /// Maximum chunk size in bytes.
    pub chunk_max_chars: usize,

    /// Command used to play audio files, the file path is appended.
    pub player_command: String,

    /// Voice name from the Google-era settings (e.g. `en-US-Wavenet-D`).
    #[serde(skip_serializing)]
    pub locale: Option<String>,

    /// Google-era API key; its presence triggers a credentials reset.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Settings {
    /// Create settings with the shipped defaults.
    pub fn with_defaults() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            speed: 1.0,
            pitch: 0.0,
            volume_gain_db: 0.0,
            voices: BTreeMap::from([(DEFAULT_LANGUAGE.to_string(), DEFAULT_VOICE.to_string())]),
            read_aloud_encoding: AudioEncoding::OggOpus,
            download_encoding: AudioEncoding::Mp3At64Kbps,
            subscription_key: String::new(),
            region: DEFAULT_REGION.to_string(),
            engine: "neural".to_string(),
            audio_profile: "default".to_string(),
            chunk_max_chars: DEFAULT_CHUNK_MAX_CHARS,
            player_command: DEFAULT_PLAYER_COMMAND.to_string(),
            locale: None,
            api_key: None,
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.subscription_key.clone(), self.region.clone())
    }

    /// The voice chosen for the selected language.
    pub fn voice_for_language(&self) -> Option<&str> {
        self.voices
            .get(&self.language)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Prosody from the stored settings, optionally overriding the speed.
    pub fn prosody(&self, speed_override: Option<f32>) -> Prosody {
        Prosody {
            speed: speed_override.unwrap_or(self.speed),
            pitch: self.pitch,
            volume_gain_db: self.volume_gain_db,
        }
    }

    /// Merge an update into these settings, only touching fields that are `Some`.
    ///
    /// `voice` is applied after `language`, so it sets the voice for the new
    /// language when both are given.
    pub fn merge(&mut self, other: &SettingsUpdate) {
        if let Some(ref language) = other.language {
            self.language.clone_from(language);
        }
        if let Some(voice) = other.voice.as_ref() {
            self.voices.insert(self.language.clone(), voice.clone());
        }
        if let Some(speed) = other.speed {
            self.speed = speed;
        }
        if let Some(pitch) = other.pitch {
            self.pitch = pitch;
        }
        if let Some(gain) = other.volume_gain_db {
            self.volume_gain_db = gain;
        }
        if let Some(encoding) = other.read_aloud_encoding {
            self.read_aloud_encoding = encoding;
        }
        if let Some(encoding) = other.download_encoding {
            self.download_encoding = encoding;
        }
        if let Some(ref key) = other.subscription_key {
            self.subscription_key.clone_from(key);
        }
        if let Some(ref region) = other.region {
            self.region.clone_from(region);
        }
        if let Some(ref engine) = other.engine {
            self.engine.clone_from(engine);
        }
        if let Some(max) = other.chunk_max_chars {
            self.chunk_max_chars = max;
        }
        if let Some(ref command) = other.player_command {
            self.player_command.clone_from(command);
        }
    }
}

/// Partial settings update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub language: Option<String>,
    /// Voice for the (possibly updated) selected language.
    pub voice: Option<String>,
    pub speed: Option<f32>,
    pub pitch: Option<f32>,
    pub volume_gain_db: Option<f32>,
    pub read_aloud_encoding: Option<AudioEncoding>,
    pub download_encoding: Option<AudioEncoding>,
    pub subscription_key: Option<String>,
    pub region: Option<String>,
    pub engine: Option<String>,
    pub chunk_max_chars: Option<usize>,
    pub player_command: Option<String>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("Speed must be between 0.25 and 4.0, got {0}")]
    InvalidSpeed(f32),

    #[error("Pitch must be between -50% and 50%, got {0}")]
    InvalidPitch(f32),

    #[error("Volume gain must be between -40 dB and 16 dB, got {0}")]
    InvalidVolumeGain(f32),

    #[error("Region cannot be empty")]
    EmptyRegion,

    #[error("Chunk size must be at least {MIN_CHUNK_MAX_CHARS} bytes, got {0}")]
    ChunkBudgetTooSmall(usize),

    #[error("Download encoding {0} cannot be concatenated into a single file")]
    UnsupportedDownloadEncoding(AudioEncoding),

    #[error("Engine must be 'neural' or 'standard', got '{0}'")]
    InvalidEngine(String),

    #[error("Player command cannot be empty")]
    EmptyPlayerCommand,
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if !(0.25..=4.0).contains(&settings.speed) {
        return Err(SettingsError::InvalidSpeed(settings.speed));
    }

    if !(-50.0..=50.0).contains(&settings.pitch) {
        return Err(SettingsError::InvalidPitch(settings.pitch));
    }

    if !(-40.0..=16.0).contains(&settings.volume_gain_db) {
        return Err(SettingsError::InvalidVolumeGain(settings.volume_gain_db));
    }

    if settings.region.trim().is_empty() {
        return Err(SettingsError::EmptyRegion);
    }

    if settings.chunk_max_chars < MIN_CHUNK_MAX_CHARS {
        return Err(SettingsError::ChunkBudgetTooSmall(settings.chunk_max_chars));
    }

    if !settings.download_encoding.supports_concatenation() {
        return Err(SettingsError::UnsupportedDownloadEncoding(
            settings.download_encoding,
        ));
    }

    if !matches!(settings.engine.as_str(), "neural" | "standard") {
        return Err(SettingsError::InvalidEngine(settings.engine.clone()));
    }

    if settings.player_command.trim().is_empty() {
        return Err(SettingsError::EmptyPlayerCommand);
    }

    Ok(())
}

/// Rewrite settings saved by older releases. Returns `true` if anything changed.
///
/// - An Ogg download encoding becomes `MP3_64_KBPS`; Ogg clips do not join.
/// - A Google-era `locale` voice becomes `language`, mapped to the default
///   neural voice, and the old pitch is dropped.
/// - A Google-era `apiKey` resets the Azure credentials.
pub fn migrate_legacy(settings: &mut Settings) -> bool {
    let mut changed = false;

    if !settings.download_encoding.supports_concatenation() {
        tracing::info!(
            from = %settings.download_encoding,
            "Migrating download encoding to MP3_64_KBPS"
        );
        settings.download_encoding = AudioEncoding::Mp3At64Kbps;
        changed = true;
    }

    if let Some(locale) = settings.locale.take() {
        let language = language_of_legacy_voice(&locale);
        tracing::info!(%locale, %language, "Migrating legacy voice setting");
        settings.voices = BTreeMap::from([(language.clone(), DEFAULT_VOICE.to_string())]);
        settings.language = language;
        // Google pitch was in semitones
        settings.pitch = 0.0;
        changed = true;
    }

    if settings.api_key.take().is_some() {
        tracing::info!("Resetting credentials from legacy API key");
        settings.subscription_key.clear();
        settings.region = DEFAULT_REGION.to_string();
        changed = true;
    }

    changed
}

/// `en-US-Wavenet-D` gives `en-US`.
fn language_of_legacy_voice(voice: &str) -> String {
    let mut parts = voice.split('-');
    match (parts.next(), parts.next()) {
        (Some(lang), Some(region)) if !lang.is_empty() && !region.is_empty() => {
            format!("{lang}-{region}")
        }
        _ => DEFAULT_LANGUAGE.to_string(),
    }
}
