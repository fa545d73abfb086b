//! Voice catalog entries.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoiceGender {
    Male,
    Female,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceType {
    #[default]
    Neural,
    Standard,
}

/// A voice offered by the speech service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voice {
    /// Full service name.
    pub name: String,
    /// Short name used in synthesis markup, e.g. `en-US-JennyNeural`.
    pub short_name: String,
    /// BCP-47 locale, e.g. `en-US`.
    pub locale: String,
    /// Display name in the voice's own language.
    pub local_name: String,
    pub gender: VoiceGender,
    pub voice_type: VoiceType,
    /// Speaking styles the voice supports, if any.
    #[serde(default)]
    pub style_list: Vec<String>,
}

/// Sorted, de-duplicated locales across a voice list.
pub fn distinct_locales(voices: &[Voice]) -> Vec<String> {
    let mut locales: Vec<String> = voices.iter().map(|v| v.locale.clone()).collect();
    locales.sort();
    locales.dedup();
    locales
}
