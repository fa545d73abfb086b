//! Synthesis request parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::audio::AudioEncoding;
use super::markup::Chunk;

/// Speech service credentials.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub subscription_key: String,
    pub region: String,
}

impl Credentials {
    pub fn new(subscription_key: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            subscription_key: subscription_key.into(),
            region: region.into(),
        }
    }

    /// Both the key and the region are present.
    pub fn is_complete(&self) -> bool {
        !self.subscription_key.trim().is_empty() && !self.region.trim().is_empty()
    }
}

// Never print the key.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("subscription_key", &redact(&self.subscription_key))
            .field("region", &self.region)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "<empty>" } else { "<redacted>" }
}

/// Relative prosody adjustments applied on top of the voice's defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prosody {
    /// Speaking rate multiplier, `1.0` is normal speed.
    pub speed: f32,
    /// Pitch shift in percent.
    pub pitch: f32,
    /// Volume gain in decibels.
    pub volume_gain_db: f32,
}

impl Default for Prosody {
    fn default() -> Self {
        Self {
            speed: 1.0,
            pitch: 0.0,
            volume_gain_db: 0.0,
        }
    }
}

impl Prosody {
    pub fn is_neutral(&self) -> bool {
        self.attributes().is_empty()
    }

    /// `<prosody>` attributes for every non-neutral adjustment, in
    /// rate, pitch, volume order. Non-negative values carry an explicit `+`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn attributes(&self) -> Vec<String> {
        let mut attrs = Vec::new();

        if (self.speed - 1.0).abs() > f32::EPSILON {
            let rate = ((self.speed - 1.0) * 100.0).round() as i32;
            attrs.push(format!("rate=\"{}{rate}%\"", sign(rate >= 0)));
        }
        if self.pitch.abs() > f32::EPSILON {
            attrs.push(format!(
                "pitch=\"{}{}%\"",
                sign(self.pitch >= 0.0),
                self.pitch
            ));
        }
        if self.volume_gain_db.abs() > f32::EPSILON {
            attrs.push(format!(
                "volume=\"{}{}dB\"",
                sign(self.volume_gain_db >= 0.0),
                self.volume_gain_db
            ));
        }

        attrs
    }
}

const fn sign(non_negative: bool) -> &'static str {
    if non_negative { "+" } else { "" }
}

/// Everything about a synthesis call except the chunk itself.
///
/// One set of parameters is shared by every chunk of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisParams {
    pub voice: String,
    pub encoding: AudioEncoding,
    pub prosody: Prosody,
    pub credentials: Credentials,
}

/// One chunk plus the parameters to synthesize it with.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    chunk: Chunk,
    params: SynthesisParams,
}

impl SynthesisRequest {
    pub const fn new(chunk: Chunk, params: SynthesisParams) -> Self {
        Self { chunk, params }
    }

    pub const fn chunk(&self) -> &Chunk {
        &self.chunk
    }

    pub fn voice(&self) -> &str {
        &self.params.voice
    }

    pub const fn encoding(&self) -> AudioEncoding {
        self.params.encoding
    }

    pub const fn prosody(&self) -> &Prosody {
        &self.params.prosody
    }

    pub const fn credentials(&self) -> &Credentials {
        &self.params.credentials
    }
}
