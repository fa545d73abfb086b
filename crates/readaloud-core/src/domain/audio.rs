//! Audio encodings and synthesized audio clips.

use std::fmt;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Output encoding requested from the speech service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AudioEncoding {
    /// MP3, 16 kHz mono at 32 kbit/s.
    #[serde(rename = "MP3")]
    Mp3,

    /// MP3, 16 kHz mono at 64 kbit/s.
    #[default]
    #[serde(rename = "MP3_64_KBPS")]
    Mp3At64Kbps,

    /// Opus in an Ogg container, 16 kHz mono.
    #[serde(rename = "OGG_OPUS")]
    OggOpus,
}

impl AudioEncoding {
    pub const ALL: [Self; 3] = [Self::Mp3, Self::Mp3At64Kbps, Self::OggOpus];

    /// Stable identifier used in settings files and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mp3 => "MP3",
            Self::Mp3At64Kbps => "MP3_64_KBPS",
            Self::OggOpus => "OGG_OPUS",
        }
    }

    pub const fn file_ext(self) -> &'static str {
        match self {
            Self::Mp3 | Self::Mp3At64Kbps => "mp3",
            Self::OggOpus => "ogg",
        }
    }

    /// Whether independently encoded clips can be joined by appending bytes.
    ///
    /// MP3 frames are self-delimiting. Each Ogg clip carries its own stream
    /// headers, so a byte-level join is not a valid single stream.
    pub const fn supports_concatenation(self) -> bool {
        match self {
            Self::Mp3 | Self::Mp3At64Kbps => true,
            Self::OggOpus => false,
        }
    }

    /// Parse an encoding name, falling back to the default for unknown names.
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|e: UnknownEncoding| {
            tracing::debug!(error = %e, "Falling back to default encoding");
            Self::default()
        })
    }
}

impl fmt::Display for AudioEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An encoding name that is not one of [`AudioEncoding::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown audio encoding '{0}' (expected MP3, MP3_64_KBPS or OGG_OPUS)")]
pub struct UnknownEncoding(pub String);

impl FromStr for AudioEncoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|e| e.as_str() == normalized)
            .ok_or_else(|| UnknownEncoding(s.to_string()))
    }
}

/// Encoded audio for one or more chunks.
#[derive(Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub encoding: AudioEncoding,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for AudioClip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioClip")
            .field("encoding", &self.encoding)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl AudioClip {
    pub const fn new(encoding: AudioEncoding, bytes: Vec<u8>) -> Self {
        Self { encoding, bytes }
    }

    /// Join clips in order by appending their bytes.
    pub fn concat(encoding: AudioEncoding, clips: impl IntoIterator<Item = Self>) -> Self {
        let bytes = clips.into_iter().flat_map(|clip| clip.bytes).collect();
        Self { encoding, bytes }
    }

    /// `data:audio/<ext>;base64,<payload>`
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:audio/{};base64,{}",
            self.encoding.file_ext(),
            BASE64.encode(&self.bytes)
        )
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Errors decoding a base64 data URI.
#[derive(Debug, Error)]
pub enum DataUriError {
    #[error("Not a data URI")]
    NotDataUri,

    #[error("Only base64 data URIs are supported")]
    NotBase64,

    #[error("Invalid base64 payload: {0}")]
    Payload(#[from] base64::DecodeError),
}

/// A decoded `data:<media type>;base64,<payload>` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl DataUri {
    pub fn parse(uri: &str) -> Result<Self, DataUriError> {
        let rest = uri.strip_prefix("data:").ok_or(DataUriError::NotDataUri)?;
        let (meta, payload) = rest.split_once(',').ok_or(DataUriError::NotDataUri)?;
        let media_type = meta.strip_suffix(";base64").ok_or(DataUriError::NotBase64)?;

        Ok(Self {
            media_type: media_type.to_string(),
            bytes: BASE64.decode(payload)?,
        })
    }

    /// The media subtype, usable as a file extension (`audio/ogg` gives `ogg`).
    pub fn subtype(&self) -> &str {
        self.media_type
            .split_once('/')
            .map_or(self.media_type.as_str(), |(_, sub)| sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_extensions() {
        assert_eq!(AudioEncoding::Mp3.file_ext(), "mp3");
        assert_eq!(AudioEncoding::Mp3At64Kbps.file_ext(), "mp3");
        assert_eq!(AudioEncoding::OggOpus.file_ext(), "ogg");
    }

    #[test]
    fn parses_names_leniently() {
        assert_eq!("mp3".parse::<AudioEncoding>().unwrap(), AudioEncoding::Mp3);
        assert_eq!(
            "ogg-opus".parse::<AudioEncoding>().unwrap(),
            AudioEncoding::OggOpus
        );
        assert!("wav".parse::<AudioEncoding>().is_err());
        assert_eq!(
            AudioEncoding::parse_or_default("wav"),
            AudioEncoding::Mp3At64Kbps
        );
    }

    #[test]
    fn serde_uses_storage_names() {
        let json = serde_json::to_string(&AudioEncoding::Mp3At64Kbps).unwrap();
        assert_eq!(json, "\"MP3_64_KBPS\"");
        let back: AudioEncoding = serde_json::from_str("\"OGG_OPUS\"").unwrap();
        assert_eq!(back, AudioEncoding::OggOpus);
    }

    #[test]
    fn concat_preserves_order() {
        let clips = vec![
            AudioClip::new(AudioEncoding::Mp3, vec![1, 2]),
            AudioClip::new(AudioEncoding::Mp3, vec![3]),
            AudioClip::new(AudioEncoding::Mp3, vec![4, 5]),
        ];
        let joined = AudioClip::concat(AudioEncoding::Mp3, clips);
        assert_eq!(joined.bytes, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn data_uri_round_trip() {
        let clip = AudioClip::new(AudioEncoding::OggOpus, b"OggS audio".to_vec());
        let uri = clip.to_data_uri();
        assert!(uri.starts_with("data:audio/ogg;base64,"));

        let decoded = DataUri::parse(&uri).unwrap();
        assert_eq!(decoded.media_type, "audio/ogg");
        assert_eq!(decoded.subtype(), "ogg");
        assert_eq!(decoded.bytes, b"OggS audio");
    }

    #[test]
    fn data_uri_rejects_non_base64() {
        assert!(matches!(
            DataUri::parse("data:text/plain,hello"),
            Err(DataUriError::NotBase64)
        ));
        assert!(matches!(
            DataUri::parse("https://example.com/a.mp3"),
            Err(DataUriError::NotDataUri)
        ));
    }
}
