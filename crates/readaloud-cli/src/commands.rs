//! Subcommands and their arguments.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use readaloud_core::{AudioEncoding, SettingsUpdate};
use readaloud_playback::ReadRate;

/// Available commands.
///
/// Commands that take text read it from `FILE`, or from stdin when no file
/// is given.
#[derive(Subcommand)]
pub enum Commands {
    /// Read text aloud through the configured player
    Read {
        /// Speed preset: default, 1x, 1.5x or 2x
        #[arg(long, default_value_t = ReadRate::Default)]
        rate: ReadRate,
        /// File to read (stdin if omitted)
        file: Option<PathBuf>,
    },

    /// Synthesize text into a single audio file
    Download {
        /// Output path (defaults to tts-download.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// File to read (stdin if omitted)
        file: Option<PathBuf>,
    },

    /// List available voices
    Voices {
        /// Only show voices for this locale (e.g. en-GB)
        #[arg(long)]
        locale: Option<String>,
    },

    /// List languages offered by the voice catalog
    Languages,

    /// Print the speakable markup produced for the input
    Sanitize {
        /// File to sanitize (stdin if omitted)
        file: Option<PathBuf>,
    },

    /// Print the chunks that would be sent for synthesis
    Chunk {
        /// File to chunk (stdin if omitted)
        file: Option<PathBuf>,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Settings management subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective settings
    Show,
    /// Update one or more settings
    Set(SetArgs),
    /// Print the settings file location
    Path,
}

/// Fields accepted by `config set`. Omitted flags keep their current value.
#[derive(Args, Debug, Default)]
pub struct SetArgs {
    /// Selected language (e.g. en-US)
    #[arg(long)]
    pub language: Option<String>,

    /// Voice for the selected language (e.g. en-US-JennyNeural)
    #[arg(long)]
    pub voice: Option<String>,

    /// Speaking rate multiplier (0.25 to 4.0)
    #[arg(long)]
    pub speed: Option<f32>,

    /// Pitch shift in percent (-50 to 50)
    #[arg(long, allow_negative_numbers = true)]
    pub pitch: Option<f32>,

    /// Volume gain in dB (-40 to 16)
    #[arg(long, allow_negative_numbers = true)]
    pub volume_gain_db: Option<f32>,

    /// Encoding for read aloud: MP3, MP3_64_KBPS or OGG_OPUS
    #[arg(long)]
    pub read_encoding: Option<AudioEncoding>,

    /// Encoding for downloads: MP3 or MP3_64_KBPS
    #[arg(long)]
    pub download_encoding: Option<AudioEncoding>,

    /// Azure Speech subscription key
    #[arg(long)]
    pub subscription_key: Option<String>,

    /// Azure region (e.g. eastus)
    #[arg(long)]
    pub region: Option<String>,

    /// Voice engine filter: neural or standard
    #[arg(long)]
    pub engine: Option<String>,

    /// Maximum chunk size in bytes
    #[arg(long)]
    pub chunk_max_chars: Option<usize>,

    /// Player command; the audio file path is appended
    #[arg(long)]
    pub player_command: Option<String>,
}

impl SetArgs {
    pub fn into_update(self) -> SettingsUpdate {
        SettingsUpdate {
            language: self.language,
            voice: self.voice,
            speed: self.speed,
            pitch: self.pitch,
            volume_gain_db: self.volume_gain_db,
            read_aloud_encoding: self.read_encoding,
            download_encoding: self.download_encoding,
            subscription_key: self.subscription_key,
            region: self.region,
            engine: self.engine,
            chunk_max_chars: self.chunk_max_chars,
            player_command: self.player_command,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_args_make_empty_update() {
        assert!(SetArgs::default().into_update().is_empty());
    }

    #[test]
    fn test_set_args_map_field_by_field() {
        let args = SetArgs {
            voice: Some("en-GB-SoniaNeural".into()),
            pitch: Some(-10.0),
            download_encoding: Some(AudioEncoding::Mp3),
            ..Default::default()
        };
        let update = args.into_update();
        assert_eq!(update.voice.as_deref(), Some("en-GB-SoniaNeural"));
        assert_eq!(update.pitch, Some(-10.0));
        assert_eq!(update.download_encoding, Some(AudioEncoding::Mp3));
        assert!(update.language.is_none());
    }
}
