//! Core domain types and port definitions for readaloud.
//!
//! This crate owns the vocabulary shared by every other crate in the
//! workspace: speakable markup and chunks, audio encodings and clips,
//! synthesis requests, voices, user settings, and the traits (ports) that
//! adapters implement to plug a speech service or an audio device into the
//! pipeline.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod error;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;
pub mod store;

// Re-export commonly used types for convenience
pub use domain::{
    AudioClip, AudioEncoding, Chunk, Credentials, DataUri, DataUriError, DocumentParts, Prosody,
    SpeakableMarkup, SynthesisParams, SynthesisRequest, UnknownEncoding, Voice, VoiceGender,
    VoiceType, distinct_locales, find_tag_end, is_document, split_document,
};
pub use error::{ReadAloudError, UserNotice};
pub use paths::{PathError, data_root, settings_path};
pub use ports::{
    AudioPlayer, CatalogError, PlaybackError, RepositoryError, SentenceTokenizer,
    SettingsRepository, SynthesisError, SynthesisGateway, VoiceCatalog,
};
pub use services::{SettingsService, VoiceService};
pub use settings::{Settings, SettingsError, SettingsUpdate, migrate_legacy, validate_settings};
pub use store::JsonSettingsRepository;

