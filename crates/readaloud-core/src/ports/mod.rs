//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the pipeline expects from infrastructure:
//! a speech service, an audio device, a sentence tokenizer, a voice catalog
//! and settings persistence. They use only domain types.
//!
//! # Design Rules
//!
//! - No HTTP or process types in any signature
//! - Adapter errors are mapped to the port error at the adapter boundary

pub mod player;
pub mod settings_repository;
pub mod synthesis;
pub mod tokenizer;
pub mod voice_catalog;

use thiserror::Error;

pub use player::{AudioPlayer, PlaybackError};
pub use settings_repository::SettingsRepository;
pub use synthesis::{SynthesisError, SynthesisGateway};
pub use tokenizer::SentenceTokenizer;
pub use voice_catalog::{CatalogError, VoiceCatalog};

/// Domain-specific errors for persistence operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Storage backend error (filesystem, permissions).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}
