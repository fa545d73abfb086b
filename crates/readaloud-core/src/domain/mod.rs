//! Domain types for the text-to-speech pipeline.
//!
//! These are pure value types with no infrastructure dependencies.

mod audio;
mod markup;
mod synthesis;
mod voice;

pub use audio::{AudioClip, AudioEncoding, DataUri, DataUriError, UnknownEncoding};
pub use markup::{
    Chunk, DocumentParts, ROOT_TAG, SpeakableMarkup, find_tag_end, is_document, split_document,
};
pub use synthesis::{Credentials, Prosody, SynthesisParams, SynthesisRequest};
pub use voice::{Voice, VoiceGender, VoiceType, distinct_locales};
