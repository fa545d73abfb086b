//! Splitting speakable markup into request-sized chunks.

mod markup;
mod plain;

use std::fmt;
use std::sync::Arc;

use readaloud_core::settings::DEFAULT_CHUNK_MAX_CHARS;
use readaloud_core::{Chunk, SentenceTokenizer, SpeakableMarkup, split_document};

use crate::sentences::RuleTokenizer;

/// Smallest content budget a chunk is ever given, after subtracting the
/// length of any wrapping tags.
pub const MIN_CONTENT_BUDGET: usize = 64;

/// Splits markup into chunks of at most `max_chars` bytes.
///
/// Plain text is packed sentence by sentence. A `<speak>` document is split
/// on element boundaries and every chunk is itself a complete document.
/// Pieces that cannot be divided (a single oversized tag or comment) may
/// exceed the budget.
#[derive(Clone)]
pub struct Chunker {
    max_chars: usize,
    tokenizer: Arc<dyn SentenceTokenizer>,
}

impl Chunker {
    pub fn new(max_chars: usize) -> Self {
        Self::with_tokenizer(max_chars, Arc::new(RuleTokenizer::new()))
    }

    pub fn with_tokenizer(max_chars: usize, tokenizer: Arc<dyn SentenceTokenizer>) -> Self {
        Self {
            max_chars: max_chars.max(MIN_CONTENT_BUDGET),
            tokenizer,
        }
    }

    pub const fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Split `markup` into chunks. Never returns an empty list: empty input
    /// yields a single empty chunk.
    pub fn chunk(&self, markup: &SpeakableMarkup) -> Vec<Chunk> {
        let text = markup.as_str();
        let pieces = match split_document(text) {
            Some(parts) => {
                markup::chunk_document(text, &parts, self.max_chars, self.tokenizer.as_ref())
            }
            None => self.chunk_plain(text),
        };

        tracing::debug!(
            input_len = text.len(),
            chunks = pieces.len(),
            max_chars = self.max_chars,
            "Chunked markup"
        );
        pieces.into_iter().map(Chunk::new).collect()
    }

    fn chunk_plain(&self, text: &str) -> Vec<String> {
        if text.len() <= self.max_chars {
            return vec![text.to_string()];
        }

        let sentences = self.tokenizer.sentences(text);
        if sentences.iter().all(|s| s.trim().is_empty()) {
            tracing::warn!(
                input_len = text.len(),
                "No sentences found, sending text as a single chunk"
            );
            return vec![text.to_string()];
        }

        plain::pack(text, self.max_chars, &sentences)
            .into_iter()
            .map(|range| text[range].to_string())
            .collect()
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_MAX_CHARS)
    }
}

impl fmt::Debug for Chunker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chunker")
            .field("max_chars", &self.max_chars)
            .finish_non_exhaustive()
    }
}
