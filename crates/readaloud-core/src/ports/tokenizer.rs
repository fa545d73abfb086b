//! Sentence segmentation port.

/// Splits text into sentences.
///
/// Returned sentences are in reading order. Implementations that cannot
/// segment a text may return it whole as a single sentence.
pub trait SentenceTokenizer: Send + Sync {
    fn sentences(&self, text: &str) -> Vec<String>;
}
