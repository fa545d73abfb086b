//! Whole-selection downloads.

use futures_util::{StreamExt, TryStreamExt, stream};
use readaloud_core::{
    AudioClip, AudioEncoding, Chunk, ReadAloudError, SynthesisGateway, SynthesisParams,
    SynthesisRequest,
};

/// Synthesis requests kept in flight while downloading.
pub const DOWNLOAD_CONCURRENCY: usize = 2;

const FILE_STEM: &str = "tts-download";

/// Audio for a whole selection, ready to save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub clip: AudioClip,
    /// Suggested file name, `tts-download.<ext>`.
    pub file_name: String,
}

impl Download {
    fn new(clip: AudioClip) -> Self {
        let file_name = format!("{FILE_STEM}.{}", clip.encoding.file_ext());
        Self { clip, file_name }
    }

    /// `data:audio/<ext>;base64,<payload>`
    pub fn data_uri(&self) -> String {
        self.clip.to_data_uri()
    }
}

/// Synthesize every chunk and join the audio in chunk order.
///
/// Fails on the first synthesis error. Encodings whose streams cannot be
/// joined byte-wise are rejected before any request is sent.
pub async fn download(
    gateway: &dyn SynthesisGateway,
    chunks: Vec<Chunk>,
    params: &SynthesisParams,
) -> Result<Download, ReadAloudError> {
    let encoding: AudioEncoding = params.encoding;
    if !encoding.supports_concatenation() {
        return Err(ReadAloudError::EncodingNotConcatenable(encoding));
    }

    let total = chunks.len();
    tracing::info!(chunks = total, %encoding, "Synthesizing download");

    let clips: Vec<AudioClip> = stream::iter(chunks)
        .map(|chunk| {
            let request = SynthesisRequest::new(chunk, params.clone());
            async move { gateway.synthesize(&request).await }
        })
        .buffered(DOWNLOAD_CONCURRENCY)
        .try_collect()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Download synthesis failed");
            ReadAloudError::from(e)
        })?;

    let clip = AudioClip::concat(encoding, clips);
    tracing::debug!(bytes = clip.bytes.len(), "Download assembled");
    Ok(Download::new(clip))
}
