//! Audio output port.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// Playback ended early because [`AudioPlayer::stop`] was called.
    #[error("Playback interrupted")]
    Interrupted,

    /// The output device or player process failed.
    #[error("Audio output failed: {0}")]
    Device(String),
}

/// Plays one audio URI at a time.
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Play `uri` and resolve once it has finished playing.
    async fn play(&self, uri: &str) -> Result<(), PlaybackError>;

    /// Stop whatever is playing now. A pending [`play`](Self::play) resolves
    /// with an error.
    fn stop(&self);
}
