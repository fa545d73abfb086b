//! State owned by the orchestrator for the active session.

use std::collections::VecDeque;

use readaloud_core::Chunk;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlaybackState {
    /// Nothing is queued or playing.
    #[default]
    Idle,

    /// A session loop is running.
    Playing,

    /// Stop was requested; the loop has not exited yet.
    Cancelling,
}

/// Queue and flags of the current session.
///
/// Only the orchestrator mutates this, always under its lock and never
/// across an await point.
#[derive(Debug, Default)]
pub(crate) struct PlaybackSession {
    pub state: PlaybackState,
    pub queue: VecDeque<Chunk>,
    pub cancel: CancellationToken,
    /// Bumped by every start and stop request. A start that is no longer
    /// the latest request when it gets to run does nothing.
    pub latest_request: u64,
}

impl PlaybackSession {
    /// Cancel the running session and clear its queue.
    ///
    /// Returns `true` if the session was playing, in which case the caller
    /// must stop the player.
    pub fn begin_cancel(&mut self) -> bool {
        self.cancel.cancel();
        self.queue.clear();
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Cancelling;
            true
        } else {
            false
        }
    }

    /// Install a fresh queue and token for a new session.
    pub fn reset(&mut self, chunks: Vec<Chunk>) -> CancellationToken {
        self.queue = chunks.into();
        self.cancel = CancellationToken::new();
        self.state = PlaybackState::Playing;
        self.cancel.clone()
    }

    pub fn finish(&mut self) {
        self.queue.clear();
        self.state = PlaybackState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_only_reports_playing_once() {
        let mut session = PlaybackSession::default();
        session.reset(vec![Chunk::new("a"), Chunk::new("b")]);

        assert!(session.begin_cancel());
        assert!(session.queue.is_empty());
        assert_eq!(session.state, PlaybackState::Cancelling);

        assert!(!session.begin_cancel());
    }

    #[test]
    fn cancelling_idle_session_is_a_no_op() {
        let mut session = PlaybackSession::default();
        assert!(!session.begin_cancel());
        assert_eq!(session.state, PlaybackState::Idle);
    }

    #[test]
    fn reset_replaces_cancelled_token() {
        let mut session = PlaybackSession::default();
        let first = session.reset(vec![Chunk::new("a")]);
        session.begin_cancel();
        assert!(first.is_cancelled());

        let second = session.reset(vec![Chunk::new("b")]);
        assert!(!second.is_cancelled());
        assert_eq!(session.queue.len(), 1);
    }
}
