//! Playback orchestrator with one-ahead prefetch.
//!
//! ```text
//!   Idle ──play──▶ Playing ──queue drained──▶ Idle
//!                    │
//!                  cancel / newer play
//!                    ▼
//!                Cancelling ──loop exits──▶ Idle
//! ```
//!
//! Each iteration takes the head of the queue, reuses the synthesis
//! prefetched for it (or requests it now for the first chunk), starts the
//! prefetch for the following chunk, then plays the current clip. At most
//! two synthesis requests are in flight per session. Cancellation is
//! checked at the top of every iteration and while waiting for audio or
//! playback; results of in-flight requests are discarded, not aborted.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use readaloud_core::{
    AudioClip, AudioPlayer, Chunk, ReadAloudError, SynthesisError, SynthesisGateway,
    SynthesisParams, SynthesisRequest, UserNotice,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::session::{PlaybackSession, PlaybackState};

// ── Events emitted by the orchestrator ─────────────────────────────

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Every chunk was played.
    Completed,

    /// Stopped by [`Orchestrator::cancel`] or superseded by a newer session.
    Cancelled,

    /// The player failed; the rest of the queue was abandoned.
    Interrupted,

    /// Synthesis failed; a [`SessionEvent::Notice`] was emitted.
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    StateChanged(PlaybackState),

    /// Playback of chunk `index` (zero-based) of `total` is starting.
    ChunkStarted { index: usize, total: usize },

    Finished(SessionOutcome),

    /// A failure the user should see. Emitted once per failed session.
    Notice(UserNotice),
}

type PendingClip = JoinHandle<Result<AudioClip, SynthesisError>>;

// ── Orchestrator ───────────────────────────────────────────────────

/// Owns the playback session and drives synthesis and playback.
///
/// Share it behind an `Arc`: [`play`](Self::play) runs for the whole
/// session, while [`cancel`](Self::cancel) and newer `play` calls from other
/// tasks stop it.
pub struct Orchestrator {
    gateway: Arc<dyn SynthesisGateway>,
    player: Arc<dyn AudioPlayer>,

    /// Queue and flags. Locked briefly, never across an await.
    session: Mutex<PlaybackSession>,

    /// Held by the running session loop; at most one loop runs at a time.
    run_lock: tokio::sync::Mutex<()>,

    event_tx: mpsc::UnboundedSender<SessionEvent>,
}

impl Orchestrator {
    /// Returns the orchestrator and a receiver for [`SessionEvent`]s.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn SynthesisGateway>,
        player: Arc<dyn AudioPlayer>,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let orchestrator = Self {
            gateway,
            player,
            session: Mutex::new(PlaybackSession::default()),
            run_lock: tokio::sync::Mutex::new(()),
            event_tx,
        };

        (orchestrator, event_rx)
    }

    pub fn state(&self) -> PlaybackState {
        self.session().state
    }

    /// Chunks still waiting to be played.
    pub fn queued(&self) -> usize {
        self.session().queue.len()
    }

    /// Play `chunks` in order and resolve when the session ends.
    ///
    /// A running session is stopped first (player stop included) and fully
    /// exits before this one touches the queue. Synthesis failures abort the
    /// session and are returned; player failures end it with
    /// [`SessionOutcome::Interrupted`].
    pub async fn play(
        &self,
        chunks: Vec<Chunk>,
        params: SynthesisParams,
    ) -> Result<SessionOutcome, ReadAloudError> {
        let ticket = self.supersede();
        let _running = self.run_lock.lock().await;

        let token = {
            let mut session = self.session();
            if session.latest_request != ticket {
                tracing::debug!("Read request superseded before it started");
                return Ok(SessionOutcome::Cancelled);
            }
            session.reset(chunks)
        };
        self.emit(SessionEvent::StateChanged(PlaybackState::Playing));

        let result = self.run(&token, &params).await;

        self.session().finish();
        self.emit(SessionEvent::StateChanged(PlaybackState::Idle));
        let outcome = result.as_ref().map_or(SessionOutcome::Failed, |o| *o);
        tracing::debug!(?outcome, "Session finished");
        self.emit(SessionEvent::Finished(outcome));

        result
    }

    /// Stop the running session and wait until it has exited.
    ///
    /// Idempotent: cancelling an idle orchestrator does nothing.
    pub async fn cancel(&self) {
        self.supersede();
        let _idle = self.run_lock.lock().await;
    }

    // ── Session loop ───────────────────────────────────────────────

    async fn run(
        &self,
        token: &CancellationToken,
        params: &SynthesisParams,
    ) -> Result<SessionOutcome, ReadAloudError> {
        let total = self.queued();
        let mut prefetch: Option<PendingClip> = None;
        let mut index = 0;

        loop {
            if token.is_cancelled() {
                return Ok(SessionOutcome::Cancelled);
            }

            let (current, next) = {
                let mut session = self.session();
                let current = session.queue.pop_front();
                (current, session.queue.front().cloned())
            };
            let Some(current) = current else {
                return Ok(SessionOutcome::Completed);
            };

            let pending = prefetch
                .take()
                .unwrap_or_else(|| self.spawn_synthesis(current, params));
            prefetch = next.map(|chunk| self.spawn_synthesis(chunk, params));

            let joined = tokio::select! {
                biased;
                () = token.cancelled() => return Ok(SessionOutcome::Cancelled),
                joined = pending => joined,
            };
            let clip = match joined {
                Ok(Ok(clip)) => clip,
                Ok(Err(e)) => return Err(self.fail(e.into())),
                Err(e) => return Err(self.fail(ReadAloudError::SynthesisFailed(e.to_string()))),
            };

            tracing::debug!(chunk = index + 1, total, bytes = clip.bytes.len(), "Playing chunk");
            self.emit(SessionEvent::ChunkStarted { index, total });

            let uri = clip.to_data_uri();
            let played = tokio::select! {
                biased;
                () = token.cancelled() => return Ok(SessionOutcome::Cancelled),
                played = self.player.play(&uri) => played,
            };

            if let Err(e) = played {
                if token.is_cancelled() {
                    return Ok(SessionOutcome::Cancelled);
                }
                tracing::warn!(error = %e, chunk = index + 1, "Playback failed, abandoning session");
                return Ok(SessionOutcome::Interrupted);
            }

            index += 1;
        }
    }

    fn spawn_synthesis(&self, chunk: Chunk, params: &SynthesisParams) -> PendingClip {
        let gateway = Arc::clone(&self.gateway);
        let request = SynthesisRequest::new(chunk, params.clone());
        tokio::spawn(async move { gateway.synthesize(&request).await })
    }

    // ── Internal helpers ───────────────────────────────────────────

    /// Register a new start or stop request and stop the running session.
    fn supersede(&self) -> u64 {
        let (ticket, was_playing) = {
            let mut session = self.session();
            session.latest_request += 1;
            (session.latest_request, session.begin_cancel())
        };

        if was_playing {
            tracing::debug!("Stopping active session");
            self.emit(SessionEvent::StateChanged(PlaybackState::Cancelling));
            self.player.stop();
        }
        ticket
    }

    /// Log a session failure and notify the user once.
    fn fail(&self, error: ReadAloudError) -> ReadAloudError {
        tracing::error!(error = %error, "Read aloud session failed");
        if let Some(notice) = error.notice() {
            self.emit(SessionEvent::Notice(notice));
        }
        error
    }

    fn session(&self) -> MutexGuard<'_, PlaybackSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Emit an event (best-effort, if the receiver is dropped we log and move on).
    fn emit(&self, event: SessionEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::warn!("Session event receiver dropped");
        }
    }
}

impl Drop for Orchestrator {
    fn drop(&mut self) {
        if self.session().begin_cancel() {
            self.player.stop();
        }
    }
}
