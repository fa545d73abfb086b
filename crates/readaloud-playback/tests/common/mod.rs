//! Fakes shared by the playback integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use readaloud_core::{
    AudioClip, AudioEncoding, AudioPlayer, Chunk, Credentials, DataUri, PlaybackError, Prosody,
    SynthesisError, SynthesisGateway, SynthesisParams, SynthesisRequest,
};
use tokio::sync::Notify;

/// Ordered record of gateway and player calls.
#[derive(Default)]
pub struct CallLog(Mutex<Vec<String>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.entries().iter().position(|e| e == entry)
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.position(entry).is_some()
    }
}

/// Gateway that returns the chunk text as audio bytes after a delay.
pub struct FakeGateway {
    log: Arc<CallLog>,
    delay: Duration,
    fail_on: Option<(String, SynthesisError)>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    requests: Mutex<Vec<SynthesisRequest>>,
}

impl FakeGateway {
    pub fn new(log: Arc<CallLog>, delay: Duration) -> Self {
        Self {
            log,
            delay,
            fail_on: None,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, text: &str, error: SynthesisError) -> Self {
        self.fail_on = Some((text.to_string(), error));
        self
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<SynthesisRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SynthesisGateway for FakeGateway {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioClip, SynthesisError> {
        let text = request.chunk().as_str().to_string();
        self.log.push(format!("synth:{text}"));
        self.requests.lock().unwrap().push(request.clone());

        if !request.credentials().is_complete() {
            return Err(SynthesisError::CredentialsMissing);
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some((ref fail_text, ref error)) = self.fail_on {
            if *fail_text == text {
                return Err(error.clone());
            }
        }
        Ok(AudioClip::new(request.encoding(), text.into_bytes()))
    }
}

/// Player that "plays" for a fixed duration unless stopped.
pub struct FakePlayer {
    log: Arc<CallLog>,
    duration: Duration,
    fail_on_play: Option<usize>,
    plays: AtomicUsize,
    stops: AtomicUsize,
    stopped: Notify,
}

impl FakePlayer {
    pub fn new(log: Arc<CallLog>, duration: Duration) -> Self {
        Self {
            log,
            duration,
            fail_on_play: None,
            plays: AtomicUsize::new(0),
            stops: AtomicUsize::new(0),
            stopped: Notify::new(),
        }
    }

    /// Fail the `n`th call to `play` (one-based) with a device error.
    pub const fn failing_on_play(mut self, n: usize) -> Self {
        self.fail_on_play = Some(n);
        self
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AudioPlayer for FakePlayer {
    async fn play(&self, uri: &str) -> Result<(), PlaybackError> {
        let audio = DataUri::parse(uri).expect("player receives data URIs");
        let text = String::from_utf8(audio.bytes).expect("fake audio is text");
        self.log.push(format!("play:{text}"));

        let n = self.plays.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_play == Some(n) {
            return Err(PlaybackError::Device("device lost".to_string()));
        }

        tokio::select! {
            () = tokio::time::sleep(self.duration) => Ok(()),
            () = self.stopped.notified() => Err(PlaybackError::Interrupted),
        }
    }

    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.log.push("stop");
        self.stopped.notify_waiters();
    }
}

pub fn params() -> SynthesisParams {
    SynthesisParams {
        voice: "en-US-JennyNeural".to_string(),
        encoding: AudioEncoding::OggOpus,
        prosody: Prosody::default(),
        credentials: Credentials::new("key", "eastus"),
    }
}

pub fn chunks(texts: &[&str]) -> Vec<Chunk> {
    texts.iter().map(|t| Chunk::new(*t)).collect()
}
