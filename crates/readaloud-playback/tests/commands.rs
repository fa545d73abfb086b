//! Command routing from raw selections to sessions and downloads.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{CallLog, FakeGateway, FakePlayer};
use readaloud_core::{AudioEncoding, ReadAloudError, Settings};
use readaloud_playback::{
    Command, CommandHandler, CommandOutcome, Orchestrator, ReadRate, SessionOutcome,
};

struct Setup {
    handler: CommandHandler,
    gateway: Arc<FakeGateway>,
    player: Arc<FakePlayer>,
}

fn setup(settings: Settings) -> Setup {
    let log = Arc::new(CallLog::default());
    let gateway = Arc::new(FakeGateway::new(log.clone(), Duration::from_millis(5)));
    let player = Arc::new(FakePlayer::new(log, Duration::from_millis(5)));
    let (orchestrator, _events) = Orchestrator::new(gateway.clone(), player.clone());
    let handler = CommandHandler::new(Arc::new(orchestrator), gateway.clone(), settings);
    Setup {
        handler,
        gateway,
        player,
    }
}

fn configured() -> Settings {
    let mut settings = Settings::with_defaults();
    settings.subscription_key = "key".to_string();
    settings
        .voices
        .insert("en-US".to_string(), "en-US-GuyNeural".to_string());
    settings
}

#[tokio::test(start_paused = true)]
async fn read_aloud_sanitizes_and_applies_rate() {
    let s = setup(configured());

    let outcome = s
        .handler
        .dispatch(
            Command::ReadAloud(ReadRate::X2),
            "<p>Fish &amp; chips.</p><script>alert(1)</script>",
        )
        .await
        .unwrap();
    assert_eq!(outcome, CommandOutcome::Session(SessionOutcome::Completed));

    let requests = s.gateway.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].chunk().as_str(), "Fish &#x26; chips.");
    assert_eq!(requests[0].voice(), "en-US-GuyNeural");
    assert_eq!(requests[0].encoding(), AudioEncoding::OggOpus);
    assert!((requests[0].prosody().speed - 2.0).abs() < f32::EPSILON);
}

#[tokio::test(start_paused = true)]
async fn default_rate_uses_configured_speed() {
    let mut settings = configured();
    settings.speed = 1.25;
    let s = setup(settings);

    s.handler
        .dispatch(Command::ReadAloud(ReadRate::Default), "Hello.")
        .await
        .unwrap();
    assert!((s.gateway.requests()[0].prosody().speed - 1.25).abs() < f32::EPSILON);
}

#[tokio::test(start_paused = true)]
async fn download_uses_download_encoding() {
    let s = setup(configured());

    let outcome = s
        .handler
        .dispatch(Command::Download, "One. Two.")
        .await
        .unwrap();
    let CommandOutcome::Downloaded(download) = outcome else {
        panic!("expected a download, got {outcome:?}");
    };

    assert_eq!(download.file_name, "tts-download.mp3");
    assert_eq!(download.clip.encoding, AudioEncoding::Mp3At64Kbps);
    assert_eq!(download.clip.bytes, b"One. Two.");
    assert_eq!(s.player.stops(), 0);
}

#[tokio::test(start_paused = true)]
async fn missing_voice_is_reported_before_any_request() {
    let mut settings = configured();
    settings.language = "fr-FR".to_string();
    let s = setup(settings);

    let err = s
        .handler
        .dispatch(Command::ReadAloud(ReadRate::X1), "Bonjour.")
        .await
        .unwrap_err();
    assert!(matches!(err, ReadAloudError::NoVoicesConfigured));
    assert!(s.gateway.requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn session_failures_come_back_as_failed_outcome() {
    let s = setup(Settings::with_defaults());

    let outcome = s
        .handler
        .dispatch(Command::ReadAloud(ReadRate::Default), "Hello.")
        .await
        .unwrap();
    assert_eq!(outcome, CommandOutcome::Session(SessionOutcome::Failed));
}

#[tokio::test]
async fn stop_when_idle_does_nothing() {
    let s = setup(configured());

    let outcome = s.handler.dispatch(Command::Stop, "").await.unwrap();
    assert_eq!(outcome, CommandOutcome::Stopped);
    assert_eq!(s.player.stops(), 0);
}
