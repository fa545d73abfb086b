//! Read command handler.
//!
//! Runs one read-aloud session. Session events are printed to stderr as
//! they arrive and Ctrl-C dispatches [`Command::Stop`].

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use readaloud_playback::{Command, CommandOutcome, ReadRate, SessionEvent, SessionOutcome};
use tokio::sync::mpsc;

use super::read_input;
use crate::bootstrap::CliContext;
use crate::error::CliError;

pub async fn execute(ctx: &CliContext, rate: ReadRate, file: Option<&Path>) -> Result<()> {
    let text = read_input(file).await?;
    let settings = ctx.settings().await?;

    let (handler, events) = ctx.command_handler(settings);
    let handler = Arc::new(handler);
    let printer = tokio::spawn(print_events(events));

    let mut session = {
        let handler = Arc::clone(&handler);
        tokio::spawn(async move { handler.dispatch(Command::ReadAloud(rate), &text).await })
    };

    let result = tokio::select! {
        result = &mut session => result?,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            eprintln!("Stopping...");
            handler.dispatch(Command::Stop, "").await.map_err(CliError::from)?;
            session.await?
        }
    };

    // Last sender goes away with the orchestrator, which ends the printer
    drop(handler);
    printer.await?;

    match result.map_err(CliError::from)? {
        CommandOutcome::Session(outcome) => finish(outcome),
        other => {
            tracing::warn!(?other, "Unexpected outcome for read command");
            Ok(())
        }
    }
}

fn finish(outcome: SessionOutcome) -> Result<()> {
    match outcome {
        SessionOutcome::Completed => Ok(()),
        SessionOutcome::Cancelled => {
            eprintln!("Stopped.");
            Ok(())
        }
        SessionOutcome::Interrupted => {
            eprintln!("Playback ended early. Check the player command with `readaloud config show`.");
            Ok(())
        }
        SessionOutcome::Failed => Err(CliError::Reported.into()),
    }
}

async fn print_events(mut events: mpsc::UnboundedReceiver<SessionEvent>) {
    while let Some(event) = events.recv().await {
        if let Some(line) = describe(&event) {
            eprintln!("{line}");
        }
    }
}

fn describe(event: &SessionEvent) -> Option<String> {
    match event {
        SessionEvent::Notice(notice) => Some(format!("✗ {}: {}", notice.title, notice.message)),
        SessionEvent::ChunkStarted { index, total } if *total > 1 => {
            Some(format!("▶ Part {}/{total}", index + 1))
        }
        other => {
            tracing::debug!(event = ?other, "Session event");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readaloud_core::UserNotice;
    use readaloud_playback::PlaybackState;

    #[test]
    fn test_notices_are_printed() {
        let event = SessionEvent::Notice(UserNotice::new("Failed to synthesize text", "HTTP 429"));
        assert_eq!(
            describe(&event).as_deref(),
            Some("✗ Failed to synthesize text: HTTP 429")
        );
    }

    #[test]
    fn test_progress_only_for_multi_part_sessions() {
        let single = SessionEvent::ChunkStarted { index: 0, total: 1 };
        assert!(describe(&single).is_none());

        let multi = SessionEvent::ChunkStarted { index: 1, total: 3 };
        assert_eq!(describe(&multi).as_deref(), Some("▶ Part 2/3"));
    }

    #[test]
    fn test_state_changes_are_not_printed() {
        let event = SessionEvent::StateChanged(PlaybackState::Playing);
        assert!(describe(&event).is_none());
    }

    #[test]
    fn test_failed_session_is_already_reported() {
        let err = finish(SessionOutcome::Failed).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::Reported)
        ));
        assert!(finish(SessionOutcome::Cancelled).is_ok());
    }
}
