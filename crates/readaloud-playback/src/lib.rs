//! Playback orchestration for readaloud.
//!
//! The [`Orchestrator`] plays a sequence of chunks through a
//! [`SynthesisGateway`](readaloud_core::SynthesisGateway) and an
//! [`AudioPlayer`](readaloud_core::AudioPlayer), keeping one synthesis
//! request ahead of playback. [`download`] synthesizes a whole selection
//! into one file, and [`CommandHandler`] routes user [`Command`]s.

#![deny(unused_crate_dependencies)]

mod commands;
mod download;
mod orchestrator;
mod session;

pub use commands::{Command, CommandHandler, CommandOutcome, ParseReadRateError, ReadRate};
pub use download::{DOWNLOAD_CONCURRENCY, Download, download};
pub use orchestrator::{Orchestrator, SessionEvent, SessionOutcome};
pub use session::PlaybackState;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
