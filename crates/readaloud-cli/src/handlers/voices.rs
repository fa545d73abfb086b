//! Voices command handler.

use std::fmt::Write as _;

use anyhow::Result;
use readaloud_core::{Voice, VoiceType};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// List voices, optionally for one locale. The configured voice is starred.
pub async fn execute(ctx: &CliContext, locale: Option<&str>) -> Result<()> {
    let settings = ctx.settings().await?;
    let voices = match locale {
        Some(locale) => ctx.voices().voices_for_locale(&settings, locale).await,
        None => ctx.voices().voices(&settings).await,
    }
    .map_err(CliError::from)?;

    if voices.is_empty() {
        println!("No voices found for this locale.");
        return Ok(());
    }

    print!("{}", render(&voices, settings.voice_for_language()));
    Ok(())
}

fn render(voices: &[Voice], selected: Option<&str>) -> String {
    let mut out = String::new();
    for voice in voices {
        let marker = if Some(voice.short_name.as_str()) == selected {
            '*'
        } else {
            ' '
        };
        let kind = match voice.voice_type {
            VoiceType::Neural => "neural",
            VoiceType::Standard => "standard",
        };
        let _ = writeln!(
            out,
            "{marker} {:<40} {:<8} {:<8} {kind:<8} {}",
            voice.short_name,
            voice.locale,
            format!("{:?}", voice.gender),
            voice.local_name
        );
    }
    out
}
