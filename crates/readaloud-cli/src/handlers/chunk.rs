//! Chunk command handler.
//!
//! Shows how a selection would be split for synthesis, using the configured
//! chunk size.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;
use readaloud_core::Chunk;
use readaloud_text::{Chunker, sanitize};

use super::read_input;
use crate::bootstrap::CliContext;

pub async fn execute(ctx: &CliContext, file: Option<&Path>) -> Result<()> {
    let text = read_input(file).await?;
    let settings = ctx.settings().await?;

    let chunker = Chunker::new(settings.chunk_max_chars);
    let chunks = chunker.chunk(&sanitize(&text));
    print!("{}", render(&chunks, chunker.max_chars()));
    Ok(())
}

fn render(chunks: &[Chunk], max_chars: usize) -> String {
    let total = chunks.len();
    let mut out = String::new();
    for (i, chunk) in chunks.iter().enumerate() {
        let _ = writeln!(
            out,
            "--- chunk {}/{total} ({} of {max_chars} bytes) ---\n{}",
            i + 1,
            chunk.as_str().len(),
            chunk.as_str()
        );
    }
    out
}
