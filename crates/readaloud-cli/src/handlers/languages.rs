//! Languages command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// List catalog locales, marking the selected language.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let settings = ctx.settings().await?;
    let languages = ctx
        .voices()
        .languages(&settings)
        .await
        .map_err(CliError::from)?;

    for language in languages {
        let marker = if language == settings.language { '*' } else { ' ' };
        println!("{marker} {language}");
    }
    Ok(())
}
