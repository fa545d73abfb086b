//! Config command handler.

use anyhow::Result;
use readaloud_core::Settings;

use crate::bootstrap::CliContext;
use crate::commands::{ConfigCommand, SetArgs};
use crate::error::CliError;

pub async fn execute(ctx: &CliContext, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => show(ctx).await,
        ConfigCommand::Set(args) => set(ctx, args).await,
        ConfigCommand::Path => {
            println!("{}", ctx.config().settings_path.display());
            Ok(())
        }
    }
}

async fn show(ctx: &CliContext) -> Result<()> {
    let mut settings = ctx.settings().await?;
    settings.subscription_key = mask_key(&settings.subscription_key);
    println!("{}", serde_json::to_string_pretty(&settings)?);
    if ctx.config().key_override.is_some() || ctx.config().region_override.is_some() {
        println!("(credentials overridden from the environment)");
    }
    Ok(())
}

async fn set(ctx: &CliContext, args: SetArgs) -> Result<()> {
    let update = args.into_update();
    if update.is_empty() {
        return Err(CliError::Arguments(
            "Nothing to change. Pass at least one option, see `readaloud config set --help`".into(),
        )
        .into());
    }

    let updated: Settings = ctx
        .settings_service()
        .update(update)
        .await
        .map_err(CliError::from)?;
    println!(
        "✓ Settings saved ({}, voice {})",
        updated.language,
        updated.voice_for_language().unwrap_or("none")
    );
    Ok(())
}

/// Keep only the last four characters of a subscription key.
fn mask_key(key: &str) -> String {
    if key.is_empty() {
        return String::new();
    }
    let visible: String = key
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if visible.len() == key.len() {
        "****".to_string()
    } else {
        format!("****{visible}")
    }
}
