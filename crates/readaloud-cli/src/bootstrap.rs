//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - JSON settings store and settings service (via readaloud-core)
//! - Azure speech client as synthesis gateway and voice catalog (via readaloud-azure)
//! - External-process audio player
//!
//! Command handlers receive the composed [`CliContext`].

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use readaloud_azure::{AzureClientConfig, DefaultAzureClient};
use readaloud_core::{
    AudioPlayer, JsonSettingsRepository, Settings, SettingsService, SynthesisGateway,
    VoiceCatalog, VoiceService, settings_path,
};
use readaloud_playback::{CommandHandler, Orchestrator, SessionEvent};
use tokio::sync::mpsc;

use crate::error::CliError;
use crate::player::CommandPlayer;

/// Overrides the stored subscription key.
pub const KEY_ENV: &str = "AZURE_SPEECH_KEY";
/// Overrides the stored region.
pub const REGION_ENV: &str = "AZURE_SPEECH_REGION";
/// Sends requests to this base URL instead of the regional endpoint.
pub const ENDPOINT_ENV: &str = "AZURE_SPEECH_ENDPOINT";

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub settings_path: PathBuf,
    pub azure: AzureClientConfig,
    /// Credentials taken from the environment, applied over stored settings.
    pub key_override: Option<String>,
    pub region_override: Option<String>,
}

impl CliConfig {
    /// Create config from the default data directory and the environment.
    pub fn with_defaults() -> Result<Self> {
        let mut azure = AzureClientConfig::default();
        if let Some(endpoint) = non_empty_env(ENDPOINT_ENV) {
            azure = azure.with_endpoint(endpoint);
        }

        Ok(Self {
            settings_path: settings_path()?,
            azure,
            key_override: non_empty_env(KEY_ENV),
            region_override: non_empty_env(REGION_ENV),
        })
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Apply environment credentials to loaded settings.
pub fn apply_overrides(settings: &mut Settings, config: &CliConfig) {
    if let Some(key) = &config.key_override {
        settings.subscription_key.clone_from(key);
    }
    if let Some(region) = &config.region_override {
        settings.region.clone_from(region);
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    config: CliConfig,
    settings_service: SettingsService,
    voices: VoiceService,
    gateway: Arc<dyn SynthesisGateway>,
}

impl CliContext {
    pub const fn config(&self) -> &CliConfig {
        &self.config
    }

    pub const fn settings_service(&self) -> &SettingsService {
        &self.settings_service
    }

    pub const fn voices(&self) -> &VoiceService {
        &self.voices
    }

    /// Stored settings with environment overrides applied.
    pub async fn settings(&self) -> Result<Settings> {
        let mut settings = self.settings_service.get().await.map_err(CliError::from)?;
        apply_overrides(&mut settings, &self.config);
        Ok(settings)
    }

    /// Build a command handler for one invocation, with a player for the
    /// configured command and the receiver for its session events.
    pub fn command_handler(
        &self,
        settings: Settings,
    ) -> (CommandHandler, mpsc::UnboundedReceiver<SessionEvent>) {
        let player: Arc<dyn AudioPlayer> = Arc::new(CommandPlayer::new(&settings.player_command));
        let (orchestrator, events) = Orchestrator::new(Arc::clone(&self.gateway), player);
        let handler = CommandHandler::new(
            Arc::new(orchestrator),
            Arc::clone(&self.gateway),
            settings,
        );
        (handler, events)
    }
}

/// Bootstrap the CLI application.
pub fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let repo = Arc::new(JsonSettingsRepository::new(config.settings_path.clone()));
    let settings_service = SettingsService::new(repo);

    let client = Arc::new(DefaultAzureClient::new(&config.azure)?);
    let gateway: Arc<dyn SynthesisGateway> = client.clone();
    let catalog: Arc<dyn VoiceCatalog> = client;

    tracing::debug!(settings = %config.settings_path.display(), "CLI context ready");

    Ok(CliContext {
        config,
        settings_service,
        voices: VoiceService::new(catalog),
        gateway,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(path: PathBuf) -> CliConfig {
        CliConfig {
            settings_path: path,
            azure: AzureClientConfig::default(),
            key_override: None,
            region_override: None,
        }
    }

    #[test]
    fn test_overrides_replace_stored_credentials() {
        let mut settings = Settings::with_defaults();
        settings.subscription_key = "stored".into();

        let mut cfg = config(PathBuf::from("settings.json"));
        cfg.key_override = Some("from-env".into());
        cfg.region_override = Some("westeurope".into());
        apply_overrides(&mut settings, &cfg);

        assert_eq!(settings.subscription_key, "from-env");
        assert_eq!(settings.region, "westeurope");
    }

    #[test]
    fn test_no_overrides_keep_stored_credentials() {
        let mut settings = Settings::with_defaults();
        settings.subscription_key = "stored".into();
        apply_overrides(&mut settings, &config(PathBuf::from("settings.json")));
        assert_eq!(settings.subscription_key, "stored");
        assert_eq!(settings.region, "eastus");
    }

    #[tokio::test]
    async fn test_context_reads_defaults_without_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path().join("settings.json"));
        cfg.key_override = Some("env-key".into());

        let ctx = bootstrap(cfg).unwrap();
        let settings = ctx.settings().await.unwrap();
        assert_eq!(settings.subscription_key, "env-key");
        assert_eq!(settings.language, "en-US");

        // Overrides are not written back
        let stored = ctx.settings_service().get().await.unwrap();
        assert!(stored.subscription_key.is_empty());
    }
}
