//! Settings service - orchestrates settings operations.

use std::sync::Arc;

use crate::error::ReadAloudError;
use crate::ports::SettingsRepository;
use crate::settings::{Settings, SettingsUpdate, validate_settings};

/// Service for settings operations.
pub struct SettingsService {
    repo: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    /// Create a new settings service.
    pub fn new(repo: Arc<dyn SettingsRepository>) -> Self {
        Self { repo }
    }

    /// Get current settings.
    pub async fn get(&self) -> Result<Settings, ReadAloudError> {
        Ok(self.repo.load().await?)
    }

    /// Update settings with partial changes.
    pub async fn update(&self, update: SettingsUpdate) -> Result<Settings, ReadAloudError> {
        let mut current = self.repo.load().await?;
        current.merge(&update);
        validate_settings(&current)?;
        self.repo.save(&current).await?;
        Ok(current)
    }

    /// Save complete settings (validates first).
    pub async fn save(&self, settings: &Settings) -> Result<(), ReadAloudError> {
        validate_settings(settings)?;
        Ok(self.repo.save(settings).await?)
    }
}
