//! JSON-file settings repository.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::ports::{RepositoryError, SettingsRepository};
use crate::settings::{Settings, migrate_legacy};

/// Stores settings as pretty-printed JSON in a single file.
///
/// Legacy layouts are migrated on load and the migrated form is written
/// back immediately.
pub struct JsonSettingsRepository {
    path: PathBuf,
}

impl JsonSettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write(&self, settings: &Settings) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        // Write-then-rename so a crash never leaves a truncated file
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))
    }
}

#[async_trait]
impl SettingsRepository for JsonSettingsRepository {
    async fn load(&self) -> Result<Settings, RepositoryError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No settings file, using defaults");
                return Ok(Settings::with_defaults());
            }
            Err(e) => return Err(RepositoryError::Storage(e.to_string())),
        };

        let mut settings: Settings = serde_json::from_str(&raw)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        if migrate_legacy(&mut settings) {
            self.write(&settings).await?;
        }

        Ok(settings)
    }

    async fn save(&self, settings: &Settings) -> Result<(), RepositoryError> {
        self.write(settings).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AudioEncoding;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonSettingsRepository::new(dir.path().join("settings.json"));

        let settings = assert_ok!(repo.load().await);
        assert_eq!(settings, Settings::with_defaults());
    }

    #[tokio::test]
    async fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonSettingsRepository::new(dir.path().join("nested/settings.json"));

        let mut settings = Settings::with_defaults();
        settings.subscription_key = "key".to_string();
        settings.region = "westeurope".to_string();
        assert_ok!(repo.save(&settings).await);

        let loaded = assert_ok!(repo.load().await);
        assert_eq!(loaded, settings);
    }

    #[tokio::test]
    async fn legacy_file_is_migrated_and_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        tokio::fs::write(&path, r#"{"downloadEncoding":"OGG_OPUS","apiKey":"old"}"#)
            .await
            .unwrap();

        let repo = JsonSettingsRepository::new(&path);
        let settings = assert_ok!(repo.load().await);
        assert_eq!(settings.download_encoding, AudioEncoding::Mp3At64Kbps);

        let on_disk = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(on_disk.contains("MP3_64_KBPS"));
        assert!(!on_disk.contains("apiKey"));
    }

    #[tokio::test]
    async fn corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let repo = JsonSettingsRepository::new(&path);
        assert!(matches!(
            repo.load().await,
            Err(RepositoryError::Serialization(_))
        ));
    }
}
