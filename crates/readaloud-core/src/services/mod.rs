//! Services that orchestrate ports on behalf of the command layer.

mod settings_service;
mod voice_service;

pub use settings_service::SettingsService;
pub use voice_service::VoiceService;
