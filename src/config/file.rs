//! Configuration file management for lingo.
//!
//! This module handles loading and saving application configuration from TOML files.
//! Configuration is stored in the user's config directory.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::translation::{SpokenLanguage, TargetLanguage};

/// Translation service endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the translation service
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Seconds to wait for a service response before giving up
    /// (uploads of large PDFs and audio can take a while)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ServiceConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

/// Language defaults applied when no command-line flag overrides them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguagesConfig {
    /// Target language code for translations (see `lingo languages`)
    #[serde(default)]
    pub target: TargetLanguage,
    /// Spoken language code for speech recognition (see `lingo languages`)
    #[serde(default)]
    pub spoken: SpokenLanguage,
}

/// Audio recording configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Audio device to use. Options:
    /// - "default" for system default device
    /// - numeric index (0, 1, 2, etc.) from `lingo list-devices`
    /// - device name from `lingo list-devices`
    #[serde(default = "default_device")]
    pub device: String,
    /// Recording sample rate in Hz (16000 recommended for speech recognition)
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            device: default_device(),
            sample_rate: default_sample_rate(),
        }
    }
}

fn default_device() -> String {
    "default".to_string()
}

fn default_sample_rate() -> u32 {
    16000
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LingoConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub languages: LanguagesConfig,
    #[serde(default)]
    pub audio: AudioConfig,
}

impl LingoConfig {
    /// Loads configuration from the user's config directory.
    ///
    /// # Errors
    /// - If the config directory cannot be determined
    /// - If the config file cannot be read
    /// - If the TOML is malformed
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = get_config_path()?;
        let config_content = fs::read_to_string(&config_path)?;
        let config: LingoConfig = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Saves configuration to the user's config directory.
    ///
    /// # Errors
    /// - If the config directory cannot be determined or created
    /// - If the file cannot be written
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = get_config_path()?;
        let config_content = toml::to_string_pretty(self)?;
        fs::write(&config_path, config_content)?;
        tracing::info!("Configuration saved");
        Ok(())
    }
}

/// Retrieves the path to the config file.
///
/// Assumes the config file exists (created by setup if needed).
///
/// # Errors
/// - If the config directory cannot be determined
/// - If the config directory cannot be created
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let config_dir = dirs::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not find home directory",
        )
    })?;
    let config_path = config_dir.join(".config").join("lingo").join("lingo.toml");

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_service_contract() {
        let config = LingoConfig::default();
        assert_eq!(config.service.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.service.request_timeout_secs, 60);
        assert_eq!(config.languages.target.code(), "en");
        assert_eq!(config.languages.spoken.code(), "ml-IN");
        assert_eq!(config.audio.device, "default");
        assert_eq!(config.audio.sample_rate, 16000);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: LingoConfig = toml::from_str("").unwrap();
        assert_eq!(config.service.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.audio.sample_rate, 16000);
    }

    #[test]
    fn test_partial_sections_fill_missing_fields() {
        let config: LingoConfig = toml::from_str(
            r#"
            [service]
            base_url = "http://10.0.0.2:8080"

            [languages]
            target = "ml"
            "#,
        )
        .unwrap();

        assert_eq!(config.service.base_url, "http://10.0.0.2:8080");
        assert_eq!(config.service.request_timeout_secs, 60);
        assert_eq!(config.languages.target, TargetLanguage::Malayalam);
        assert_eq!(config.languages.spoken, SpokenLanguage::Malayalam);
        assert_eq!(config.audio.device, "default");
    }

    #[test]
    fn test_round_trip_preserves_values() {
        let mut config = LingoConfig::default();
        config.service.base_url = "http://translate.local:5000".to_string();
        config.languages.target = TargetLanguage::Japanese;
        config.audio.device = "2".to_string();

        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: LingoConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.service.base_url, "http://translate.local:5000");
        assert_eq!(parsed.languages.target, TargetLanguage::Japanese);
        assert_eq!(parsed.audio.device, "2");
    }

    #[test]
    fn test_unknown_language_code_is_rejected() {
        let result = toml::from_str::<LingoConfig>(
            r#"
            [languages]
            target = "klingon"
            "#,
        );
        assert!(result.is_err());
    }
}
