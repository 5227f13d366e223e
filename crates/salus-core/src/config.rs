use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, SalusError};

/// Top-level configuration for the Salus assistant.
///
/// Loaded from `~/.salus/config.toml` by default. Each section corresponds
/// to one service wrapper or cross-cutting concern. API credentials are NOT
/// part of this file; they come from the environment (see [`Credentials`]).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SalusConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
}

impl SalusConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SalusConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| SalusError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Data directory for transcripts, reports, and appointments.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// Enable verbose debug behavior.
    pub debug: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.salus/data".to_string(),
            log_level: "info".to_string(),
            debug: false,
        }
    }
}

/// Upload validation settings for lab reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Maximum accepted upload size in bytes.
    pub max_size_bytes: u64,
    /// Accepted file extensions, with leading dot, lowercase.
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: 10 * 1024 * 1024,
            allowed_extensions: vec![
                ".pdf".to_string(),
                ".jpg".to_string(),
                ".jpeg".to_string(),
                ".png".to_string(),
            ],
        }
    }
}

/// Conversation engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Generative model identifier.
    pub model: String,
    /// Minimum interval between accepted chat submissions, in seconds.
    pub cooldown_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-pro".to_string(),
            cooldown_secs: 2,
        }
    }
}

/// Clinic lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Nearby-search radius in meters.
    pub radius_m: u32,
    /// Place category requested from the provider.
    pub category: String,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            radius_m: 5000,
            category: "hospital".to_string(),
        }
    }
}

/// Voice input/output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Whether spoken replies are enabled by default.
    pub enabled: bool,
    /// BCP-47 language code for recognition and synthesis.
    pub language: String,
    /// Synthesis voice name; empty selects the provider default.
    pub voice: String,
    /// Seconds of playback wait per word of synthesized text.
    pub playback_secs_per_word: f64,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            language: "en-US".to_string(),
            voice: String::new(),
            playback_secs_per_word: 0.3,
        }
    }
}

/// API credentials, supplied via environment variables only.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Key for the generative-text API (`GEMINI_API_KEY`).
    pub gemini_api_key: String,
    /// Key for the maps/places API (`GOOGLE_MAPS_API_KEY`).
    pub maps_api_key: String,
}

impl Credentials {
    /// Read both required credentials from the environment.
    ///
    /// Fails with [`SalusError::MissingCredential`] naming the first missing
    /// variable; component initialization is the one fatal path at startup.
    pub fn from_env() -> Result<Self> {
        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| SalusError::MissingCredential("GEMINI_API_KEY"))?;
        let maps_api_key = std::env::var("GOOGLE_MAPS_API_KEY")
            .map_err(|_| SalusError::MissingCredential("GOOGLE_MAPS_API_KEY"))?;
        Ok(Self {
            gemini_api_key,
            maps_api_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = SalusConfig::default();
        assert_eq!(config.general.data_dir, "~/.salus/data");
        assert_eq!(config.general.log_level, "info");
        assert!(!config.general.debug);
        assert_eq!(config.upload.max_size_bytes, 10 * 1024 * 1024);
        assert_eq!(
            config.upload.allowed_extensions,
            vec![".pdf", ".jpg", ".jpeg", ".png"]
        );
        assert_eq!(config.chat.model, "gemini-1.5-pro");
        assert_eq!(config.chat.cooldown_secs, 2);
        assert_eq!(config.location.radius_m, 5000);
        assert_eq!(config.location.category, "hospital");
        assert!(!config.voice.enabled);
        assert_eq!(config.voice.language, "en-US");
        assert!((config.voice.playback_secs_per_word - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
data_dir = "/custom/data"
log_level = "debug"
debug = true

[upload]
max_size_bytes = 1048576
allowed_extensions = [".pdf"]

[chat]
model = "gemini-1.5-flash"
cooldown_secs = 5

[location]
radius_m = 2000
category = "pharmacy"

[voice]
enabled = true
language = "en-GB"
voice = "en-GB-Standard-A"
playback_secs_per_word = 0.25
"#;
        let file = create_temp_config(content);
        let config = SalusConfig::load(file.path()).unwrap();
        assert_eq!(config.general.data_dir, "/custom/data");
        assert!(config.general.debug);
        assert_eq!(config.upload.max_size_bytes, 1_048_576);
        assert_eq!(config.upload.allowed_extensions, vec![".pdf"]);
        assert_eq!(config.chat.model, "gemini-1.5-flash");
        assert_eq!(config.chat.cooldown_secs, 5);
        assert_eq!(config.location.radius_m, 2000);
        assert_eq!(config.location.category, "pharmacy");
        assert!(config.voice.enabled);
        assert_eq!(config.voice.voice, "en-GB-Standard-A");
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let content = r#"
[chat]
cooldown_secs = 10
"#;
        let file = create_temp_config(content);
        let config = SalusConfig::load(file.path()).unwrap();
        assert_eq!(config.chat.cooldown_secs, 10);
        // Remaining fields use defaults
        assert_eq!(config.chat.model, "gemini-1.5-pro");
        assert_eq!(config.location.radius_m, 5000);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = SalusConfig::load_or_default(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.general.data_dir, "~/.salus/data");
    }

    #[test]
    fn test_load_or_default_invalid_toml() {
        let file = create_temp_config("this is {{ not valid TOML");
        let config = SalusConfig::load_or_default(file.path());
        assert_eq!(config.chat.cooldown_secs, 2);
    }

    #[test]
    fn test_load_invalid_toml_errors() {
        let file = create_temp_config("this is {{ not valid TOML");
        assert!(SalusConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let config = SalusConfig::default();
        config.save(&path).unwrap();
        assert!(path.exists());

        let reloaded = SalusConfig::load(&path).unwrap();
        assert_eq!(reloaded.general.data_dir, config.general.data_dir);
        assert_eq!(reloaded.chat.cooldown_secs, config.chat.cooldown_secs);
        assert_eq!(
            reloaded.upload.allowed_extensions,
            config.upload.allowed_extensions
        );
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = SalusConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let deserialized: SalusConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(deserialized.chat.model, config.chat.model);
        assert_eq!(deserialized.voice.language, config.voice.language);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let file = create_temp_config("");
        let config = SalusConfig::load(file.path()).unwrap();
        assert_eq!(config.general.data_dir, "~/.salus/data");
        assert_eq!(config.location.category, "hospital");
    }
}
