//! Application configuration for MoodMind.
//!
//! Configuration is read from `~/.config/moodmind/config.toml`. Every field
//! has a default, so a missing or empty file yields a usable configuration.
//!
//! ```toml
//! locale = "en"
//!
//! [speech]
//! enabled = true
//! voices = ["en-US"]
//! fallback_voice = "Indonesian Female"
//!
//! [screening]
//! suspected_from = 2
//! at_risk_from = 5
//!
//! [logging]
//! filter = "info"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MoodmindError, Result};
use crate::locale::Locale;
use crate::script::RiskThresholds;

/// Root configuration structure for config.toml
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Locale used when a session starts.
    pub locale: Locale,
    pub speech: SpeechConfig,
    /// Score thresholds for the verdict categories.
    pub screening: RiskThresholds,
    pub logging: LoggingConfig,
}

/// Voice output settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SpeechConfig {
    /// When false, assistant turns are never spoken.
    pub enabled: bool,
    /// BCP-47 tags of the voices the speech backend offers.
    pub voices: Vec<String>,
    /// Voice name handed to the fallback synthesizer.
    pub fallback_voice: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            voices: vec!["en-US".to_string()],
            fallback_voice: "Indonesian Female".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the configuration from the default location.
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    /// Loads the configuration from `path`.
    ///
    /// A missing or blank file returns the defaults. The loaded thresholds
    /// are validated before the configuration is returned.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("[AppConfig] No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: AppConfig = toml::from_str(&content)?;
        config.screening.validate()?;

        tracing::debug!(
            "[AppConfig] Loaded config from {}: locale={}, speech_enabled={}",
            path.display(),
            config.locale,
            config.speech.enabled
        );

        Ok(config)
    }

    /// Returns the path to the configuration file: ~/.config/moodmind/config.toml
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MoodmindError::config("Could not determine home directory"))?;
        Ok(home.join(".config").join("moodmind").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.locale, Locale::Id);
        assert!(config.speech.enabled);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "locale = \"en\"\n\n[speech]\nenabled = false\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.locale, Locale::En);
        assert!(!config.speech.enabled);
        assert_eq!(config.speech.fallback_voice, "Indonesian Female");
        assert_eq!(config.screening, RiskThresholds::default());
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_invalid_thresholds_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[screening]\nsuspected_from = 6\nat_risk_from = 3\n").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, MoodmindError::Config(_)));
    }

    #[test]
    fn test_unknown_locale_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "locale = \"fr\"\n").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, MoodmindError::Config(_)));
    }

    #[test]
    fn test_blank_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "   \n").unwrap();

        assert_eq!(AppConfig::load_from(&path).unwrap(), AppConfig::default());
    }
}
