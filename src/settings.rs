//! User settings for summora.
//!
//! Flat key-value configuration loaded from `summora.toml`, with environment
//! variable overrides for API keys. Every field is optional; absent fields
//! fall back to documented defaults so a missing config file still yields a
//! usable `Settings` (keys can come from the environment alone).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("no API key configured for provider: {0}")]
    MissingApiKey(Provider),
}

/// LLM API vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    OpenAi,
    Anthropic,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::OpenAi => write!(f, "openai"),
            Provider::Anthropic => write!(f, "anthropic"),
        }
    }
}

/// Target size of the generated summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

/// Shape of the generated summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryType {
    /// Structured prose with bullet highlights
    #[default]
    Full,
    /// Bullet points only
    Takeaways,
}

impl fmt::Display for SummaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryType::Full => write!(f, "full"),
            SummaryType::Takeaways => write!(f, "takeaways"),
        }
    }
}

/// Root settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Which provider to summarise with
    pub api_provider: Provider,
    pub openai_api_key: Option<String>,
    /// Model identifier override for OpenAI
    pub openai_model: Option<String>,
    pub anthropic_api_key: Option<String>,
    /// Model identifier override for Anthropic
    pub anthropic_model: Option<String>,
    pub summary_length: SummaryLength,
    pub summary_type: SummaryType,
    /// Base path for the history store
    pub storage_path: Option<PathBuf>,
}

impl Settings {
    /// Load settings from the default location (`summora.toml` in cwd or
    /// `~/.config/summora/`). A missing file yields plain defaults.
    pub fn load() -> Result<Self, SettingsError> {
        match Self::find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default().with_env_overrides()),
        }
    }

    /// Load settings from a specific path
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings.with_env_overrides())
    }

    /// Override API keys from environment variables
    fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.openai_api_key = Some(key);
        }
        if let Ok(key) = std::env::var("ANTHROPIC_API_KEY") {
            self.anthropic_api_key = Some(key);
        }
        self
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let local_config = PathBuf::from("summora.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config").join("summora").join("summora.toml");
            if home_config.exists() {
                return Some(home_config);
            }
        }

        None
    }

    /// Get the API key for the selected provider. A blank key counts as
    /// missing.
    pub fn api_key(&self) -> Result<&str, SettingsError> {
        let key = match self.api_provider {
            Provider::OpenAi => self.openai_api_key.as_deref(),
            Provider::Anthropic => self.anthropic_api_key.as_deref(),
        };
        key.filter(|k| !k.trim().is_empty())
            .ok_or(SettingsError::MissingApiKey(self.api_provider))
    }

    /// Model override for the selected provider, if any
    pub fn model(&self) -> Option<&str> {
        match self.api_provider {
            Provider::OpenAi => self.openai_model.as_deref(),
            Provider::Anthropic => self.anthropic_model.as_deref(),
        }
    }

    /// Where the history store lives
    pub fn storage_path(&self) -> PathBuf {
        self.storage_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("./data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn absent_fields_fall_back_to_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.api_provider, Provider::OpenAi);
        assert_eq!(settings.summary_length, SummaryLength::Medium);
        assert_eq!(settings.summary_type, SummaryType::Full);
        assert!(settings.model().is_none());
    }

    #[test]
    fn partial_config_parses() {
        let settings: Settings = toml::from_str(
            r#"
            api_provider = "anthropic"
            anthropic_api_key = "sk-ant-test"
            summary_type = "takeaways"
            "#,
        )
        .unwrap();
        assert_eq!(settings.api_provider, Provider::Anthropic);
        assert_eq!(settings.api_key().unwrap(), "sk-ant-test");
        assert_eq!(settings.summary_type, SummaryType::Takeaways);
        assert_eq!(settings.summary_length, SummaryLength::Medium);
    }

    #[test]
    fn missing_key_is_an_error() {
        let settings = Settings::default();
        assert!(matches!(
            settings.api_key(),
            Err(SettingsError::MissingApiKey(Provider::OpenAi))
        ));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let settings = Settings {
            openai_api_key: Some("   ".to_string()),
            ..Settings::default()
        };
        assert!(settings.api_key().is_err());
    }

    #[test]
    fn key_lookup_follows_the_selected_provider() {
        let settings = Settings {
            api_provider: Provider::Anthropic,
            openai_api_key: Some("sk-openai".to_string()),
            ..Settings::default()
        };
        // An OpenAI key does not satisfy the Anthropic provider
        assert!(matches!(
            settings.api_key(),
            Err(SettingsError::MissingApiKey(Provider::Anthropic))
        ));
    }

    #[test]
    fn load_from_reads_a_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_provider = \"openai\"").unwrap();
        writeln!(file, "openai_model = \"gpt-4o-mini\"").unwrap();
        writeln!(file, "summary_length = \"long\"").unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.model(), Some("gpt-4o-mini"));
        assert_eq!(settings.summary_length, SummaryLength::Long);
    }
}
