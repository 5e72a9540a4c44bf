//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use penmark_analyzer::AnalyzerConfig;
use penmark_domain::{AnalysisMode, AnalysisOptions, AUTO_LANGUAGE};
use penmark_llm::GeminiProvider;
use penmark_llm::gemini::{API_KEY_ENV_VARS, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Model backend settings
    #[serde(default)]
    pub provider: ProviderSettings,

    /// Default analysis options
    #[serde(default)]
    pub analysis: AnalysisSettings,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Model backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Transport timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Default analysis options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Language hint ("auto", "en", "vi", "other", or free text)
    #[serde(default = "default_language")]
    pub language: String,

    /// Analysis mode
    #[serde(default)]
    pub mode: AnalysisMode,

    /// Maximum input length in characters
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// REPL history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Sectioned, colored report
    Pretty,
    /// JSON format
    Json,
    /// Quiet (conclusion and probability only)
    Quiet,
}

impl Config {
    /// Directory holding the config file and REPL history.
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".penmark"))
    }

    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if absent.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::path()?)
    }

    /// Load configuration from `path`, or defaults if the file does not exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check value constraints.
    pub fn validate(&self) -> Result<()> {
        if self.provider.model.trim().is_empty() {
            return Err(CliError::Config("provider.model must not be empty".into()));
        }
        if self.provider.timeout_secs == 0 {
            return Err(CliError::Config("provider.timeout_secs must be greater than 0".into()));
        }
        self.analyzer_config().validate().map_err(CliError::Config)
    }

    /// Analyzer settings derived from this configuration.
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            max_text_length: self.analysis.max_text_length,
        }
    }

    /// Default options for a new analysis session.
    pub fn default_options(&self) -> AnalysisOptions {
        AnalysisOptions::new(self.analysis.language.clone(), self.analysis.mode)
    }

    /// Transport timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.provider.timeout_secs)
    }

    /// Resolve the API key from the environment.
    ///
    /// The configured variable is consulted first, then the standard ones.
    pub fn api_key(&self) -> Result<String> {
        std::env::var(&self.provider.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(GeminiProvider::api_key_from_env)
            .ok_or_else(|| {
                CliError::Config(format!(
                    "No API key found. Set the {} environment variable.",
                    self.provider.api_key_env
                ))
            })
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            language: default_language(),
            mode: AnalysisMode::default(),
            max_text_length: default_max_text_length(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Pretty,
            history_size: 1000,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    API_KEY_ENV_VARS[0].to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_language() -> String {
    AUTO_LANGUAGE.to_string()
}

fn default_max_text_length() -> usize {
    AnalyzerConfig::default().max_text_length
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Pretty
}

fn default_history_size() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.provider.model, DEFAULT_MODEL);
        assert_eq!(config.provider.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.analysis.language, "auto");
        assert_eq!(config.analysis.mode, AnalysisMode::Full);
        assert!(config.settings.color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml = r#"
            [provider]
            model = "gemini-2.0-flash"

            [analysis]
            language = "vi"
            mode = "light"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.provider.model, "gemini-2.0-flash");
        assert_eq!(config.provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.analysis.mode, AnalysisMode::Light);
        assert_eq!(config.default_options().language_label(), "vi");
        assert_eq!(config.settings.format, OutputFormat::Pretty);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.settings.format = OutputFormat::Json;
        config.analysis.max_text_length = 2000;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.settings.format, OutputFormat::Json);
        assert_eq!(loaded.analyzer_config().max_text_length, 2000);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.provider.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[provider]\ntimeout_secs = 0\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(CliError::Config(_))));

        fs::write(&path, "[analysis]\nmax_text_length = 0\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(CliError::Config(_))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[provider\nmodel = ").unwrap();
        assert!(matches!(Config::load_from(&path), Err(CliError::Toml(_))));
    }
}
