use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::errors::AppError;
use crate::policy::SlugSettings;

/// Application configuration module
/// This module handles the configuration file that plays the role of the
/// host's option store: translation credentials, target language and the
/// slug pattern, plus the settings of the bundled command line host.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Translation service settings
    #[serde(default)]
    pub translation: TranslationSettings,

    /// Slug generation settings
    #[serde(default)]
    pub slug: SlugConfig,

    /// Path of the SQLite content database (defaults to the user data dir)
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation service section of the configuration file
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationSettings {
    /// API key for the translation service; empty disables translation
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Language the titles are translated into
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Base URL of the translation service
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            target_language: default_target_language(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TranslationSettings {
    /// The per-call part of the settings handed to the translator
    pub fn translation_config(&self) -> TranslationConfig {
        TranslationConfig {
            api_key: self.api_key.clone(),
            target_language: self.target_language.clone(),
        }
    }
}

/// Credentials and target language read on every translation attempt
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TranslationConfig {
    /// API key; empty means "do not translate"
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Target language code (ISO 639)
    #[serde(default = "default_target_language")]
    pub target_language: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            target_language: default_target_language(),
        }
    }
}

impl TranslationConfig {
    pub fn new(api_key: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            target_language: target_language.into(),
        }
    }

    /// Whether a translation request should be attempted at all
    pub fn is_enabled(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Slug format applied to new content
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlugPattern {
    /// `hello-world`
    #[default]
    #[serde(rename = "title")]
    PlainTitle,
    /// `20240305_hello-world`
    #[serde(rename = "date_title")]
    DatePrefixedTitle,
}

impl SlugPattern {
    /// Map a stored option value to a pattern.
    /// Anything other than `date_title` reads as the plain title pattern.
    pub fn from_option_value(value: &str) -> Self {
        match value.trim() {
            "date_title" => Self::DatePrefixedTitle,
            _ => Self::PlainTitle,
        }
    }

    // @returns: Value as stored in the configuration file
    pub fn as_option_value(&self) -> &'static str {
        match self {
            Self::PlainTitle => "title",
            Self::DatePrefixedTitle => "date_title",
        }
    }
}

impl std::fmt::Display for SlugPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_option_value())
    }
}

impl std::str::FromStr for SlugPattern {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "title" => Ok(Self::PlainTitle),
            "date_title" => Ok(Self::DatePrefixedTitle),
            _ => Err(anyhow::anyhow!("Invalid slug pattern: {}", s)),
        }
    }
}

impl<'de> Deserialize<'de> for SlugPattern {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_option_value(&value))
    }
}

/// Slug section of the configuration file
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SlugConfig {
    /// Pattern used when a new slug is generated
    #[serde(default)]
    pub convert_pattern: SlugPattern,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_endpoint() -> String {
    "https://translation.googleapis.com".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> std::result::Result<(), AppError> {
        crate::language_utils::validate_language_code(&self.translation.target_language)
            .map_err(|e| AppError::Config(e.to_string()))?;

        if self.translation.timeout_secs == 0 {
            return Err(AppError::Config(
                "Translation timeout must be greater than zero".to_string(),
            ));
        }

        url::Url::parse(&self.translation.endpoint).map_err(|e| {
            AppError::Config(format!(
                "Invalid translation endpoint '{}': {}",
                self.translation.endpoint, e
            ))
        })?;

        Ok(())
    }

    /// Read a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Read a configuration file, writing a default one if it does not exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::from_file(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            translation: TranslationSettings::default(),
            slug: SlugConfig::default(),
            database_path: None,
            log_level: LogLevel::default(),
        }
    }
}

/// Source of the settings a slug decision needs.
///
/// Implementations are queried on every decision, so changes to the
/// underlying store take effect on the next save without a restart.
pub trait ConfigProvider: Send + Sync {
    /// Credentials and target language for the translator
    fn translation_config(&self) -> TranslationConfig;

    /// Pattern applied to newly generated slugs
    fn slug_pattern(&self) -> SlugPattern;

    /// Everything one decision needs. Stores that can change between the two
    /// reads above should override this with a single read.
    fn settings(&self) -> SlugSettings {
        SlugSettings::new(self.translation_config(), self.slug_pattern())
    }
}

/// Fixed configuration, for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    pub translation: TranslationConfig,
    pub pattern: SlugPattern,
}

impl StaticConfig {
    pub fn new(translation: TranslationConfig, pattern: SlugPattern) -> Self {
        Self { translation, pattern }
    }
}

impl ConfigProvider for StaticConfig {
    fn translation_config(&self) -> TranslationConfig {
        self.translation.clone()
    }

    fn slug_pattern(&self) -> SlugPattern {
        self.pattern
    }
}

/// Configuration backed by a JSON file that is re-read on every query
#[derive(Debug, Clone)]
pub struct JsonFileConfig {
    path: PathBuf,
}

impl JsonFileConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Missing or unreadable file yields the defaults
    fn load(&self) -> Config {
        match Config::from_file(&self.path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Using default slug settings: {:#}", e);
                Config::default()
            }
        }
    }
}

impl ConfigProvider for JsonFileConfig {
    fn translation_config(&self) -> TranslationConfig {
        self.load().translation.translation_config()
    }

    fn slug_pattern(&self) -> SlugPattern {
        self.load().slug.convert_pattern
    }

    fn settings(&self) -> SlugSettings {
        let config = self.load();
        SlugSettings::new(config.translation.translation_config(), config.slug.convert_pattern)
    }
}
