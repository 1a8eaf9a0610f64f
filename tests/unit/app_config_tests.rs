/*!
 * Tests for configuration loading and the configuration providers
 */

use std::str::FromStr;

use slugline::app_config::{
    Config, ConfigProvider, JsonFileConfig, LogLevel, SlugPattern, StaticConfig, TranslationConfig,
};
use slugline::errors::AppError;

use crate::common::{create_temp_dir, write_config};

#[test]
fn test_default_config_shouldDisableTranslation() {
    let config = Config::default();

    assert_eq!(config.translation.api_key, "");
    assert_eq!(config.translation.target_language, "en");
    assert_eq!(config.translation.endpoint, "https://translation.googleapis.com");
    assert_eq!(config.translation.timeout_secs, 10);
    assert_eq!(config.slug.convert_pattern, SlugPattern::PlainTitle);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(!config.translation.translation_config().is_enabled());
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_withInvalidLanguage_shouldFail() {
    let mut config = Config::default();
    config.translation.target_language = "xx".to_string();

    assert!(matches!(config.validate(), Err(AppError::Config(_))));
}

#[test]
fn test_validate_withZeroTimeout_shouldFail() {
    let mut config = Config::default();
    config.translation.timeout_secs = 0;

    assert!(matches!(config.validate(), Err(AppError::Config(_))));
}

#[test]
fn test_validate_withBadEndpoint_shouldFail() {
    let mut config = Config::default();
    config.translation.endpoint = "not a url".to_string();

    assert!(matches!(config.validate(), Err(AppError::Config(_))));
}

#[test]
fn test_slugPattern_fromOptionValue_shouldBeLenient() {
    assert_eq!(SlugPattern::from_option_value("date_title"), SlugPattern::DatePrefixedTitle);
    assert_eq!(SlugPattern::from_option_value(" date_title "), SlugPattern::DatePrefixedTitle);
    assert_eq!(SlugPattern::from_option_value("title"), SlugPattern::PlainTitle);
    assert_eq!(SlugPattern::from_option_value("something"), SlugPattern::PlainTitle);
    assert_eq!(SlugPattern::from_option_value(""), SlugPattern::PlainTitle);
}

#[test]
fn test_slugPattern_fromStr_shouldRejectUnknownValues() {
    assert_eq!(SlugPattern::from_str("date_title").unwrap(), SlugPattern::DatePrefixedTitle);
    assert!(SlugPattern::from_str("date").is_err());
    assert_eq!(SlugPattern::DatePrefixedTitle.to_string(), "date_title");
}

#[test]
fn test_config_deserialize_withUnknownPattern_shouldReadPlainTitle() {
    let json = r#"{"slug": {"convert_pattern": "year_title"}}"#;

    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.slug.convert_pattern, SlugPattern::PlainTitle);
    assert_eq!(config.translation.target_language, "en");
}

#[test]
fn test_translationConfig_isEnabled_shouldTrimKey() {
    assert!(TranslationConfig::new("abc", "en").is_enabled());
    assert!(!TranslationConfig::new(" \t", "en").is_enabled());
    assert!(!TranslationConfig::default().is_enabled());
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");

    let config = Config::load_or_create(&path).unwrap();

    assert!(path.exists());
    assert_eq!(config.slug.convert_pattern, SlugPattern::PlainTitle);
    let reread = Config::from_file(&path).unwrap();
    assert_eq!(reread.translation.endpoint, config.translation.endpoint);
}

#[test]
fn test_fromFile_withInvalidJson_shouldFail() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_jsonFileConfig_shouldRereadFileOnEveryQuery() {
    let dir = create_temp_dir().unwrap();
    let mut config = Config::default();
    config.translation.api_key = "first".to_string();
    let path = write_config(dir.path(), &config).unwrap();
    let provider = JsonFileConfig::new(&path);

    assert_eq!(provider.slug_pattern(), SlugPattern::PlainTitle);
    assert_eq!(provider.translation_config().api_key, "first");

    config.slug.convert_pattern = SlugPattern::DatePrefixedTitle;
    config.translation.api_key = "second".to_string();
    write_config(dir.path(), &config).unwrap();

    assert_eq!(provider.slug_pattern(), SlugPattern::DatePrefixedTitle);
    assert_eq!(provider.translation_config().api_key, "second");
}

#[test]
fn test_jsonFileConfig_withMissingFile_shouldUseDefaults() {
    let dir = create_temp_dir().unwrap();
    let provider = JsonFileConfig::new(dir.path().join("absent.json"));

    assert_eq!(provider.slug_pattern(), SlugPattern::PlainTitle);
    assert_eq!(provider.translation_config(), TranslationConfig::default());
}

#[test]
fn test_staticConfig_shouldReturnGivenValues() {
    let provider = StaticConfig::new(
        TranslationConfig::new("key", "de"),
        SlugPattern::DatePrefixedTitle,
    );

    assert_eq!(provider.translation_config().target_language, "de");
    assert_eq!(provider.slug_pattern(), SlugPattern::DatePrefixedTitle);
}

#[test]
fn test_jsonFileConfig_settings_shouldReadBothValuesFromOneFile() {
    let dir = create_temp_dir().unwrap();
    let mut config = Config::default();
    config.translation.api_key = "file-key".to_string();
    config.translation.target_language = "de".to_string();
    config.slug.convert_pattern = SlugPattern::DatePrefixedTitle;
    let path = write_config(dir.path(), &config).unwrap();

    let settings = JsonFileConfig::new(&path).settings();

    assert_eq!(settings.translation, TranslationConfig::new("file-key", "de"));
    assert_eq!(settings.pattern, SlugPattern::DatePrefixedTitle);
}

#[test]
fn test_configProvider_defaultSettings_shouldCombineGetters() {
    let provider = StaticConfig::new(TranslationConfig::new("k", "fr"), SlugPattern::PlainTitle);

    let settings = provider.settings();

    assert_eq!(settings.translation.target_language, "fr");
    assert_eq!(settings.pattern, SlugPattern::PlainTitle);
}
