/*!
 * Tests for application configuration
 */

use std::str::FromStr;

use sinsub::app_config::{Config, ConversionMode, LogLevel};

use crate::common;

/// Defaults must validate and carry the expected values
#[test]
fn test_defaultConfig_shouldValidate() {
    let config = Config::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.conversion.mode, ConversionMode::Auto);
    assert!(!config.conversion.force_overwrite);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.transcription.endpoint.starts_with("http://"));
}

/// A missing config file is created with defaults
#[test]
fn test_fromFile_withMissingFile_shouldCreateDefault() {
    let temp_dir = common::create_temp_dir().unwrap();
    let config_path = temp_dir.path().join("conf.json");

    let config = Config::from_file(&config_path).unwrap();

    assert!(config_path.exists());
    assert_eq!(config.conversion.mode, ConversionMode::Auto);
}

/// Saved configuration round-trips through JSON
#[test]
fn test_saveAndLoad_withModifiedConfig_shouldRoundTrip() {
    let temp_dir = common::create_temp_dir().unwrap();
    let config_path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.conversion.mode = ConversionMode::Full;
    config.transcription.max_retries = 7;
    config.log_level = LogLevel::Debug;
    config.save(&config_path).unwrap();

    let loaded = Config::from_file(&config_path).unwrap();

    assert_eq!(loaded.conversion.mode, ConversionMode::Full);
    assert_eq!(loaded.transcription.max_retries, 7);
    assert_eq!(loaded.log_level, LogLevel::Debug);
}

/// Missing fields in the JSON fall back to serde defaults
#[test]
fn test_fromFile_withPartialJson_shouldApplyDefaults() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let config_path =
        common::create_test_file(&dir, "conf.json", r#"{"conversion": {"mode": "full"}}"#)
            .unwrap();

    let config = Config::from_file(&config_path).unwrap();

    assert_eq!(config.conversion.mode, ConversionMode::Full);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.transcription.endpoint.starts_with("http://"));
}

/// Validation rejects broken endpoints
#[test]
fn test_validate_withBadEndpoint_shouldFail() {
    let mut config = Config::default();
    config.transcription.endpoint = String::new();
    assert!(config.validate().is_err());

    config.transcription.endpoint = "ftp://somewhere".to_string();
    assert!(config.validate().is_err());
}

/// Conversion mode parses from its lowercase names only
#[test]
fn test_conversionMode_fromStr_shouldParseKnownNames() {
    assert_eq!(ConversionMode::from_str("auto").unwrap(), ConversionMode::Auto);
    assert_eq!(ConversionMode::from_str("FULL").unwrap(), ConversionMode::Full);
    assert!(ConversionMode::from_str("sideways").is_err());
}
