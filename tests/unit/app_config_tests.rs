/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use subdialogs::app_config::{Config, LogLevel};
use subdialogs::file_utils::Charset;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.subtitles_path, "subtitles");
    assert_eq!(config.dialogs.fps, 25);
    assert_eq!(config.dialogs.max_gap_between_dialogs, 5);
    assert_eq!(config.seed, 1337);
    assert_eq!(
        config.encodings,
        vec![
            Charset::Utf8,
            Charset::Windows1250,
            Charset::Iso8859_1,
            Charset::Iso8859_2,
            Charset::UsAscii
        ]
    );
    assert_eq!(config.preprocessing.watermarks, vec!["napisy24", "hatak"]);
    assert_eq!(config.concurrent_files, 4);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withInvalidValues_shouldFail() {
    let mut config = Config::default();
    config.dialogs.fps = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.encodings.clear();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.concurrent_files = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.preprocessing.watermarks.push("  ".to_string());
    assert!(config.validate().is_err());

    // a zero gap is a valid, strict threshold
    let mut config = Config::default();
    config.dialogs.max_gap_between_dialogs = 0;
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;

    assert!(path.exists());
    assert_eq!(config, Config::default());
    assert_eq!(Config::from_file(&path)?, config);
    Ok(())
}

#[test]
fn test_from_file_withPartialJson_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{ "subtitles_path": "/data/napisy", "dialogs": { "max_gap_between_dialogs": 2 }, "log_level": "debug" }"#,
    )?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.subtitles_path, "/data/napisy");
    assert_eq!(config.dialogs.max_gap_between_dialogs, 2);
    assert_eq!(config.dialogs.fps, 25);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Debug);
    Ok(())
}

#[test]
fn test_from_file_withMalformedJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::from_file(&path).is_err());
    Ok(())
}
