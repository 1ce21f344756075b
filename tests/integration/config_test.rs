use procwatch::core::config::Config;
use procwatch::ProcwatchError;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.refresh_interval(), Duration::from_secs(5));
    assert!(!config.auto_refresh);
    assert_eq!(config.name_width, 30);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_missing_file_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_from(&temp_dir.path().join("config.json")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_partial_file_keeps_other_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, r#"{ "refresh_interval_secs": 2, "auto_refresh": true }"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.refresh_interval(), Duration::from_secs(2));
    assert!(config.auto_refresh);
    assert_eq!(config.name_width, 30);
    assert_eq!(config.ui_tick(), Duration::from_millis(100));
}

#[test]
fn test_config_corrupt_file_falls_back_to_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, "not json at all {").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_non_utf8_file_falls_back_to_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, [0xff, 0xfe, b'{', b'}']).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_path_that_cannot_be_read_falls_back_to_default() {
    // A directory exists but reading it as a file fails
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::create_dir(&path).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_zero_interval_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, r#"{ "refresh_interval_secs": 0 }"#).unwrap();

    match Config::load_from(&path) {
        Err(ProcwatchError::Config(msg)) => assert!(msg.contains("refresh_interval_secs")),
        other => panic!("expected config error, got {:?}", other),
    }
}
