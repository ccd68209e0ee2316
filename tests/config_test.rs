use hublink_cli::config::{BehaviorConfig, Config, PopupConfig, SessionConfig};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_default_has_expected_values() {
    let config = Config::default();

    // Check backend defaults
    assert_eq!(config.backend.base_url, "http://localhost:8000");
    assert_eq!(config.backend.timeout_secs, 30);

    // Check session defaults
    assert_eq!(config.session.user, "TestUser");
    assert_eq!(config.session.org, "TestOrg");

    // Check popup defaults
    assert_eq!(config.popup.title, "HubSpot Authorization");
    assert_eq!(config.popup.width, 600);
    assert_eq!(config.popup.height, 700);

    // Check behavior defaults
    assert_eq!(config.behavior.poll_interval_ms, 500);
    assert_eq!(config.behavior.idle_poll_ms, 50);
    assert_eq!(config.behavior.scroll_page_size, 10);
}

#[test]
fn test_session_config_default() {
    let session = SessionConfig::default();
    assert_eq!(session.user, "TestUser");
    assert_eq!(session.org, "TestOrg");
}

#[test]
fn test_popup_config_default() {
    let popup = PopupConfig::default();
    assert_eq!(popup.title, "HubSpot Authorization");
    assert_eq!(popup.width, 600);
    assert_eq!(popup.height, 700);
}

#[test]
fn test_behavior_config_default() {
    let behavior = BehaviorConfig::default();
    assert_eq!(behavior.poll_interval_ms, 500);
    assert_eq!(behavior.idle_poll_ms, 50);
    assert_eq!(behavior.scroll_page_size, 10);
}

#[test]
fn test_save_and_load_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");

    let mut config = Config::default();
    config.backend.base_url = "http://integrations.internal:9000".to_string();
    config.session.user = "alice".to_string();
    config.behavior.poll_interval_ms = 250;

    config.save_to_path(&path).unwrap();
    let loaded = Config::load_from_path(&path).unwrap();

    assert_eq!(loaded.backend.base_url, "http://integrations.internal:9000");
    assert_eq!(loaded.session.user, "alice");
    assert_eq!(loaded.behavior.poll_interval_ms, 250);
    // Untouched sections survive the roundtrip with their defaults
    assert_eq!(loaded.popup.width, 600);
}

#[test]
fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("dir").join("config.toml");

    Config::default().save_to_path(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_load_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nonexistent.toml");
    assert!(Config::load_from_path(&path).is_err());
}

#[test]
fn test_load_partial_file_fills_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
            [session]
            user = "bob"

            [behavior]
            poll_interval_ms = 100
        "#,
    )
    .unwrap();

    let config = Config::load_from_path(&path).unwrap();
    assert_eq!(config.session.user, "bob");
    assert_eq!(config.session.org, "TestOrg");
    assert_eq!(config.behavior.poll_interval_ms, 100);
    assert_eq!(config.backend.base_url, "http://localhost:8000");
}

#[test]
fn test_load_invalid_toml_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "this is not [valid toml").unwrap();
    assert!(Config::load_from_path(&path).is_err());
}

#[test]
fn test_default_path_ends_with_expected_components() {
    if let Some(path) = Config::default_path() {
        let s = path.to_string_lossy();
        assert!(s.ends_with("hublink-cli/config.toml") || s.ends_with("hublink-cli\\config.toml"));
    }
}
