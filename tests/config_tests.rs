use propath::config::Config;
use propath::expression::{Accessor, Expression};
use tempfile::TempDir;

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert!(!config.boolean_getters);
    assert_eq!(config.log_level, "warn");
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "boolean_getters = true\nlog_level = \"debug\"\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert!(config.boolean_getters);
    assert_eq!(config.log_level, "debug");
}

#[test]
fn test_load_from_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let result = Config::load_from(&dir.path().join("missing.toml"));
    assert!(result.is_err());
}

#[test]
fn test_load_from_invalid_toml_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "boolean_getters = \"maybe\"").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));
}

#[test]
fn test_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let config = Config {
        boolean_getters: true,
        log_level: "trace".to_string(),
    };

    config.save_to(&path).unwrap();
    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded, config);
}

#[test]
fn test_config_drives_resolver() {
    struct Account;

    let config = Config {
        boolean_getters: true,
        ..Config::default()
    };
    let exp = Expression::<Account>::with_resolver(config.resolver_options())
        .append_field(Accessor::method("isEnabled"))
        .unwrap();
    assert_eq!(exp.render().unwrap(), "enabled");
}

#[test]
fn test_load_or_default_without_file() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_or_default_reports_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "log_level = [").unwrap();

    assert!(Config::load_or_default(&path).is_err());
}
