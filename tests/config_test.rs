//! Config layering: documented defaults, file values, environment overrides.

use runlog::{Config, Error};
use serial_test::serial;
use std::fs;

fn write_config(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("runlog.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
#[serial]
fn missing_file_yields_documented_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_from_file(&dir.path().join("runlog.toml")).unwrap();

    assert!(!config.logging.enable);
    assert_eq!(config.logging.directory, "command");
    assert_eq!(config.logging.file.name_format, "%Y-%m-%d");
    assert_eq!(config.logging.file.extension, "log");
    assert_eq!(config.logging.file.mode, 0o666);
}

#[test]
#[serial]
fn file_values_override_defaults_and_gaps_keep_them() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
[logging]
enable = true
directory = "jobs"

[logging.file]
extension = "txt"
mode = 0o640
"#,
    );

    let config = Config::load_from_file(&path).unwrap();

    assert!(config.logging.enable);
    assert_eq!(config.logging.directory, "jobs");
    assert_eq!(config.logging.file.extension, "txt");
    assert_eq!(config.logging.file.mode, 0o640);
    // untouched keys keep their defaults
    assert_eq!(config.logging.file.name_format, "%Y-%m-%d");
    assert_eq!(config.logging.base_directory.to_str(), Some("storage/logs"));
}

#[test]
#[serial]
fn environment_overrides_file_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[logging]\ndirectory = \"jobs\"\n");

    unsafe {
        std::env::set_var("RUNLOG_LOGGING__DIRECTORY", "cron");
        std::env::set_var("RUNLOG_LOGGING__ENABLE", "true");
    }
    let config = Config::load_from_file(&path);
    unsafe {
        std::env::remove_var("RUNLOG_LOGGING__DIRECTORY");
        std::env::remove_var("RUNLOG_LOGGING__ENABLE");
    }

    let config = config.unwrap();
    assert_eq!(config.logging.directory, "cron");
    assert!(config.logging.enable);
}

#[test]
#[serial]
fn invalid_mode_fails_at_load_time() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[logging.file]\nmode = 99999\n");

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
#[serial]
fn owner_and_group_are_read_when_set() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        "[logging.file]\nowner = \"www-data\"\ngroup = \"adm\"\n",
    );

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.logging.file.owner.as_deref(), Some("www-data"));
    assert_eq!(config.logging.file.group.as_deref(), Some("adm"));
}
