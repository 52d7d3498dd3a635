// tests/config_test.rs
use std::io::Write;
use std::path::PathBuf;

use tag_next_build::config::{load_config, Config};
use tag_next_build::TagNextError;
use tempfile::NamedTempFile;

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[discovery]
lookback = 3

[first_version]
default_base = "1.0"

[flutter]
manifest = "app/pubspec.yaml"
run_pub_get = false
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path())).unwrap();
    assert_eq!(config.discovery.lookback, 3);
    assert_eq!(config.first_version.default_base, "1.0");
    assert_eq!(config.flutter.manifest, PathBuf::from("app/pubspec.yaml"));
    assert!(!config.flutter.run_pub_get);
}

#[test]
fn test_load_partial_file_fills_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[discovery]\nlookback = 20\n").unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path())).unwrap();
    assert_eq!(config.discovery.lookback, 20);
    assert_eq!(config.first_version, Config::default().first_version);
    assert_eq!(config.flutter, Config::default().flutter);
}

#[test]
fn test_load_missing_explicit_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    let err = load_config(Some(&missing)).unwrap_err();
    assert!(matches!(err, TagNextError::Config(_)));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_load_invalid_base_is_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[first_version]\ndefault_base = \"1.x\"\n")
        .unwrap();
    temp_file.flush().unwrap();

    assert!(load_config(Some(temp_file.path())).is_err());
}
