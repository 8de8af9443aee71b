//! Tests for configuration loading.

use locker::LockerConfig;
use std::io::Write;
use tempfile::TempDir;

#[test]
fn test_from_file_resolves_relative_paths() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("locker.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        r#"
[storage]
media_root = "blobs"

[persistence]
state_file = "/var/lib/locker/state.json"

[events]
channel_capacity = 8
"#
    )
    .unwrap();

    let config = LockerConfig::from_file(&path).unwrap();

    assert_eq!(config.storage.media_root, temp.path().join("blobs"));
    assert_eq!(
        config.persistence.state_file,
        std::path::PathBuf::from("/var/lib/locker/state.json")
    );
    assert_eq!(config.events.channel_capacity, 8);
}

#[test]
fn test_from_file_fills_missing_sections() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("partial.toml");
    std::fs::write(&path, "[events]\nchannel_capacity = 2\n").unwrap();

    let config = LockerConfig::from_file(&path).unwrap();

    assert_eq!(config.events.channel_capacity, 2);
    assert_eq!(config.storage.media_root, temp.path().join("media"));
    assert_eq!(config.persistence.state_file, temp.path().join("state.json"));
}

#[test]
fn test_from_file_missing_is_error() {
    let temp = TempDir::new().unwrap();
    let err = LockerConfig::from_file(temp.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("Configuration Error"));
}

#[test]
fn test_load_starts_from_bundled_defaults() {
    let config = LockerConfig::load().unwrap();
    assert!(config.storage.media_root.is_absolute() || config.storage.media_root.starts_with("."));
    assert!(config.events.channel_capacity > 0);
}
