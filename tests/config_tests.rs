// SPDX-License-Identifier: MPL-2.0

//! Integration tests for configuration module

use qr_monitor::backends::camera::PixelFormat;
use qr_monitor::{Config, DisplayMode};
use std::io::Write;
use std::time::Duration;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.camera_indices, vec![2, 4, 6, 8]);
    assert_eq!((config.width, config.height), (1280, 720));
    assert_eq!(config.pixel_format, PixelFormat::Mjpg);
    assert_eq!(config.debounce_window(), Duration::from_secs(2));
    assert_eq!(config.display, DisplayMode::Window);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_from_file() {
    let file = write_config(
        r#"{
            "camera_indices": [0, 1],
            "width": 640,
            "height": 480,
            "pixel_format": "YUYV",
            "debounce_ms": 500,
            "max_dimension": 800,
            "display": "headless",
            "caption": "Hold the code still"
        }"#,
    );

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.camera_indices, vec![0, 1]);
    assert_eq!((config.width, config.height), (640, 480));
    assert_eq!(config.pixel_format, PixelFormat::Yuyv);
    assert_eq!(config.debounce_window(), Duration::from_millis(500));
    assert_eq!(config.max_dimension, 800);
    assert_eq!(config.display, DisplayMode::Headless);
    assert_eq!(config.caption, "Hold the code still");
}

#[test]
fn test_partial_config_keeps_defaults() {
    let file = write_config(r#"{ "display": "terminal" }"#);

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.display, DisplayMode::Terminal);
    assert_eq!(config.camera_indices, Config::default().camera_indices);
    assert_eq!(config.caption, Config::default().caption);
}

#[test]
fn test_malformed_config_is_rejected() {
    let file = write_config("{ not json");
    assert!(Config::from_file(file.path()).is_err());
}

#[test]
fn test_invalid_file_values_are_caught_by_validate() {
    let file = write_config(r#"{ "width": 0 }"#);

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.width, 0);
    assert!(config.validate().is_err());
}

#[test]
fn test_override_can_repair_file_values() {
    let file = write_config(r#"{ "width": 0, "height": 480 }"#);

    let mut config = Config::load(Some(file.path())).unwrap();
    config.width = 640;
    assert!(config.validate().is_ok());
}

#[test]
fn test_explicit_missing_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    assert!(Config::load(Some(&missing)).is_err());
}

#[test]
fn test_config_json_round_trips() {
    let config = Config {
        camera_indices: vec![3],
        display: DisplayMode::Headless,
        ..Config::default()
    };
    let file = write_config(&config.to_json().unwrap());

    let loaded = Config::from_file(file.path()).unwrap();
    assert_eq!(loaded.camera_indices, vec![3]);
    assert_eq!(loaded.display, DisplayMode::Headless);
}
