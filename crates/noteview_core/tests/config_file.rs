use noteview_core::{ConfigError, PresenterConfig, ScrollBackend};
use std::fs;

#[test]
fn settings_file_is_loaded_and_validated() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("noteview.json");
    fs::write(
        &path,
        r#"{
            "autolinking": false,
            "html_zoom_factor": 1.5,
            "scroll_backend": "scripted",
            "diagram_editor_url": "https://embed.diagrams.net/"
        }"#,
    )
    .expect("write settings");

    let config = PresenterConfig::load(&path).expect("settings should load");
    assert!(!config.autolinking);
    assert!(config.double_click_to_edit);
    assert_eq!(config.html_zoom_factor, 1.5);
    assert_eq!(config.scroll_backend, ScrollBackend::Scripted);
    assert_eq!(config.diagram_editor_url, "https://embed.diagrams.net/");
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = PresenterConfig::load(dir.path().join("absent.json")).expect_err("must fail");
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn unknown_key_is_parse_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("noteview.json");
    fs::write(&path, r#"{"autolink": true}"#).expect("write settings");

    let err = PresenterConfig::load(&path).expect_err("typo must fail");
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn quoted_editor_url_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("noteview.json");
    fs::write(&path, r#"{"diagram_editor_url": "x' onload='y"}"#).expect("write settings");

    let err = PresenterConfig::load(&path).expect_err("quote must fail");
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "diagram_editor_url",
            ..
        }
    ));
}
