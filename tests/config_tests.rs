//! Environment configuration and artifact loading.

mod common;

use serial_test::serial;
use std::io::Write;
use std::path::PathBuf;

use shipcost::config::artifacts::{self, fingerprint, read_artifact};
use shipcost::config::{Config, LogFormat};
use shipcost::error::ArtifactError;
use shipcost::models::artifact::TransformArtifact;
use shipcost::AppState;

const VARS: [&str; 6] = [
    "HOST",
    "PORT",
    "PREPROCESSOR_PATH",
    "MODEL_PATH",
    "MAX_BODY_SIZE",
    "LOG_FORMAT",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn defaults_apply_when_unset() {
    clear_env();
    let config = Config::from_env().unwrap();
    assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    assert_eq!(config.preprocessor_path, PathBuf::from("artifacts/preprocessor.json"));
    assert_eq!(config.model_path, PathBuf::from("artifacts/model.json"));
    assert_eq!(config.max_body_size, 16 * 1024);
    assert_eq!(config.log_format, LogFormat::Text);
}

#[test]
#[serial]
fn environment_overrides_defaults() {
    clear_env();
    std::env::set_var("HOST", "127.0.0.1");
    std::env::set_var("PORT", "9090");
    std::env::set_var("MODEL_PATH", "/srv/model.json");
    std::env::set_var("LOG_FORMAT", "JSON");

    let config = Config::from_env().unwrap();
    assert_eq!(config.bind_addr(), "127.0.0.1:9090");
    assert_eq!(config.model_path, PathBuf::from("/srv/model.json"));
    assert_eq!(config.log_format, LogFormat::Json);
    clear_env();
}

#[test]
#[serial]
fn invalid_values_are_errors_not_panics() {
    for (var, value) in [
        ("PORT", "eighty"),
        ("PORT", "70000"),
        ("MAX_BODY_SIZE", "-1"),
        ("LOG_FORMAT", "xml"),
    ] {
        clear_env();
        std::env::set_var(var, value);
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains(var), "{var}: {err}");
    }
    clear_env();
}

#[tokio::test]
async fn missing_artifact_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_artifact::<TransformArtifact>(&dir.path().join("absent.json"))
        .await
        .err()
        .unwrap();
    assert!(matches!(err, ArtifactError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[tokio::test]
async fn malformed_artifact_is_a_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{\"transformers\": [").unwrap();
    let err = read_artifact::<TransformArtifact>(file.path())
        .await
        .err()
        .unwrap();
    assert!(matches!(err, ArtifactError::Parse { .. }));
}

#[tokio::test]
async fn artifacts_load_with_fingerprints() {
    let config = common::sample_config();
    let loaded = artifacts::load_artifacts(&config).await.unwrap();

    let model_bytes = std::fs::read(&config.model_path).unwrap();
    assert_eq!(loaded.info.model_sha256, fingerprint(&model_bytes));
    assert_eq!(loaded.encoder.output_width(), common::SAMPLE_WIDTH);
}

#[tokio::test]
async fn mismatched_artifacts_fail_startup() {
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("model.json");
    std::fs::write(
        &model_path,
        r#"{"input_dim":3,"layers":[{"kernel":[[1.0],[1.0],[1.0]],"bias":[0.0]}]}"#,
    )
    .unwrap();

    let config = Config {
        model_path,
        ..common::sample_config()
    };
    let err = AppState::new(config).await.err().unwrap();
    assert!(err.to_string().contains("expects 3"), "{err}");
}
