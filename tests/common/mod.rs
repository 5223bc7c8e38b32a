#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;

use shipcost::config::artifacts::{parse_artifact, ArtifactInfo};
use shipcost::config::Config;
use shipcost::models::artifact::TransformArtifact;
use shipcost::models::ShipmentRequest;
use shipcost::services::encoder::FeatureEncoder;
use shipcost::services::predictor::CostModel;
use shipcost::{AppState, PredictionService};

pub const SAMPLE_WIDTH: usize = 47;

pub fn artifacts_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("artifacts")
}

pub fn sample_config() -> Config {
    Config {
        preprocessor_path: artifacts_dir().join("preprocessor.json"),
        model_path: artifacts_dir().join("model.json"),
        ..Config::default()
    }
}

pub fn sample_encoder() -> FeatureEncoder {
    let path = artifacts_dir().join("preprocessor.json");
    let bytes = std::fs::read(&path).expect("sample transform is readable");
    let artifact: TransformArtifact = parse_artifact(&path, &bytes).expect("sample transform parses");
    FeatureEncoder::from_artifact(artifact).expect("sample transform is valid")
}

pub async fn sample_state() -> Arc<AppState> {
    Arc::new(
        AppState::new(sample_config())
            .await
            .expect("sample artifacts load"),
    )
}

/// State serving the sample transform with an arbitrary model.
pub fn state_with_model(model: Arc<dyn CostModel>) -> Arc<AppState> {
    let predictor = PredictionService::new(sample_encoder(), model).expect("widths agree");
    Arc::new(AppState {
        config: Config::default(),
        predictor: Arc::new(predictor),
        artifacts: ArtifactInfo {
            preprocessor_sha256: "test".to_string(),
            model_sha256: "test".to_string(),
            loaded_at: Utc::now(),
        },
    })
}

pub fn valid_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("peso", "5.0"),
        ("ciudad_origen", "Lima"),
        ("ciudad_destino", "Cusco"),
        ("categoria", "Electrónicos"),
        ("tipo_servicio", "Estándar"),
        ("mes", "6"),
        ("dia_semana", "Lunes"),
        ("fragil", "False"),
    ]
}

pub fn with_field(name: &str, value: &'static str) -> Vec<(&'static str, &'static str)> {
    valid_fields()
        .into_iter()
        .map(|(k, v)| if k == name { (k, value) } else { (k, v) })
        .collect()
}

pub fn valid_request() -> ShipmentRequest {
    request_from(&valid_fields())
}

pub fn request_from(fields: &[(&str, &str)]) -> ShipmentRequest {
    let mut raw = ShipmentRequest::default();
    for (name, value) in fields {
        raw.set_field(name, value.to_string()).expect("no repeated fields");
    }
    raw
}

/// Test values contain no reserved characters, so they go in unescaped.
pub fn form_request(fields: &[(&str, &str)]) -> Request<Body> {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .expect("valid request")
}

pub fn multipart_request(fields: &[(&str, &str)]) -> Request<Body> {
    const BOUNDARY: &str = "shipcost-test-boundary";
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("valid request")
}

pub async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body is readable");
    String::from_utf8(bytes.to_vec()).expect("body is utf-8")
}
