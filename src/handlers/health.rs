use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::config::artifacts::ArtifactInfo;
use crate::services::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub features: usize,
    pub model_input_dim: usize,
    pub artifacts: ArtifactInfo,
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        features: state.predictor.encoder().output_width(),
        model_input_dim: state.predictor.model().input_dim(),
        artifacts: state.artifacts.clone(),
    })
}
