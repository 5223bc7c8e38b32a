use axum::{extract::State, Json};
use std::sync::Arc;

use super::extract::ShipmentForm;
use super::response::{self, PredictionResponse};
use super::AppError;
use crate::error::PredictError;
use crate::services::AppState;

pub async fn predict(
    State(state): State<Arc<AppState>>,
    ShipmentForm(raw): ShipmentForm,
) -> Result<Json<PredictionResponse>, AppError> {
    let predictor = Arc::clone(&state.predictor);

    // Inference is CPU-bound; keep it off the async workers.
    let cost = tokio::task::spawn_blocking(move || predictor.predict(&raw))
        .await
        .map_err(|e| PredictError::Unexpected(format!("prediction task failed: {e}")))??;

    Ok(Json(response::prediction(cost)?))
}
