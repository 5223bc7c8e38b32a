pub mod extract;
pub mod health;
pub mod options;
pub mod predict;
pub mod response;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::PredictError;
use response::ErrorResponse;

/// Every failure leaves the service as a 400 with a JSON `error` body.
#[derive(Debug)]
pub struct AppError(pub PredictError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::warn!(stage = self.0.stage(), error = %self.0, "Prediction rejected");

        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<PredictError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
