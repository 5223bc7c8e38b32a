//! Converts handler panics into the regular JSON error response.

use axum::response::{IntoResponse, Response};
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::PredictError;
use crate::handlers::AppError;

pub type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

pub fn panic_recovery() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(panic_response as PanicHandler)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "request handler panicked".to_string()
    };

    tracing::error!(panic = %message, "Recovered from handler panic");
    AppError(PredictError::Unexpected(message)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn panic_becomes_client_error() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = panic_response(Box::new(String::from("boom")));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
