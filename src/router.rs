use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;

use crate::handlers;
use crate::middleware::{logging, recovery};
use crate::services::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_body_size;

    Router::new()
        .route("/predict", post(handlers::predict::predict))
        .route("/options", get(handlers::options::form_options))
        .route("/health", get(handlers::health::health_check))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(logging::request_logging))
                .layer(recovery::panic_recovery())
                // oversized bodies fail extraction and take the usual 400 path
                .layer(DefaultBodyLimit::max(body_limit)),
        )
}
