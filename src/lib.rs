//! Shipping cost prediction service.
//!
//! A posted shipment is validated against the domain registry, encoded with
//! the fitted transform, and scored by the trained network. Both artifacts are
//! loaded once at startup and shared read-only between requests.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod services;

pub use error::{PredictError, ValidationError};
pub use router::create_router;
pub use services::{AppState, PredictionService};
