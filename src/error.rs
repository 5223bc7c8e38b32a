//! Error taxonomy for the prediction pipeline.
//!
//! Each stage returns its own error type; `PredictError` is what reaches the
//! HTTP boundary, where every variant is reported as a client error.

use thiserror::Error;

/// A weekday name outside the registry's seven names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown weekday '{0}'")]
pub struct UnknownWeekday(pub String);

/// A raw request field that is missing, malformed or out of domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid field '{field}': {reason}")]
pub struct ValidationError {
    /// Wire name of the offending form field.
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    pub fn missing(field: &'static str) -> Self {
        Self::new(field, "field is required")
    }
}

/// A validated value that the fitted transform cannot represent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("value '{value}' of column {column} was not seen when the transform was fitted")]
    UnseenCategory { column: &'static str, value: String },
}

/// The model could not be evaluated on the given feature vector.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("model expects {expected} features, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
    #[error("model produced a non-finite output ({0})")]
    NonFinite(f64),
}

/// Any failure of a single prediction request.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
    #[error("{0}")]
    Unexpected(String),
}

impl PredictError {
    /// Short stage label used in logs.
    pub fn stage(&self) -> &'static str {
        match self {
            PredictError::Validation(_) => "validation",
            PredictError::Encoding(_) => "encoding",
            PredictError::Inference(_) => "inference",
            PredictError::Unexpected(_) => "unexpected",
        }
    }
}

/// A transform or model artifact that cannot be loaded.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse artifact {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid artifact: {0}")]
    Invalid(String),
}

impl ArtifactError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        ArtifactError::Invalid(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_the_field() {
        let err = ValidationError::new("ciudad_origen", "unknown city 'Atlantis'");
        assert_eq!(
            err.to_string(),
            "invalid field 'ciudad_origen': unknown city 'Atlantis'"
        );
    }

    #[test]
    fn predict_error_is_transparent_over_stages() {
        let err: PredictError = InferenceError::ShapeMismatch {
            expected: 47,
            actual: 3,
        }
        .into();
        assert_eq!(err.to_string(), "model expects 47 features, got 3");
        assert_eq!(err.stage(), "inference");
    }
}
