//! Startup loading of the transform and model artifacts.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::Path;

use super::Config;
use crate::error::ArtifactError;
use crate::models::artifact::{ModelArtifact, TransformArtifact};
use crate::services::encoder::FeatureEncoder;
use crate::services::predictor::DenseNetwork;

/// Identity of the artifacts the process is serving with.
#[derive(Clone, Debug, Serialize)]
pub struct ArtifactInfo {
    pub preprocessor_sha256: String,
    pub model_sha256: String,
    pub loaded_at: DateTime<Utc>,
}

pub struct LoadedArtifacts {
    pub encoder: FeatureEncoder,
    pub model: DenseNetwork,
    pub info: ArtifactInfo,
}

pub async fn load_artifacts(config: &Config) -> Result<LoadedArtifacts, ArtifactError> {
    let (transform, preprocessor_sha256) =
        read_artifact::<TransformArtifact>(&config.preprocessor_path).await?;
    let (model, model_sha256) = read_artifact::<ModelArtifact>(&config.model_path).await?;

    let encoder = FeatureEncoder::from_artifact(transform)?;
    let model = DenseNetwork::from_artifact(model)?;

    tracing::info!(
        preprocessor = %config.preprocessor_path.display(),
        preprocessor_sha256 = %preprocessor_sha256,
        model = %config.model_path.display(),
        model_sha256 = %model_sha256,
        features = encoder.output_width(),
        "Artifacts loaded"
    );

    Ok(LoadedArtifacts {
        encoder,
        model,
        info: ArtifactInfo {
            preprocessor_sha256,
            model_sha256,
            loaded_at: Utc::now(),
        },
    })
}

/// Read and parse one JSON artifact, returning it with its SHA-256 digest.
pub async fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<(T, String), ArtifactError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| ArtifactError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let parsed = parse_artifact(path, &bytes)?;
    Ok((parsed, fingerprint(&bytes)))
}

pub fn parse_artifact<T: DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<T, ArtifactError> {
    serde_json::from_slice(bytes).map_err(|source| ArtifactError::Parse {
        path: path.display().to_string(),
        source,
    })
}

pub fn fingerprint(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
