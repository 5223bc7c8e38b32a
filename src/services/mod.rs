pub mod encoder;
pub mod predictor;
pub mod validator;

use std::sync::Arc;

use crate::config::artifacts::{self, ArtifactInfo};
use crate::config::Config;
use crate::error::{ArtifactError, PredictError};
use crate::models::ShipmentRequest;

use encoder::FeatureEncoder;
use predictor::CostModel;

/// The validate -> encode -> predict pipeline over one pair of artifacts.
pub struct PredictionService {
    encoder: FeatureEncoder,
    model: Arc<dyn CostModel>,
}

impl PredictionService {
    /// Pair an encoder with a model; their widths must agree.
    pub fn new(encoder: FeatureEncoder, model: Arc<dyn CostModel>) -> Result<Self, ArtifactError> {
        if encoder.output_width() != model.input_dim() {
            return Err(ArtifactError::invalid(format!(
                "transform emits {} features but the model expects {}",
                encoder.output_width(),
                model.input_dim()
            )));
        }

        for (column, value) in encoder.unseen_registry_values() {
            tracing::warn!(
                column = %column,
                value = %value,
                "Registry value unknown to the transform; requests using it will be rejected"
            );
        }

        Ok(Self { encoder, model })
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    pub fn model(&self) -> &dyn CostModel {
        self.model.as_ref()
    }

    /// Raw (unrounded) cost for one shipment.
    pub fn predict(&self, raw: &ShipmentRequest) -> Result<f64, PredictError> {
        let shipment = validator::validate(raw)?;
        let features = self.encoder.encode(&shipment)?;
        let cost = self.model.predict(&features)?;

        tracing::debug!(
            origin = shipment.origin_city(),
            destination = shipment.destination_city(),
            weight_kg = shipment.weight_kg(),
            cost,
            "Prediction computed"
        );
        Ok(cost)
    }
}

pub struct AppState {
    pub config: Config,
    pub predictor: Arc<PredictionService>,
    pub artifacts: ArtifactInfo,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let loaded = artifacts::load_artifacts(&config).await?;
        let predictor = PredictionService::new(loaded.encoder, Arc::new(loaded.model))?;

        Ok(Self {
            config,
            predictor: Arc::new(predictor),
            artifacts: loaded.info,
        })
    }
}
