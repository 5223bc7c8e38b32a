//! Inference over the trained regression network.

use crate::error::{ArtifactError, InferenceError};
use crate::models::artifact::{Activation, DenseLayerSpec, ModelArtifact};
use crate::models::FeatureVector;

/// A loaded regression model mapping a feature vector to a cost.
///
/// Implementations are read-only after construction and shared across
/// requests.
pub trait CostModel: Send + Sync {
    /// Number of features `predict` expects.
    fn input_dim(&self) -> usize;

    fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError>;
}

#[derive(Clone, Debug)]
struct DenseLayer {
    kernel: Vec<Vec<f64>>,
    bias: Vec<f64>,
    activation: Activation,
}

impl DenseLayer {
    fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut out = self.bias.clone();
        for (x, row) in input.iter().zip(&self.kernel) {
            for (acc, w) in out.iter_mut().zip(row) {
                *acc += x * w;
            }
        }
        for value in &mut out {
            *value = self.activation.apply(*value);
        }
        out
    }
}

/// Fully connected feed-forward network with a single output unit.
#[derive(Clone, Debug)]
pub struct DenseNetwork {
    input_dim: usize,
    layers: Vec<DenseLayer>,
}

impl DenseNetwork {
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ArtifactError> {
        if artifact.input_dim == 0 {
            return Err(ArtifactError::invalid("model input_dim must be positive"));
        }
        if artifact.layers.is_empty() {
            return Err(ArtifactError::invalid("model has no layers"));
        }

        let mut width = artifact.input_dim;
        let mut layers = Vec::with_capacity(artifact.layers.len());
        for (index, spec) in artifact.layers.into_iter().enumerate() {
            let layer = check_layer(index, width, spec)?;
            width = layer.bias.len();
            layers.push(layer);
        }

        if width != 1 {
            return Err(ArtifactError::invalid(format!(
                "model must end in a single output unit, found {width}"
            )));
        }

        Ok(Self {
            input_dim: artifact.input_dim,
            layers,
        })
    }
}

fn check_layer(index: usize, inputs: usize, spec: DenseLayerSpec) -> Result<DenseLayer, ArtifactError> {
    let units = spec.bias.len();
    if units == 0 {
        return Err(ArtifactError::invalid(format!("layer {index} has no units")));
    }
    if spec.kernel.len() != inputs {
        return Err(ArtifactError::invalid(format!(
            "layer {index} kernel has {} rows, expected {inputs}",
            spec.kernel.len()
        )));
    }
    if let Some(row) = spec.kernel.iter().position(|row| row.len() != units) {
        return Err(ArtifactError::invalid(format!(
            "layer {index} kernel row {row} does not have {units} columns"
        )));
    }
    let all_finite = spec
        .kernel
        .iter()
        .flatten()
        .chain(&spec.bias)
        .all(|w| w.is_finite());
    if !all_finite {
        return Err(ArtifactError::invalid(format!(
            "layer {index} contains non-finite weights"
        )));
    }

    Ok(DenseLayer {
        kernel: spec.kernel,
        bias: spec.bias,
        activation: spec.activation,
    })
}

impl CostModel for DenseNetwork {
    fn input_dim(&self) -> usize {
        self.input_dim
    }

    fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        if features.len() != self.input_dim {
            return Err(InferenceError::ShapeMismatch {
                expected: self.input_dim,
                actual: features.len(),
            });
        }

        let output = self
            .layers
            .iter()
            .fold(features.as_slice().to_vec(), |acc, layer| layer.forward(&acc));

        match output.as_slice() {
            [value] if value.is_finite() => Ok(*value),
            [value] => Err(InferenceError::NonFinite(*value)),
            _ => Err(InferenceError::ShapeMismatch {
                expected: 1,
                actual: output.len(),
            }),
        }
    }
}
