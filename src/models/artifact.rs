//! On-disk layout of the fitted transform and the trained model.
//!
//! Both artifacts are JSON. These types only describe the files; shape checks
//! happen when they are turned into a `FeatureEncoder` or `DenseNetwork`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Training-time column names, in the form the transform refers to them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    #[serde(rename = "Peso_Kg")]
    WeightKg,
    #[serde(rename = "Ciudad_Origen")]
    OriginCity,
    #[serde(rename = "Ciudad_Destino")]
    DestinationCity,
    #[serde(rename = "Categoria")]
    Category,
    #[serde(rename = "Tipo_Servicio")]
    ServiceType,
    #[serde(rename = "Mes")]
    Month,
    #[serde(rename = "DiaSemana")]
    Weekday,
    #[serde(rename = "Fragil")]
    Fragile,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::WeightKg,
        Column::OriginCity,
        Column::DestinationCity,
        Column::Category,
        Column::ServiceType,
        Column::Month,
        Column::Weekday,
        Column::Fragile,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::WeightKg => "Peso_Kg",
            Column::OriginCity => "Ciudad_Origen",
            Column::DestinationCity => "Ciudad_Destino",
            Column::Category => "Categoria",
            Column::ServiceType => "Tipo_Servicio",
            Column::Month => "Mes",
            Column::Weekday => "DiaSemana",
            Column::Fragile => "Fragil",
        }
    }

    pub fn is_categorical(self) -> bool {
        matches!(
            self,
            Column::OriginCity | Column::DestinationCity | Column::Category | Column::ServiceType
        )
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fitted column transformer: blocks are applied and concatenated in order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransformArtifact {
    pub transformers: Vec<TransformerSpec>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformerSpec {
    StandardScaler {
        columns: Vec<Column>,
        mean: Vec<f64>,
        scale: Vec<f64>,
    },
    OneHot {
        columns: Vec<Column>,
        categories: Vec<Vec<String>>,
    },
    Passthrough {
        columns: Vec<Column>,
    },
}

impl TransformerSpec {
    pub fn columns(&self) -> &[Column] {
        match self {
            TransformerSpec::StandardScaler { columns, .. }
            | TransformerSpec::OneHot { columns, .. }
            | TransformerSpec::Passthrough { columns } => columns,
        }
    }
}

/// A trained feed-forward regression network.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub input_dim: usize,
    pub layers: Vec<DenseLayerSpec>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DenseLayerSpec {
    /// `kernel[i][j]` connects input `i` to unit `j`.
    pub kernel: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
    #[serde(default)]
    pub activation: Activation,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Sigmoid,
    Tanh,
}

impl Activation {
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Linear => x,
            Activation::Relu => x.max(0.0),
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::Tanh => x.tanh(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transformer_kind_is_tagged() {
        let spec: TransformerSpec = serde_json::from_str(
            r#"{"kind":"passthrough","columns":["Fragil","DiaSemana"]}"#,
        )
        .unwrap();
        assert_eq!(spec.columns(), &[Column::Fragile, Column::Weekday]);
    }

    #[test]
    fn activation_defaults_to_linear() {
        let layer: DenseLayerSpec =
            serde_json::from_str(r#"{"kernel":[[1.0]],"bias":[0.0]}"#).unwrap();
        assert_eq!(layer.activation, Activation::Linear);
        assert_eq!(Activation::Relu.apply(-2.0), 0.0);
    }
}
