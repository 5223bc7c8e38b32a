//! Feature encoding backed by the fitted transform artifact.
//!
//! Output layout is exactly the artifact's: transformer blocks in file order,
//! columns in block order, one-hot positions in fitted category order.

use std::collections::HashSet;

use crate::error::{ArtifactError, EncodingError};
use crate::models::artifact::{Column, TransformArtifact, TransformerSpec};
use crate::models::registry;
use crate::models::{FeatureVector, ValidatedShipment};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NumericColumn {
    WeightKg,
    Month,
    Weekday,
    Fragile,
}

impl NumericColumn {
    fn of(column: Column) -> Option<Self> {
        match column {
            Column::WeightKg => Some(Self::WeightKg),
            Column::Month => Some(Self::Month),
            Column::Weekday => Some(Self::Weekday),
            Column::Fragile => Some(Self::Fragile),
            _ => None,
        }
    }

    fn read(self, shipment: &ValidatedShipment) -> f64 {
        match self {
            Self::WeightKg => shipment.weight_kg,
            Self::Month => f64::from(shipment.month),
            Self::Weekday => shipment.weekday as f64,
            Self::Fragile => {
                if shipment.fragile {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CategoricalColumn {
    OriginCity,
    DestinationCity,
    Category,
    ServiceType,
}

impl CategoricalColumn {
    fn of(column: Column) -> Option<Self> {
        match column {
            Column::OriginCity => Some(Self::OriginCity),
            Column::DestinationCity => Some(Self::DestinationCity),
            Column::Category => Some(Self::Category),
            Column::ServiceType => Some(Self::ServiceType),
            _ => None,
        }
    }

    fn column(self) -> Column {
        match self {
            Self::OriginCity => Column::OriginCity,
            Self::DestinationCity => Column::DestinationCity,
            Self::Category => Column::Category,
            Self::ServiceType => Column::ServiceType,
        }
    }

    fn read(self, shipment: &ValidatedShipment) -> &'static str {
        match self {
            Self::OriginCity => shipment.origin_city,
            Self::DestinationCity => shipment.destination_city,
            Self::Category => shipment.category,
            Self::ServiceType => shipment.service_type,
        }
    }

    fn domain(self) -> &'static [&'static str] {
        match self {
            Self::OriginCity | Self::DestinationCity => &registry::CITIES,
            Self::Category => &registry::CATEGORIES,
            Self::ServiceType => &registry::SERVICE_TYPES,
        }
    }
}

#[derive(Clone, Debug)]
struct Scaled {
    column: NumericColumn,
    mean: f64,
    scale: f64,
}

#[derive(Clone, Debug)]
struct OneHot {
    column: CategoricalColumn,
    categories: Vec<String>,
}

#[derive(Clone, Debug)]
enum Block {
    Scale(Vec<Scaled>),
    OneHot(Vec<OneHot>),
    Passthrough(Vec<NumericColumn>),
}

/// The fitted transform, checked and ready for inference-time use.
#[derive(Clone, Debug)]
pub struct FeatureEncoder {
    blocks: Vec<Block>,
    width: usize,
}

impl FeatureEncoder {
    pub fn from_artifact(artifact: TransformArtifact) -> Result<Self, ArtifactError> {
        let mut seen = HashSet::new();
        let mut blocks = Vec::with_capacity(artifact.transformers.len());
        let mut width = 0;

        for spec in artifact.transformers {
            for column in spec.columns() {
                if !seen.insert(*column) {
                    return Err(ArtifactError::invalid(format!(
                        "column {column} is transformed more than once"
                    )));
                }
            }

            let block = match spec {
                TransformerSpec::StandardScaler {
                    columns,
                    mean,
                    scale,
                } => {
                    if mean.len() != columns.len() || scale.len() != columns.len() {
                        return Err(ArtifactError::invalid(format!(
                            "standard_scaler has {} columns but {} means and {} scales",
                            columns.len(),
                            mean.len(),
                            scale.len()
                        )));
                    }
                    let scaled = columns
                        .into_iter()
                        .zip(mean)
                        .zip(scale)
                        .map(|((column, mean), scale)| {
                            if !mean.is_finite() || !scale.is_finite() || scale == 0.0 {
                                return Err(ArtifactError::invalid(format!(
                                    "column {column} has unusable scaling (mean {mean}, scale {scale})"
                                )));
                            }
                            Ok(Scaled {
                                column: numeric(column, "standard_scaler")?,
                                mean,
                                scale,
                            })
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    width += scaled.len();
                    Block::Scale(scaled)
                }
                TransformerSpec::OneHot {
                    columns,
                    categories,
                } => {
                    if categories.len() != columns.len() {
                        return Err(ArtifactError::invalid(format!(
                            "one_hot has {} columns but {} category lists",
                            columns.len(),
                            categories.len()
                        )));
                    }
                    let encoded = columns
                        .into_iter()
                        .zip(categories)
                        .map(|(column, categories)| {
                            let Some(categorical) = CategoricalColumn::of(column) else {
                                return Err(ArtifactError::invalid(format!(
                                    "column {column} is numeric and cannot be one-hot encoded"
                                )));
                            };
                            let mut distinct = HashSet::new();
                            if let Some(dup) = categories.iter().find(|c| !distinct.insert(*c)) {
                                return Err(ArtifactError::invalid(format!(
                                    "column {column} lists category '{dup}' twice"
                                )));
                            }
                            Ok(OneHot {
                                column: categorical,
                                categories,
                            })
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    width += encoded.iter().map(|c| c.categories.len()).sum::<usize>();
                    Block::OneHot(encoded)
                }
                TransformerSpec::Passthrough { columns } => {
                    let passed = columns
                        .into_iter()
                        .map(|column| numeric(column, "passthrough"))
                        .collect::<Result<Vec<_>, _>>()?;
                    width += passed.len();
                    Block::Passthrough(passed)
                }
            };
            blocks.push(block);
        }

        if width == 0 {
            return Err(ArtifactError::invalid("transform produces no features"));
        }

        Ok(Self { blocks, width })
    }

    /// Length of every vector this encoder produces.
    pub fn output_width(&self) -> usize {
        self.width
    }

    pub fn encode(&self, shipment: &ValidatedShipment) -> Result<FeatureVector, EncodingError> {
        let mut out = Vec::with_capacity(self.width);

        for block in &self.blocks {
            match block {
                Block::Scale(columns) => {
                    out.extend(
                        columns
                            .iter()
                            .map(|c| (c.column.read(shipment) - c.mean) / c.scale),
                    );
                }
                Block::OneHot(columns) => {
                    for column in columns {
                        let value = column.column.read(shipment);
                        let hot = column
                            .categories
                            .iter()
                            .position(|category| category == value)
                            .ok_or_else(|| EncodingError::UnseenCategory {
                                column: column.column.column().name(),
                                value: value.to_string(),
                            })?;
                        out.extend(
                            (0..column.categories.len()).map(|i| if i == hot { 1.0 } else { 0.0 }),
                        );
                    }
                }
                Block::Passthrough(columns) => {
                    out.extend(columns.iter().map(|c| c.read(shipment)));
                }
            }
        }

        Ok(FeatureVector::new(out))
    }

    /// Registry values that the fitted transform has never seen.
    ///
    /// Any of these would pass validation and then fail encoding.
    pub fn unseen_registry_values(&self) -> Vec<(Column, &'static str)> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::OneHot(columns) => Some(columns),
                _ => None,
            })
            .flatten()
            .flat_map(|encoded| {
                encoded
                    .column
                    .domain()
                    .iter()
                    .filter(move |value| !encoded.categories.iter().any(|c| c == *value))
                    .map(move |value| (encoded.column.column(), *value))
            })
            .collect()
    }
}

fn numeric(column: Column, kind: &str) -> Result<NumericColumn, ArtifactError> {
    NumericColumn::of(column).ok_or_else(|| {
        ArtifactError::invalid(format!(
            "column {column} is categorical and cannot be used in {kind}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShipmentRequest;
    use crate::services::validator::validate;

    fn shipment() -> ValidatedShipment {
        let raw = ShipmentRequest {
            peso: Some("4".into()),
            ciudad_origen: Some("Lima".into()),
            ciudad_destino: Some("Cusco".into()),
            categoria: Some("Ropa".into()),
            tipo_servicio: Some("Express".into()),
            mes: Some("3".into()),
            dia_semana: Some("Miércoles".into()),
            fragil: Some("True".into()),
        };
        validate(&raw).unwrap()
    }

    #[test]
    fn blocks_are_concatenated_in_artifact_order() {
        let artifact: TransformArtifact = serde_json::from_str(
            r#"{"transformers":[
                {"kind":"passthrough","columns":["Fragil"]},
                {"kind":"one_hot","columns":["Tipo_Servicio"],"categories":[["Estándar","Express","Económico"]]},
                {"kind":"standard_scaler","columns":["Peso_Kg","Mes"],"mean":[2.0,6.0],"scale":[2.0,3.0]}
            ]}"#,
        )
        .unwrap();
        let encoder = FeatureEncoder::from_artifact(artifact).unwrap();

        let features = encoder.encode(&shipment()).unwrap();
        assert_eq!(features.as_slice(), &[1.0, 0.0, 1.0, 0.0, 1.0, -1.0]);
        assert_eq!(encoder.output_width(), 6);
    }

    #[test]
    fn drift_lists_missing_registry_values() {
        let artifact: TransformArtifact = serde_json::from_str(
            r#"{"transformers":[
                {"kind":"one_hot","columns":["Tipo_Servicio"],"categories":[["Estándar","Express"]]}
            ]}"#,
        )
        .unwrap();
        let encoder = FeatureEncoder::from_artifact(artifact).unwrap();
        assert_eq!(
            encoder.unseen_registry_values(),
            vec![(Column::ServiceType, "Económico")]
        );
    }
}
