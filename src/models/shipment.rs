use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const FIELD_WEIGHT: &str = "peso";
pub const FIELD_ORIGIN: &str = "ciudad_origen";
pub const FIELD_DESTINATION: &str = "ciudad_destino";
pub const FIELD_CATEGORY: &str = "categoria";
pub const FIELD_SERVICE: &str = "tipo_servicio";
pub const FIELD_MONTH: &str = "mes";
pub const FIELD_WEEKDAY: &str = "dia_semana";
pub const FIELD_FRAGILE: &str = "fragil";

/// Form fields exactly as posted. Nothing here has been checked yet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    pub peso: Option<String>,
    pub ciudad_origen: Option<String>,
    pub ciudad_destino: Option<String>,
    pub categoria: Option<String>,
    pub tipo_servicio: Option<String>,
    pub mes: Option<String>,
    pub dia_semana: Option<String>,
    pub fragil: Option<String>,
}

impl ShipmentRequest {
    /// Store one posted field by wire name. Unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: String) -> Result<(), ValidationError> {
        let (field, slot) = match name {
            FIELD_WEIGHT => (FIELD_WEIGHT, &mut self.peso),
            FIELD_ORIGIN => (FIELD_ORIGIN, &mut self.ciudad_origen),
            FIELD_DESTINATION => (FIELD_DESTINATION, &mut self.ciudad_destino),
            FIELD_CATEGORY => (FIELD_CATEGORY, &mut self.categoria),
            FIELD_SERVICE => (FIELD_SERVICE, &mut self.tipo_servicio),
            FIELD_MONTH => (FIELD_MONTH, &mut self.mes),
            FIELD_WEEKDAY => (FIELD_WEEKDAY, &mut self.dia_semana),
            FIELD_FRAGILE => (FIELD_FRAGILE, &mut self.fragil),
            _ => return Ok(()),
        };
        if slot.is_some() {
            return Err(ValidationError::new(field, "field given more than once"));
        }
        *slot = Some(value);
        Ok(())
    }
}

/// A shipment whose every field has passed validation.
///
/// Fields are only set by `services::validator::validate`, and categorical
/// fields point into the registry tables.
///
/// ```compile_fail
/// use shipcost::models::ValidatedShipment;
///
/// let _ = ValidatedShipment {
///     weight_kg: -3.0,
///     origin_city: "Atlantis",
///     destination_city: "Cusco",
///     category: "Ropa",
///     service_type: "Express",
///     month: 99,
///     weekday: 42,
///     fragile: false,
/// };
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedShipment {
    pub(crate) weight_kg: f64,
    pub(crate) origin_city: &'static str,
    pub(crate) destination_city: &'static str,
    pub(crate) category: &'static str,
    pub(crate) service_type: &'static str,
    pub(crate) month: u32,
    /// 0 = Monday.
    pub(crate) weekday: usize,
    pub(crate) fragile: bool,
}

impl ValidatedShipment {
    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn origin_city(&self) -> &'static str {
        self.origin_city
    }

    pub fn destination_city(&self) -> &'static str {
        self.destination_city
    }

    pub fn category(&self) -> &'static str {
        self.category
    }

    pub fn service_type(&self) -> &'static str {
        self.service_type
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Index into `registry::WEEKDAYS`, 0 = Monday.
    pub fn weekday(&self) -> usize {
        self.weekday
    }

    pub fn fragile(&self) -> bool {
        self.fragile
    }
}
