//! Turns raw form fields into a `ValidatedShipment`.
//!
//! This is the only place that deals with untyped input. Fields are checked in
//! wire order and the first failure is returned.

use crate::error::ValidationError;
use crate::models::registry;
use crate::models::shipment::{
    FIELD_CATEGORY, FIELD_DESTINATION, FIELD_FRAGILE, FIELD_MONTH, FIELD_ORIGIN, FIELD_SERVICE,
    FIELD_WEEKDAY, FIELD_WEIGHT,
};
use crate::models::{ShipmentRequest, ValidatedShipment};

pub fn validate(raw: &ShipmentRequest) -> Result<ValidatedShipment, ValidationError> {
    let weight_kg = parse_weight(required(FIELD_WEIGHT, &raw.peso)?)?;
    let origin_city = member(FIELD_ORIGIN, &raw.ciudad_origen, "city", registry::city)?;
    let destination_city =
        member(FIELD_DESTINATION, &raw.ciudad_destino, "city", registry::city)?;
    let category = member(FIELD_CATEGORY, &raw.categoria, "category", registry::category)?;
    let service_type = member(
        FIELD_SERVICE,
        &raw.tipo_servicio,
        "service type",
        registry::service_type,
    )?;
    let month = parse_month(required(FIELD_MONTH, &raw.mes)?)?;
    let weekday = registry::weekday_index(required(FIELD_WEEKDAY, &raw.dia_semana)?)
        .map_err(|err| ValidationError::new(FIELD_WEEKDAY, err.to_string()))?;
    let fragile = parse_fragile(required(FIELD_FRAGILE, &raw.fragil)?)?;

    Ok(ValidatedShipment {
        weight_kg,
        origin_city,
        destination_city,
        category,
        service_type,
        month,
        weekday,
        fragile,
    })
}

fn required<'a>(
    field: &'static str,
    value: &'a Option<String>,
) -> Result<&'a str, ValidationError> {
    value.as_deref().ok_or_else(|| ValidationError::missing(field))
}

fn member(
    field: &'static str,
    value: &Option<String>,
    kind: &str,
    lookup: fn(&str) -> Option<&'static str>,
) -> Result<&'static str, ValidationError> {
    let value = required(field, value)?;
    lookup(value).ok_or_else(|| ValidationError::new(field, format!("unknown {kind} '{value}'")))
}

fn parse_weight(value: &str) -> Result<f64, ValidationError> {
    let weight: f64 = value
        .trim()
        .parse()
        .map_err(|_| ValidationError::new(FIELD_WEIGHT, format!("'{value}' is not a number")))?;

    if !weight.is_finite() {
        return Err(ValidationError::new(
            FIELD_WEIGHT,
            format!("'{value}' is not a finite number"),
        ));
    }
    if weight <= 0.0 {
        return Err(ValidationError::new(
            FIELD_WEIGHT,
            format!("weight must be greater than 0, got {weight}"),
        ));
    }
    Ok(weight)
}

fn parse_month(value: &str) -> Result<u32, ValidationError> {
    let month: i64 = value
        .trim()
        .parse()
        .map_err(|_| ValidationError::new(FIELD_MONTH, format!("'{value}' is not an integer")))?;

    if !registry::is_valid_month(month) {
        return Err(ValidationError::new(
            FIELD_MONTH,
            format!(
                "month must be between {} and {}, got {month}",
                registry::MONTHS.start(),
                registry::MONTHS.end()
            ),
        ));
    }
    // in range, so the narrowing cannot truncate
    Ok(month as u32)
}

fn parse_fragile(value: &str) -> Result<bool, ValidationError> {
    registry::fragile_flag(value).ok_or_else(|| {
        ValidationError::new(
            FIELD_FRAGILE,
            format!("expected 'True' or 'False', got '{value}'"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ShipmentRequest {
        ShipmentRequest {
            peso: Some("5.0".into()),
            ciudad_origen: Some("Lima".into()),
            ciudad_destino: Some("Cusco".into()),
            categoria: Some("Electrónicos".into()),
            tipo_servicio: Some("Estándar".into()),
            mes: Some("6".into()),
            dia_semana: Some("Lunes".into()),
            fragil: Some("False".into()),
        }
    }

    #[test]
    fn first_failure_wins() {
        let mut raw = request();
        raw.peso = Some("-1".into());
        raw.ciudad_origen = Some("Atlantis".into());
        assert_eq!(validate(&raw).unwrap_err().field, FIELD_WEIGHT);
    }

    #[test]
    fn whitespace_around_numbers_is_tolerated() {
        let mut raw = request();
        raw.peso = Some(" 2.5 ".into());
        raw.mes = Some(" 12".into());
        let shipment = validate(&raw).unwrap();
        assert_eq!(shipment.weight_kg, 2.5);
        assert_eq!(shipment.month, 12);
    }
}
