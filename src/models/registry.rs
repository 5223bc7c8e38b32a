//! Closed sets of values the service accepts.
//!
//! These mirror the domain the model was trained on. Lookups are exact and
//! case-sensitive.

use std::ops::RangeInclusive;

use crate::error::UnknownWeekday;

pub const CITIES: [&str; 15] = [
    "Lima", "Arequipa", "Trujillo", "Chiclayo", "Piura", "Cusco", "Iquitos", "Huancayo",
    "Pucallpa", "Tacna", "Ayacucho", "Chimbote", "Ica", "Juliaca", "Tarapoto",
];

pub const CATEGORIES: [&str; 10] = [
    "Documentos",
    "Ropa",
    "Electrónicos",
    "Alimentos",
    "Muebles",
    "Libros",
    "Medicamentos",
    "Repuestos",
    "Herramientas",
    "Otros",
];

pub const SERVICE_TYPES: [&str; 3] = ["Estándar", "Express", "Económico"];

pub const MONTHS: RangeInclusive<u32> = 1..=12;

/// Monday first; a weekday's index is its position here.
pub const WEEKDAYS: [&str; 7] = [
    "Lunes",
    "Martes",
    "Miércoles",
    "Jueves",
    "Viernes",
    "Sábado",
    "Domingo",
];

/// Accepted spellings of the fragile flag, as (token, value).
pub const FRAGILE_TOKENS: [(&str, bool); 2] = [("True", true), ("False", false)];

fn lookup(set: &[&'static str], name: &str) -> Option<&'static str> {
    set.iter().copied().find(|candidate| *candidate == name)
}

pub fn city(name: &str) -> Option<&'static str> {
    lookup(&CITIES, name)
}

pub fn category(name: &str) -> Option<&'static str> {
    lookup(&CATEGORIES, name)
}

pub fn service_type(name: &str) -> Option<&'static str> {
    lookup(&SERVICE_TYPES, name)
}

pub fn is_valid_city(name: &str) -> bool {
    city(name).is_some()
}

pub fn is_valid_category(name: &str) -> bool {
    category(name).is_some()
}

pub fn is_valid_service_type(name: &str) -> bool {
    service_type(name).is_some()
}

pub fn is_valid_month(month: i64) -> bool {
    u32::try_from(month).is_ok_and(|m| MONTHS.contains(&m))
}

/// Zero-based position of `name` in the Monday-first week.
pub fn weekday_index(name: &str) -> Result<usize, UnknownWeekday> {
    WEEKDAYS
        .iter()
        .position(|day| *day == name)
        .ok_or_else(|| UnknownWeekday(name.to_string()))
}

pub fn fragile_flag(token: &str) -> Option<bool> {
    FRAGILE_TOKENS
        .iter()
        .find(|(accepted, _)| *accepted == token)
        .map(|(_, value)| *value)
}
