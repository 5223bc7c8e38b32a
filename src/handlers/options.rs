use axum::Json;
use serde::Serialize;

use crate::models::registry;

/// Values the input form offers for each field.
#[derive(Debug, Serialize)]
pub struct FormOptions {
    pub ciudades: &'static [&'static str],
    pub categorias: &'static [&'static str],
    pub tipos_servicio: &'static [&'static str],
    pub meses: Vec<u32>,
    pub dias_semana: &'static [&'static str],
    pub fragil: Vec<&'static str>,
}

pub async fn form_options() -> Json<FormOptions> {
    Json(FormOptions {
        ciudades: &registry::CITIES,
        categorias: &registry::CATEGORIES,
        tipos_servicio: &registry::SERVICE_TYPES,
        meses: registry::MONTHS.collect(),
        dias_semana: &registry::WEEKDAYS,
        fragil: registry::FRAGILE_TOKENS.iter().map(|(token, _)| *token).collect(),
    })
}
