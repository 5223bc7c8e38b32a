//! Wire shapes of `/predict` responses.
//!
//! Costs are rounded half away from zero on the shortest decimal form of the
//! model output, so 12.345 becomes 12.35 and 0.125 becomes 0.13, and are always
//! written with two decimal digits.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use serde_json::Number;
use std::str::FromStr;

use crate::error::PredictError;

pub const COST_DECIMALS: u32 = 2;

/// From this magnitude up every `f64` is a whole number (2^53).
const WHOLE_NUMBERS_FROM: f64 = 9_007_199_254_740_992.0;

/// Below this magnitude a cost rounds to zero.
const ROUNDS_TO_ZERO_BELOW: f64 = 0.001;

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    /// Written verbatim, so `12.30` keeps its trailing zero.
    pub prediction: Number,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Decimal text of a cost with exactly two fractional digits.
pub fn format_cost(raw: f64) -> Result<String, PredictError> {
    if !raw.is_finite() {
        return Err(PredictError::Unexpected(format!(
            "prediction {raw} is not a finite number"
        )));
    }
    if raw.abs() < ROUNDS_TO_ZERO_BELOW {
        return Ok("0.00".to_string());
    }
    if raw.abs() >= WHOLE_NUMBERS_FROM {
        // `Display` for f64 never uses exponent form, so this is all integer digits.
        return Ok(format!("{raw}.00"));
    }

    // `Display` for f64 is the shortest string that round-trips.
    let exact = Decimal::from_str(&raw.to_string()).map_err(|e| {
        PredictError::Unexpected(format!("prediction {raw} cannot be represented: {e}"))
    })?;

    let mut rounded =
        exact.round_dp_with_strategy(COST_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(COST_DECIMALS);
    if rounded.scale() != COST_DECIMALS {
        return Err(PredictError::Unexpected(format!(
            "prediction {raw} is out of the representable cost range"
        )));
    }
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    Ok(rounded.to_string())
}

pub fn prediction(raw: f64) -> Result<PredictionResponse, PredictError> {
    let text = format_cost(raw)?;
    let prediction = serde_json::from_str::<Number>(&text).map_err(|e| {
        PredictError::Unexpected(format!("cost {text} is not a JSON number: {e}"))
    })?;
    Ok(PredictionResponse { prediction })
}
