//! WebAssembly module for the Roastery Ledger
//!
//! Provides client-side computation for:
//! - Roast weight loss and roasted weight estimates
//! - Cost per kg of roasted coffee
//! - Suggested selling prices
//! - Batch id validation

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

fn to_decimal(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or(Decimal::ZERO)
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Calculate roast weight loss percentage, rounded to two decimals
#[wasm_bindgen]
pub fn calculate_roast_weight_loss(green_weight: f64, roasted_weight: f64) -> f64 {
    let loss = calculate_weight_loss(to_decimal(green_weight), to_decimal(roasted_weight));
    to_f64(loss.weight_loss_percent)
}

/// Estimate roasted output as JSON
#[wasm_bindgen]
pub fn estimate_roast(green_weight: f64, weight_loss_percent: f64) -> Result<String, JsValue> {
    validate_positive_quantity(to_decimal(green_weight)).map_err(JsValue::from_str)?;

    to_json(&estimate_roasted_weight(
        to_decimal(green_weight),
        to_decimal(weight_loss_percent),
    ))
}

/// Cost per kg of roasted coffee, zero when nothing was produced
#[wasm_bindgen]
pub fn calculate_cost_per_kg_roasted(total_cost: f64, roasted_weight: f64) -> f64 {
    to_f64(round_money(cost_per_kg_roasted(
        to_decimal(total_cost),
        to_decimal(roasted_weight),
    )))
}

/// Suggested selling price breakdown as JSON
#[wasm_bindgen]
pub fn suggest_selling_price(cost_per_kg: f64, margin_percent: f64) -> Result<String, JsValue> {
    validate_non_negative_cost(to_decimal(cost_per_kg)).map_err(JsValue::from_str)?;

    to_json(&suggested_selling_price(
        to_decimal(cost_per_kg),
        to_decimal(margin_percent),
    ))
}

/// Check a batch id has the ROAST-YYYYMMDD-NNNN shape
#[wasm_bindgen]
pub fn is_valid_batch_id(batch_id: &str) -> bool {
    BatchId::from_str(batch_id).is_ok()
}

/// Check a weight loss falls in the usual roasting range
#[wasm_bindgen]
pub fn is_typical_roast(green_weight: f64, roasted_weight: f64) -> bool {
    let loss = calculate_weight_loss(to_decimal(green_weight), to_decimal(roasted_weight));
    is_typical_weight_loss(loss.weight_loss_percent)
}
