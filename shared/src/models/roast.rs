//! Roast batch models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{round_money, round_percent, round_weight, safe_div, BatchId};

/// Default roast level label when the caller gives none
pub const DEFAULT_ROAST_LEVEL: &str = "medium";

/// Default expected weight loss used for estimates
pub const DEFAULT_EXPECTED_WEIGHT_LOSS_PERCENT: i64 = 15;

/// One execution of the roasting process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoastBatchRecord {
    pub date: DateTime<Utc>,
    pub batch_id: BatchId,
    pub bean_type: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub green_bean_kg: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub roasted_bean_kg: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub weight_loss_kg: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub weight_loss_percent: Decimal,
    /// Free-form label (light, medium, dark, ...)
    pub roast_level: String,
    pub duration_minutes: Option<u32>,
}

impl RoastBatchRecord {
    /// Column order of the exported roasting log
    pub const COLUMNS: [&'static str; 9] = [
        "date",
        "batch_id",
        "bean_type",
        "green_bean_kg",
        "roasted_bean_kg",
        "weight_loss_kg",
        "weight_loss_percent",
        "roast_level",
        "duration_minutes",
    ];
}

/// Cost-accounting twin of a [`RoastBatchRecord`]
///
/// Costs are frozen at creation; later purchases never change them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoastedInventoryRecord {
    pub date: DateTime<Utc>,
    pub bean_type: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub green_bean_used_kg: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub roasted_bean_kg: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub weight_loss_kg: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub weight_loss_percent: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub roasting_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub green_bean_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub cost_per_kg_roasted: Decimal,
}

impl RoastedInventoryRecord {
    /// Column order of the exported roasted inventory table
    pub const COLUMNS: [&'static str; 10] = [
        "date",
        "bean_type",
        "green_bean_used_kg",
        "roasted_bean_kg",
        "weight_loss_kg",
        "weight_loss_percent",
        "roasting_cost",
        "green_bean_cost",
        "total_cost",
        "cost_per_kg_roasted",
    ];
}

/// Result of a roast, with money rounded to cents
#[derive(Debug, Clone, Serialize)]
pub struct RoastSummary {
    pub batch_id: BatchId,
    pub bean_type: String,
    pub green_bean_kg: Decimal,
    pub roasted_bean_kg: Decimal,
    pub weight_loss_kg: Decimal,
    pub weight_loss_percent: Decimal,
    pub green_bean_cost: Decimal,
    pub roasting_cost: Decimal,
    pub total_cost: Decimal,
    pub cost_per_kg_roasted: Decimal,
    pub roast_level: String,
    pub message: String,
}

impl RoastSummary {
    pub fn from_records(batch: &RoastBatchRecord, roasted: &RoastedInventoryRecord) -> Self {
        Self {
            batch_id: batch.batch_id.clone(),
            bean_type: batch.bean_type.clone(),
            green_bean_kg: batch.green_bean_kg,
            roasted_bean_kg: batch.roasted_bean_kg,
            weight_loss_kg: batch.weight_loss_kg,
            weight_loss_percent: batch.weight_loss_percent,
            green_bean_cost: round_money(roasted.green_bean_cost),
            roasting_cost: round_money(roasted.roasting_cost),
            total_cost: round_money(roasted.total_cost),
            cost_per_kg_roasted: round_money(roasted.cost_per_kg_roasted),
            roast_level: batch.roast_level.clone(),
            message: format!(
                "Roasted {} kg of {} green beans → {} kg roasted ({}% weight loss)",
                batch.green_bean_kg,
                batch.bean_type,
                batch.roasted_bean_kg,
                batch.weight_loss_percent
            ),
        }
    }
}

/// Weight lost during a roast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightLoss {
    pub green_bean_kg: Decimal,
    pub roasted_bean_kg: Decimal,
    /// Rounded to grams
    pub weight_loss_kg: Decimal,
    /// Rounded to two decimals; negative when the roast gained weight
    pub weight_loss_percent: Decimal,
}

impl WeightLoss {
    pub fn is_gain(&self) -> bool {
        self.roasted_bean_kg > self.green_bean_kg
    }
}

/// Expected roast output for a planned batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoastEstimate {
    pub green_bean_kg: Decimal,
    pub estimated_roasted_kg: Decimal,
    pub expected_weight_loss_kg: Decimal,
    pub weight_loss_percent: Decimal,
}

/// Calculate weight loss
/// Formula: loss = green - roasted, percent = (loss / green) × 100
pub fn calculate_weight_loss(green_bean_kg: Decimal, roasted_bean_kg: Decimal) -> WeightLoss {
    let loss = green_bean_kg - roasted_bean_kg;
    let percent = safe_div(loss, green_bean_kg) * Decimal::from(100);

    WeightLoss {
        green_bean_kg,
        roasted_bean_kg,
        weight_loss_kg: round_weight(loss),
        weight_loss_percent: round_percent(percent),
    }
}

/// Estimate roasted output from an expected weight loss percentage
pub fn estimate_roasted_weight(green_bean_kg: Decimal, weight_loss_percent: Decimal) -> RoastEstimate {
    let loss = green_bean_kg * weight_loss_percent / Decimal::from(100);

    RoastEstimate {
        green_bean_kg,
        estimated_roasted_kg: round_weight(green_bean_kg - loss),
        expected_weight_loss_kg: round_weight(loss),
        weight_loss_percent,
    }
}

/// Cost per kilogram of roasted coffee, zero when nothing was produced
pub fn cost_per_kg_roasted(total_cost: Decimal, roasted_bean_kg: Decimal) -> Decimal {
    if roasted_bean_kg > Decimal::ZERO {
        total_cost / roasted_bean_kg
    } else {
        Decimal::ZERO
    }
}
