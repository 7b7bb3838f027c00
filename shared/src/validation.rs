//! Validation utilities for the Roastery Ledger

use rust_decimal::Decimal;

/// Lower bound of the usual roast weight loss range
pub const TYPICAL_WEIGHT_LOSS_MIN_PERCENT: i64 = 12;

/// Upper bound of the usual roast weight loss range
pub const TYPICAL_WEIGHT_LOSS_MAX_PERCENT: i64 = 20;

/// Largest quantity accepted for a single purchase, roast or depletion
pub const MAX_QUANTITY_KG: i64 = 1_000_000_000;

/// Largest cost accepted per kg or per roast
///
/// Together with [`MAX_QUANTITY_KG`] this keeps every product and running
/// total well inside `Decimal` range.
pub const MAX_COST: i64 = 1_000_000_000;

// ============================================================================
// Quantity and Cost Validations
// ============================================================================

/// Validate a quantity is strictly positive and within range
pub fn validate_positive_quantity(quantity_kg: Decimal) -> Result<(), &'static str> {
    if quantity_kg <= Decimal::ZERO {
        return Err("Quantity must be positive");
    }
    if quantity_kg > Decimal::from(MAX_QUANTITY_KG) {
        return Err("Quantity exceeds 1,000,000,000 kg");
    }
    Ok(())
}

/// Validate a cost is not negative and within range
pub fn validate_non_negative_cost(cost: Decimal) -> Result<(), &'static str> {
    if cost < Decimal::ZERO {
        return Err("Cost cannot be negative");
    }
    if cost > Decimal::from(MAX_COST) {
        return Err("Cost exceeds 1,000,000,000");
    }
    Ok(())
}

/// Validate a bean type label
pub fn validate_bean_type(bean_type: &str) -> Result<(), &'static str> {
    if bean_type.trim().is_empty() {
        return Err("Bean type is required");
    }
    Ok(())
}

// ============================================================================
// Roast Checks
// ============================================================================

/// Check if a weight loss falls in the usual 12-20% roasting range
pub fn is_typical_weight_loss(weight_loss_percent: Decimal) -> bool {
    weight_loss_percent >= Decimal::from(TYPICAL_WEIGHT_LOSS_MIN_PERCENT)
        && weight_loss_percent <= Decimal::from(TYPICAL_WEIGHT_LOSS_MAX_PERCENT)
}
