//! Green and roasted bean inventory models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One lot of green beans bought at one time
///
/// `quantity_kg` is the only field that changes after creation: roasting
/// depletes it down to zero. `total_cost` keeps the purchase-time value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub date: DateTime<Utc>,
    pub bean_type: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity_kg: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub cost_per_kg: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_cost: Decimal,
    pub supplier: Option<String>,
}

impl PurchaseRecord {
    /// Column order of the exported purchases table
    pub const COLUMNS: [&'static str; 6] = [
        "date",
        "bean_type",
        "quantity_kg",
        "cost_per_kg",
        "total_cost",
        "supplier",
    ];

    pub fn new(
        date: DateTime<Utc>,
        bean_type: impl Into<String>,
        quantity_kg: Decimal,
        cost_per_kg: Decimal,
        supplier: Option<String>,
    ) -> Self {
        Self {
            date,
            bean_type: bean_type.into(),
            quantity_kg,
            cost_per_kg,
            total_cost: quantity_kg * cost_per_kg,
            supplier,
        }
    }

    /// Value of the stock still held in this lot
    pub fn remaining_value(&self) -> Decimal {
        self.quantity_kg * self.cost_per_kg
    }

    pub fn is_depleted(&self) -> bool {
        self.quantity_kg <= Decimal::ZERO
    }
}

/// Result of recording a purchase
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseSummary {
    pub bean_type: String,
    pub quantity_kg: Decimal,
    pub cost_per_kg: Decimal,
    pub total_cost: Decimal,
    pub message: String,
}

impl From<&PurchaseRecord> for PurchaseSummary {
    fn from(record: &PurchaseRecord) -> Self {
        Self {
            bean_type: record.bean_type.clone(),
            quantity_kg: record.quantity_kg,
            cost_per_kg: record.cost_per_kg,
            total_cost: record.total_cost,
            message: format!(
                "Added {} kg of {} green beans to inventory",
                record.quantity_kg, record.bean_type
            ),
        }
    }
}

/// Remaining green bean stock for one bean type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GreenBeanStock {
    pub bean_type: String,
    pub total_quantity_kg: Decimal,
    /// Weighted by remaining quantity, not purchased quantity
    pub weighted_avg_cost_per_kg: Decimal,
    pub total_value: Decimal,
}

/// Roasted bean production for one bean type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoastedStock {
    pub bean_type: String,
    pub total_roasted_kg: Decimal,
    pub weighted_avg_cost_per_kg: Decimal,
    pub total_cost: Decimal,
}

/// A bean type whose remaining stock is at or below a threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LowStockAlert {
    pub bean_type: String,
    pub remaining_kg: Decimal,
    pub threshold_kg: Decimal,
}

impl LowStockAlert {
    pub fn is_out_of_stock(&self) -> bool {
        self.remaining_kg.is_zero()
    }
}
