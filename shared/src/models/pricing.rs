//! Selling price models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{round_money, round_percent, safe_div};

/// Default markup applied when pricing roasted coffee
pub const DEFAULT_MARGIN_PERCENT: i64 = 30;

/// Price breakdown for one kilogram of roasted coffee
///
/// `margin_percent` is a markup on cost: the profit is a share of the cost,
/// not of the selling price. `effective_margin_percent` gives the share of the
/// selling price that is profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub cost_per_kg: Decimal,
    pub margin_percent: Decimal,
    pub profit_per_kg: Decimal,
    pub suggested_selling_price_per_kg: Decimal,
}

impl PriceBreakdown {
    /// Profit as a percentage of the selling price
    pub fn effective_margin_percent(&self) -> Decimal {
        round_percent(
            safe_div(self.profit_per_kg, self.suggested_selling_price_per_kg) * Decimal::from(100),
        )
    }
}

/// Suggest a selling price
/// Formula: price = cost × (1 + margin / 100)
pub fn suggested_selling_price(cost_per_kg: Decimal, margin_percent: Decimal) -> PriceBreakdown {
    let profit = cost_per_kg * margin_percent / Decimal::from(100);

    PriceBreakdown {
        cost_per_kg: round_money(cost_per_kg),
        margin_percent,
        profit_per_kg: round_money(profit),
        suggested_selling_price_per_kg: round_money(cost_per_kg + profit),
    }
}
