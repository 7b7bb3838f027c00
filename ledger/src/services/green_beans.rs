//! Green bean purchase ledger with weighted-average costing and FIFO depletion

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{safe_div, GreenBeanStock, LowStockAlert, PurchaseRecord, PurchaseSummary};

use crate::error::{check_bean_type, check_cost, check_quantity, LedgerResult};

/// Append-only record of green bean purchases
///
/// Insertion order is significant: depletion always consumes the earliest
/// recorded lot first, whatever its `date`.
#[derive(Debug, Clone, Default)]
pub struct GreenBeanLedger {
    purchases: Vec<PurchaseRecord>,
}

/// Input for recording a green bean purchase
#[derive(Debug, Clone, Deserialize)]
pub struct RecordPurchaseInput {
    pub bean_type: String,
    pub quantity_kg: Decimal,
    pub cost_per_kg: Decimal,
    /// Blank names are recorded as no supplier
    pub supplier: Option<String>,
    /// Defaults to now
    pub date: Option<DateTime<Utc>>,
}

impl RecordPurchaseInput {
    pub fn new(bean_type: impl Into<String>, quantity_kg: Decimal, cost_per_kg: Decimal) -> Self {
        Self {
            bean_type: bean_type.into(),
            quantity_kg,
            cost_per_kg,
            supplier: None,
            date: None,
        }
    }

    pub fn supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }
}

impl GreenBeanLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a purchase at the end of the ledger
    pub fn record_purchase(&mut self, input: RecordPurchaseInput) -> LedgerResult<PurchaseSummary> {
        check_bean_type(&input.bean_type)?;
        check_quantity("quantity_kg", input.quantity_kg)?;
        check_cost("cost_per_kg", input.cost_per_kg)?;

        let record = PurchaseRecord::new(
            input.date.unwrap_or_else(Utc::now),
            input.bean_type,
            input.quantity_kg,
            input.cost_per_kg,
            input.supplier.filter(|s| !s.trim().is_empty()),
        );

        tracing::info!(
            bean_type = %record.bean_type,
            quantity_kg = %record.quantity_kg,
            cost_per_kg = %record.cost_per_kg,
            "Recorded green bean purchase"
        );

        let summary = PurchaseSummary::from(&record);
        self.purchases.push(record);
        Ok(summary)
    }

    /// Weighted average cost per kg of the remaining stock of a bean type
    ///
    /// Returns zero for unknown or fully depleted bean types.
    pub fn average_cost(&self, bean_type: &str) -> Decimal {
        let (quantity, value) = self
            .remaining_lots(bean_type)
            .fold((Decimal::ZERO, Decimal::ZERO), |(q, v), r| {
                (q + r.quantity_kg, v + r.remaining_value())
            });

        safe_div(value, quantity)
    }

    /// Remove stock of a bean type, oldest lot first
    ///
    /// A shortfall is clamped: every matching lot ends at zero and the
    /// unsatisfied amount is returned instead of raising an error.
    pub fn deplete(&mut self, bean_type: &str, quantity_kg: Decimal) -> LedgerResult<Decimal> {
        check_quantity("quantity_kg", quantity_kg)?;

        let mut remaining = quantity_kg;
        for record in self
            .purchases
            .iter_mut()
            .filter(|r| r.bean_type == bean_type && r.quantity_kg > Decimal::ZERO)
        {
            let drawn = record.quantity_kg.min(remaining);
            record.quantity_kg -= drawn;
            remaining -= drawn;

            tracing::debug!(
                bean_type,
                drawn_kg = %drawn,
                left_in_lot_kg = %record.quantity_kg,
                "Depleted green bean lot"
            );

            if remaining.is_zero() {
                break;
            }
        }

        if remaining > Decimal::ZERO {
            tracing::warn!(
                bean_type,
                requested_kg = %quantity_kg,
                shortfall_kg = %remaining,
                "Green bean stock exhausted before depletion was satisfied"
            );
        }

        Ok(remaining)
    }

    /// Remaining stock per bean type, ordered by bean type
    pub fn stock_summary(&self) -> Vec<GreenBeanStock> {
        let mut by_type: BTreeMap<&str, (Decimal, Decimal)> = BTreeMap::new();
        for record in self.purchases.iter().filter(|r| !r.is_depleted()) {
            let entry = by_type
                .entry(record.bean_type.as_str())
                .or_insert((Decimal::ZERO, Decimal::ZERO));
            entry.0 += record.quantity_kg;
            entry.1 += record.remaining_value();
        }

        by_type
            .into_iter()
            .map(|(bean_type, (quantity, value))| GreenBeanStock {
                bean_type: bean_type.to_string(),
                total_quantity_kg: quantity,
                weighted_avg_cost_per_kg: safe_div(value, quantity),
                total_value: value,
            })
            .collect()
    }

    /// Remaining kilograms of a bean type
    pub fn remaining_kg(&self, bean_type: &str) -> Decimal {
        self.remaining_lots(bean_type).map(|r| r.quantity_kg).sum()
    }

    /// Bean types at or below the threshold, including fully depleted ones
    pub fn low_stock(&self, threshold_kg: Decimal) -> Vec<LowStockAlert> {
        let mut by_type: BTreeMap<&str, Decimal> = BTreeMap::new();
        for record in &self.purchases {
            *by_type.entry(record.bean_type.as_str()).or_insert(Decimal::ZERO) += record.quantity_kg;
        }

        by_type
            .into_iter()
            .filter(|(_, remaining)| *remaining <= threshold_kg)
            .map(|(bean_type, remaining_kg)| LowStockAlert {
                bean_type: bean_type.to_string(),
                remaining_kg,
                threshold_kg,
            })
            .collect()
    }

    /// All purchase records in insertion order
    pub fn purchases(&self) -> &[PurchaseRecord] {
        &self.purchases
    }

    pub fn is_empty(&self) -> bool {
        self.purchases.is_empty()
    }

    fn remaining_lots<'a>(&'a self, bean_type: &'a str) -> impl Iterator<Item = &'a PurchaseRecord> {
        self.purchases
            .iter()
            .filter(move |r| r.bean_type == bean_type && !r.is_depleted())
    }
}
