//! The roastery ledger aggregate

use rust_decimal::Decimal;
use shared::{PurchaseSummary, RoastBatchRecord, RoastedInventoryRecord};

use crate::error::LedgerResult;
use crate::services::{GreenBeanLedger, RecordPurchaseInput};

/// Purchases, roast batches and their cost twins for one roastery
///
/// The ledger is passed explicitly to every operation that needs it; the
/// roast log and roasted inventory only ever grow, and only through
/// [`RoastEngine`](crate::services::RoastEngine).
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    green_beans: GreenBeanLedger,
    roast_log: Vec<RoastBatchRecord>,
    roasted_inventory: Vec<RoastedInventoryRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a green bean purchase
    pub fn record_purchase(&mut self, input: RecordPurchaseInput) -> LedgerResult<PurchaseSummary> {
        self.green_beans.record_purchase(input)
    }

    /// Weighted average cost per kg of the remaining stock of a bean type
    pub fn average_cost(&self, bean_type: &str) -> Decimal {
        self.green_beans.average_cost(bean_type)
    }

    pub fn green_beans(&self) -> &GreenBeanLedger {
        &self.green_beans
    }

    pub fn green_beans_mut(&mut self) -> &mut GreenBeanLedger {
        &mut self.green_beans
    }

    pub fn roast_log(&self) -> &[RoastBatchRecord] {
        &self.roast_log
    }

    pub fn roasted_inventory(&self) -> &[RoastedInventoryRecord] {
        &self.roasted_inventory
    }

    /// Number of roast batches recorded so far
    pub fn batch_count(&self) -> usize {
        self.roast_log.len()
    }

    pub(crate) fn append_batch(&mut self, batch: RoastBatchRecord, roasted: RoastedInventoryRecord) {
        self.roast_log.push(batch);
        self.roasted_inventory.push(roasted);
    }
}
