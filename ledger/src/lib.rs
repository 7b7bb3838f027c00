//! Roastery Ledger
//!
//! Green bean purchases with weighted-average costing, roast batches with a
//! frozen cost basis, FIFO stock depletion, cost reports and CSV export.

pub mod config;
pub mod error;
pub mod ledger;
pub mod services;
pub mod state;

pub use config::{Config, WeightGainPolicy};
pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;
pub use services::{
    CostReporter, CsvExporter, GreenBeanLedger, RecordPurchaseInput, RoastEngine, RoastInput,
};
pub use state::SharedLedger;
