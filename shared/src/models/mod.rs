//! Domain models for the Roastery Ledger

mod inventory;
mod pricing;
mod report;
mod roast;

pub use inventory::*;
pub use pricing::*;
pub use report::*;
pub use roast::*;
