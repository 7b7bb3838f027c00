//! Shared types and models for the Roastery Ledger
//!
//! This crate contains the records, report shapes and pure cost/weight
//! calculations shared between the ledger library, the demo driver and the
//! WASM bindings.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
