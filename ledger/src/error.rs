//! Error handling for the Roastery Ledger
//!
//! Validation failures are reported synchronously at the call that introduced
//! them. Division guards never error; they return zero.

use rust_decimal::Decimal;
use thiserror::Error;

/// Ledger error types
#[derive(Error, Debug)]
pub enum LedgerError {
    // Validation errors
    #[error("Invalid quantity for {field}: {message} (got {value})")]
    InvalidQuantity {
        field: &'static str,
        value: Decimal,
        message: &'static str,
    },

    #[error("Invalid cost for {field}: {message} (got {value})")]
    InvalidCost {
        field: &'static str,
        value: Decimal,
        message: &'static str,
    },

    #[error("Invalid bean type: {0}")]
    InvalidBeanType(&'static str),

    #[error("Roasted weight {roasted_bean_kg} kg exceeds green weight {green_bean_kg} kg")]
    WeightGain {
        green_bean_kg: Decimal,
        roasted_bean_kg: Decimal,
    },

    // Export errors
    #[error("Unexpected columns in {table} table: {found}")]
    UnexpectedColumns { table: &'static str, found: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Concurrency errors
    #[error("Ledger lock poisoned by a panicked writer")]
    LockPoisoned,
}

impl LedgerError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::InvalidQuantity { .. } => "INVALID_QUANTITY",
            LedgerError::InvalidCost { .. } => "INVALID_COST",
            LedgerError::InvalidBeanType(_) => "INVALID_BEAN_TYPE",
            LedgerError::WeightGain { .. } => "WEIGHT_GAIN",
            LedgerError::UnexpectedColumns { .. } => "UNEXPECTED_COLUMNS",
            LedgerError::Csv(_) => "CSV_ERROR",
            LedgerError::Io(_) => "IO_ERROR",
            LedgerError::LockPoisoned => "LOCK_POISONED",
        }
    }

    /// True for errors caused by caller input rather than the environment
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LedgerError::InvalidQuantity { .. }
                | LedgerError::InvalidCost { .. }
                | LedgerError::InvalidBeanType(_)
                | LedgerError::WeightGain { .. }
        )
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Validate a strictly positive quantity field
pub(crate) fn check_quantity(field: &'static str, value: Decimal) -> LedgerResult<()> {
    shared::validate_positive_quantity(value).map_err(|message| LedgerError::InvalidQuantity {
        field,
        value,
        message,
    })
}

/// Validate a non-negative cost field
pub(crate) fn check_cost(field: &'static str, value: Decimal) -> LedgerResult<()> {
    shared::validate_non_negative_cost(value).map_err(|message| LedgerError::InvalidCost {
        field,
        value,
        message,
    })
}

/// Validate a bean type label
pub(crate) fn check_bean_type(bean_type: &str) -> LedgerResult<()> {
    shared::validate_bean_type(bean_type).map_err(LedgerError::InvalidBeanType)
}
