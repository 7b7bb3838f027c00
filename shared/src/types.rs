//! Common types used across the ledger

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix shared by every roast batch identifier
pub const BATCH_ID_PREFIX: &str = "ROAST";

/// Roast batch identifier in the form `ROAST-YYYYMMDD-NNNN`
///
/// The sequence is the global batch count at the time of roasting, so an id is
/// only unique in combination with its date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(String);

impl BatchId {
    pub fn new(date: NaiveDate, sequence: usize) -> Self {
        Self(format!(
            "{}-{}-{:04}",
            BATCH_ID_PREFIX,
            date.format("%Y%m%d"),
            sequence
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Date component of the id
    pub fn date(&self) -> Option<NaiveDate> {
        self.0
            .split('-')
            .nth(1)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y%m%d").ok())
    }

    /// Sequence component of the id
    pub fn sequence(&self) -> Option<usize> {
        self.0.rsplit('-').next().and_then(|s| s.parse().ok())
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors produced when parsing a batch id
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchIdError {
    #[error("Batch id must have the form ROAST-YYYYMMDD-NNNN: {0}")]
    Format(String),

    #[error("Invalid date in batch id: {0}")]
    Date(String),

    #[error("Invalid sequence in batch id: {0}")]
    Sequence(String),
}

impl FromStr for BatchId {
    type Err = BatchIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 3 || parts[0] != BATCH_ID_PREFIX {
            return Err(BatchIdError::Format(s.to_string()));
        }

        let date = NaiveDate::parse_from_str(parts[1], "%Y%m%d")
            .map_err(|_| BatchIdError::Date(parts[1].to_string()))?;

        if parts[2].len() < 4 || !parts[2].chars().all(|c| c.is_ascii_digit()) {
            return Err(BatchIdError::Sequence(parts[2].to_string()));
        }
        let sequence: usize = parts[2]
            .parse()
            .map_err(|_| BatchIdError::Sequence(parts[2].to_string()))?;
        if sequence == 0 {
            return Err(BatchIdError::Sequence(parts[2].to_string()));
        }

        Ok(BatchId::new(date, sequence))
    }
}

// ============================================================================
// Rounding
// ============================================================================

/// Round a money amount to cents
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a weight to grams
pub fn round_weight(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a percentage to two decimals
pub fn round_percent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Divide, returning zero when the denominator is zero
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}
