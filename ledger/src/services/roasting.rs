//! Roast engine: records roast batches and freezes their cost basis

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{
    calculate_weight_loss, cost_per_kg_roasted, estimate_roasted_weight, is_typical_weight_loss,
    BatchId, RoastBatchRecord, RoastEstimate, RoastSummary, RoastedInventoryRecord,
};

use crate::config::{RoastingConfig, WeightGainPolicy};
use crate::error::{check_bean_type, check_cost, check_quantity, LedgerError, LedgerResult};
use crate::ledger::Ledger;

/// Records roast batches against a [`Ledger`]
#[derive(Debug, Clone)]
pub struct RoastEngine {
    default_roast_level: String,
    expected_weight_loss_percent: Decimal,
    weight_gain_policy: WeightGainPolicy,
}

/// Input for recording a roast batch
#[derive(Debug, Clone, Deserialize)]
pub struct RoastInput {
    pub bean_type: String,
    pub green_bean_kg: Decimal,
    pub roasted_bean_kg: Decimal,
    /// Labor, energy and other roasting costs for the whole batch
    pub roasting_cost: Decimal,
    /// Defaults to the engine's configured roast level
    pub roast_level: Option<String>,
    pub duration_minutes: Option<u32>,
    /// Defaults to now
    pub date: Option<DateTime<Utc>>,
}

impl RoastInput {
    pub fn new(
        bean_type: impl Into<String>,
        green_bean_kg: Decimal,
        roasted_bean_kg: Decimal,
        roasting_cost: Decimal,
    ) -> Self {
        Self {
            bean_type: bean_type.into(),
            green_bean_kg,
            roasted_bean_kg,
            roasting_cost,
            roast_level: None,
            duration_minutes: None,
            date: None,
        }
    }

    pub fn roast_level(mut self, roast_level: impl Into<String>) -> Self {
        self.roast_level = Some(roast_level.into());
        self
    }

    pub fn duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }
}

impl Default for RoastEngine {
    fn default() -> Self {
        Self::new(&RoastingConfig::default())
    }
}

impl RoastEngine {
    /// Create a new RoastEngine from roasting configuration
    pub fn new(config: &RoastingConfig) -> Self {
        Self {
            default_roast_level: config.default_roast_level.clone(),
            expected_weight_loss_percent: config.expected_weight_loss_percent,
            weight_gain_policy: config.weight_gain_policy,
        }
    }

    pub fn with_weight_gain_policy(mut self, policy: WeightGainPolicy) -> Self {
        self.weight_gain_policy = policy;
        self
    }

    pub fn weight_gain_policy(&self) -> WeightGainPolicy {
        self.weight_gain_policy
    }

    /// Record a roast batch and deplete the green beans it consumed
    ///
    /// The green bean cost uses the weighted average cost read before
    /// depletion. Bean types with no recorded purchases cost zero.
    pub fn roast(&self, ledger: &mut Ledger, input: RoastInput) -> LedgerResult<RoastSummary> {
        check_bean_type(&input.bean_type)?;
        check_quantity("green_bean_kg", input.green_bean_kg)?;
        check_quantity("roasted_bean_kg", input.roasted_bean_kg)?;
        check_cost("roasting_cost", input.roasting_cost)?;

        let weight_loss = calculate_weight_loss(input.green_bean_kg, input.roasted_bean_kg);
        if weight_loss.is_gain() {
            match self.weight_gain_policy {
                WeightGainPolicy::Reject => {
                    return Err(LedgerError::WeightGain {
                        green_bean_kg: input.green_bean_kg,
                        roasted_bean_kg: input.roasted_bean_kg,
                    });
                }
                WeightGainPolicy::Warn => tracing::warn!(
                    bean_type = %input.bean_type,
                    green_bean_kg = %input.green_bean_kg,
                    roasted_bean_kg = %input.roasted_bean_kg,
                    "Roast reported weight gain"
                ),
                WeightGainPolicy::Allow => {}
            }
        } else if !is_typical_weight_loss(weight_loss.weight_loss_percent) {
            tracing::debug!(
                bean_type = %input.bean_type,
                weight_loss_percent = %weight_loss.weight_loss_percent,
                "Weight loss outside the usual roasting range"
            );
        }

        // Cost basis is fixed before depletion touches the lots
        let average_cost = ledger.average_cost(&input.bean_type);
        let green_bean_cost = input.green_bean_kg * average_cost;
        let total_cost = green_bean_cost + input.roasting_cost;
        let cost_per_kg = cost_per_kg_roasted(total_cost, input.roasted_bean_kg);

        let date = input.date.unwrap_or_else(Utc::now);
        let batch_id = BatchId::new(date.date_naive(), ledger.batch_count() + 1);
        let roast_level = input
            .roast_level
            .unwrap_or_else(|| self.default_roast_level.clone());

        let batch = RoastBatchRecord {
            date,
            batch_id,
            bean_type: input.bean_type.clone(),
            green_bean_kg: input.green_bean_kg,
            roasted_bean_kg: input.roasted_bean_kg,
            weight_loss_kg: weight_loss.weight_loss_kg,
            weight_loss_percent: weight_loss.weight_loss_percent,
            roast_level,
            duration_minutes: input.duration_minutes,
        };

        let roasted = RoastedInventoryRecord {
            date,
            bean_type: input.bean_type.clone(),
            green_bean_used_kg: input.green_bean_kg,
            roasted_bean_kg: input.roasted_bean_kg,
            weight_loss_kg: weight_loss.weight_loss_kg,
            weight_loss_percent: weight_loss.weight_loss_percent,
            roasting_cost: input.roasting_cost,
            green_bean_cost,
            total_cost,
            cost_per_kg_roasted: cost_per_kg,
        };

        let summary = RoastSummary::from_records(&batch, &roasted);
        ledger.append_batch(batch, roasted);
        ledger
            .green_beans_mut()
            .deplete(&input.bean_type, input.green_bean_kg)?;

        tracing::info!(
            batch_id = %summary.batch_id,
            bean_type = %summary.bean_type,
            weight_loss_percent = %summary.weight_loss_percent,
            cost_per_kg_roasted = %summary.cost_per_kg_roasted,
            "Recorded roast batch"
        );

        Ok(summary)
    }

    /// Estimate roasted output using the configured expected weight loss
    pub fn estimate(&self, green_bean_kg: Decimal) -> RoastEstimate {
        estimate_roasted_weight(green_bean_kg, self.expected_weight_loss_percent)
    }
}
