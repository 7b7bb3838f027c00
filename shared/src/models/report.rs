//! Cost and weight-loss report models

use rust_decimal::Decimal;
use serde::Serialize;

/// Weight loss statistics across all roast batches
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightLossReport {
    pub total_batches: usize,
    pub total_green_beans_used_kg: Decimal,
    pub total_roasted_beans_produced_kg: Decimal,
    pub total_weight_loss_kg: Decimal,
    pub average_weight_loss_percent: Decimal,
    pub min_weight_loss_percent: Decimal,
    pub max_weight_loss_percent: Decimal,
    pub by_roast_level: Vec<RoastLevelLoss>,
}

impl WeightLossReport {
    pub fn empty() -> Self {
        Self {
            total_batches: 0,
            total_green_beans_used_kg: Decimal::ZERO,
            total_roasted_beans_produced_kg: Decimal::ZERO,
            total_weight_loss_kg: Decimal::ZERO,
            average_weight_loss_percent: Decimal::ZERO,
            min_weight_loss_percent: Decimal::ZERO,
            max_weight_loss_percent: Decimal::ZERO,
            by_roast_level: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_batches == 0
    }
}

/// Mean weight loss for one roast level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoastLevelLoss {
    pub roast_level: String,
    pub batch_count: usize,
    pub average_weight_loss_percent: Decimal,
}

/// Cost statistics across all roast batches
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostReport {
    pub total_green_bean_cost: Decimal,
    pub total_roasting_cost: Decimal,
    pub total_cost: Decimal,
    pub total_roasted_kg: Decimal,
    /// Σ total cost / Σ roasted kg
    pub weighted_avg_cost_per_kg_roasted: Decimal,
    pub by_bean_type: Vec<BeanTypeCost>,
}

impl CostReport {
    pub fn empty() -> Self {
        Self {
            total_green_bean_cost: Decimal::ZERO,
            total_roasting_cost: Decimal::ZERO,
            total_cost: Decimal::ZERO,
            total_roasted_kg: Decimal::ZERO,
            weighted_avg_cost_per_kg_roasted: Decimal::ZERO,
            by_bean_type: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_bean_type.is_empty()
    }

    pub fn bean_type(&self, bean_type: &str) -> Option<&BeanTypeCost> {
        self.by_bean_type.iter().find(|c| c.bean_type == bean_type)
    }
}

/// Cost breakdown for one bean type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeanTypeCost {
    pub bean_type: String,
    pub green_bean_cost: Decimal,
    pub roasting_cost: Decimal,
    pub total_cost: Decimal,
    pub roasted_kg: Decimal,
    pub weighted_avg_cost_per_kg: Decimal,
}
