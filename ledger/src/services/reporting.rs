//! Reporting service for roast analytics
//! Provides weight loss, cost and stock reports over a ledger

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use shared::{
    round_money, round_percent, round_weight, safe_div, suggested_selling_price, BeanTypeCost,
    CostReport, GreenBeanStock, PriceBreakdown, RoastLevelLoss, RoastedStock, WeightLossReport,
};

use crate::ledger::Ledger;

/// Read-only reports over a [`Ledger`]
#[derive(Debug, Clone, Copy)]
pub struct CostReporter<'a> {
    ledger: &'a Ledger,
}

#[derive(Default)]
struct CostTotals {
    green_bean_cost: Decimal,
    roasting_cost: Decimal,
    total_cost: Decimal,
    roasted_kg: Decimal,
}

impl<'a> CostReporter<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Weight loss statistics across all roast batches
    pub fn weight_loss_report(&self) -> WeightLossReport {
        let batches = self.ledger.roast_log();
        if batches.is_empty() {
            return WeightLossReport::empty();
        }

        let count = Decimal::from(batches.len());
        let mut green = Decimal::ZERO;
        let mut roasted = Decimal::ZERO;
        let mut lost = Decimal::ZERO;
        let mut percent_sum = Decimal::ZERO;
        let mut min = batches[0].weight_loss_percent;
        let mut max = batches[0].weight_loss_percent;
        let mut by_level: BTreeMap<&str, (usize, Decimal)> = BTreeMap::new();

        for batch in batches {
            green += batch.green_bean_kg;
            roasted += batch.roasted_bean_kg;
            lost += batch.weight_loss_kg;
            percent_sum += batch.weight_loss_percent;
            min = min.min(batch.weight_loss_percent);
            max = max.max(batch.weight_loss_percent);

            let level = by_level
                .entry(batch.roast_level.as_str())
                .or_insert((0, Decimal::ZERO));
            level.0 += 1;
            level.1 += batch.weight_loss_percent;
        }

        WeightLossReport {
            total_batches: batches.len(),
            total_green_beans_used_kg: round_weight(green),
            total_roasted_beans_produced_kg: round_weight(roasted),
            total_weight_loss_kg: round_weight(lost),
            average_weight_loss_percent: round_percent(percent_sum / count),
            min_weight_loss_percent: min,
            max_weight_loss_percent: max,
            by_roast_level: by_level
                .into_iter()
                .map(|(roast_level, (batch_count, sum))| RoastLevelLoss {
                    roast_level: roast_level.to_string(),
                    batch_count,
                    average_weight_loss_percent: round_percent(sum / Decimal::from(batch_count)),
                })
                .collect(),
        }
    }

    /// Cost totals across all roast batches, with a per bean type breakdown
    pub fn cost_report(&self) -> CostReport {
        let records = self.ledger.roasted_inventory();
        if records.is_empty() {
            return CostReport::empty();
        }

        let mut overall = CostTotals::default();
        let mut by_type: BTreeMap<&str, CostTotals> = BTreeMap::new();
        for record in records {
            for totals in [&mut overall, by_type.entry(record.bean_type.as_str()).or_default()] {
                totals.green_bean_cost += record.green_bean_cost;
                totals.roasting_cost += record.roasting_cost;
                totals.total_cost += record.total_cost;
                totals.roasted_kg += record.roasted_bean_kg;
            }
        }

        CostReport {
            total_green_bean_cost: round_money(overall.green_bean_cost),
            total_roasting_cost: round_money(overall.roasting_cost),
            total_cost: round_money(overall.total_cost),
            total_roasted_kg: round_weight(overall.roasted_kg),
            weighted_avg_cost_per_kg_roasted: round_money(safe_div(
                overall.total_cost,
                overall.roasted_kg,
            )),
            by_bean_type: by_type
                .into_iter()
                .map(|(bean_type, totals)| BeanTypeCost {
                    bean_type: bean_type.to_string(),
                    green_bean_cost: round_money(totals.green_bean_cost),
                    roasting_cost: round_money(totals.roasting_cost),
                    total_cost: round_money(totals.total_cost),
                    roasted_kg: round_weight(totals.roasted_kg),
                    weighted_avg_cost_per_kg: round_money(safe_div(
                        totals.total_cost,
                        totals.roasted_kg,
                    )),
                })
                .collect(),
        }
    }

    /// Roasted output per bean type with its frozen cost basis
    pub fn roasted_stock_summary(&self) -> Vec<RoastedStock> {
        let mut by_type: BTreeMap<&str, (Decimal, Decimal)> = BTreeMap::new();
        for record in self.ledger.roasted_inventory() {
            let entry = by_type
                .entry(record.bean_type.as_str())
                .or_insert((Decimal::ZERO, Decimal::ZERO));
            entry.0 += record.roasted_bean_kg;
            entry.1 += record.total_cost;
        }

        by_type
            .into_iter()
            .map(|(bean_type, (roasted_kg, total_cost))| RoastedStock {
                bean_type: bean_type.to_string(),
                total_roasted_kg: round_weight(roasted_kg),
                weighted_avg_cost_per_kg: round_money(safe_div(total_cost, roasted_kg)),
                total_cost: round_money(total_cost),
            })
            .collect()
    }

    /// Remaining green bean stock per bean type
    pub fn green_bean_summary(&self) -> Vec<GreenBeanStock> {
        self.ledger.green_beans().stock_summary()
    }

    /// Suggested selling price as a markup on cost
    pub fn suggested_selling_price(
        &self,
        cost_per_kg: Decimal,
        margin_percent: Decimal,
    ) -> PriceBreakdown {
        suggested_selling_price(cost_per_kg, margin_percent)
    }

    /// Suggested price per bean type from its weighted roasted cost
    pub fn price_list(&self, margin_percent: Decimal) -> Vec<(String, PriceBreakdown)> {
        self.cost_report()
            .by_bean_type
            .into_iter()
            .map(|cost| {
                let price = suggested_selling_price(cost.weighted_avg_cost_per_kg, margin_percent);
                (cost.bean_type, price)
            })
            .collect()
    }
}
