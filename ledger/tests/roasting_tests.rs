//! Roast engine tests
//!
//! Tests for roasting operations including:
//! - Cost basis read before depletion and frozen afterwards
//! - Batch id sequencing across bean types
//! - Weight gain policies

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use roastery_ledger::{
    Ledger, LedgerError, RecordPurchaseInput, RoastEngine, RoastInput, WeightGainPolicy,
};
use rust_decimal::Decimal;
use std::str::FromStr;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn roast_day() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap()
}

fn ledger_with(purchases: &[(&str, &str, &str)]) -> Ledger {
    let mut ledger = Ledger::new();
    for (bean_type, quantity, cost) in purchases {
        ledger
            .record_purchase(RecordPurchaseInput::new(*bean_type, dec(quantity), dec(cost)))
            .unwrap();
    }
    ledger
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_end_to_end_single_origin() {
        let mut ledger = ledger_with(&[("Ethiopian Yirgacheffe", "50", "15")]);
        let engine = RoastEngine::default();

        let summary = engine
            .roast(
                &mut ledger,
                RoastInput::new("Ethiopian Yirgacheffe", dec("10"), dec("8.7"), dec("25"))
                    .roast_level("light")
                    .duration_minutes(12)
                    .date(roast_day()),
            )
            .unwrap();

        assert_eq!(summary.batch_id.as_str(), "ROAST-20240315-0001");
        assert_eq!(summary.weight_loss_kg, dec("1.3"));
        assert_eq!(summary.weight_loss_percent, dec("13"));
        assert_eq!(summary.green_bean_cost, dec("150.00"));
        assert_eq!(summary.total_cost, dec("175.00"));
        assert_eq!(summary.cost_per_kg_roasted, dec("20.11"));
        assert_eq!(summary.roast_level, "light");

        let stock = ledger.green_beans().stock_summary();
        assert_eq!(stock[0].total_quantity_kg, dec("40"));
        assert_eq!(stock[0].weighted_avg_cost_per_kg, dec("15"));
    }

    #[test]
    fn test_records_are_twins() {
        let mut ledger = ledger_with(&[("Kenya AA", "20", "10")]);
        RoastEngine::default()
            .roast(
                &mut ledger,
                RoastInput::new("Kenya AA", dec("10"), dec("8.5"), dec("15")).date(roast_day()),
            )
            .unwrap();

        let batch = &ledger.roast_log()[0];
        let roasted = &ledger.roasted_inventory()[0];
        assert_eq!(batch.date, roasted.date);
        assert_eq!(batch.bean_type, roasted.bean_type);
        assert_eq!(batch.green_bean_kg, roasted.green_bean_used_kg);
        assert_eq!(batch.weight_loss_percent, roasted.weight_loss_percent);
        assert_eq!(roasted.green_bean_cost, dec("100"));
        assert_eq!(roasted.total_cost, dec("115"));
        assert_eq!(batch.duration_minutes, None);
    }

    #[test]
    fn test_cost_basis_frozen_under_later_purchases() {
        let mut ledger = ledger_with(&[("Kenya AA", "50", "15")]);
        let engine = RoastEngine::default();
        engine
            .roast(&mut ledger, RoastInput::new("Kenya AA", dec("10"), dec("8.7"), dec("25")))
            .unwrap();
        let frozen = ledger.roasted_inventory()[0].clone();

        ledger
            .record_purchase(RecordPurchaseInput::new("Kenya AA", dec("40"), dec("30")))
            .unwrap();
        let second = engine
            .roast(&mut ledger, RoastInput::new("Kenya AA", dec("10"), dec("8.5"), dec("20")))
            .unwrap();

        assert_eq!(ledger.roasted_inventory()[0], frozen);
        // (40 × 15 + 40 × 30) / 80 = 22.5 per kg before the second depletion
        assert_eq!(second.green_bean_cost, dec("225.00"));
    }

    #[test]
    fn test_average_cost_read_before_depletion() {
        // Depleting first would leave only the 2.00 lot and price the roast at 20
        let mut ledger = ledger_with(&[("Kenya AA", "10", "1"), ("Kenya AA", "10", "2")]);

        let summary = RoastEngine::default()
            .roast(&mut ledger, RoastInput::new("Kenya AA", dec("10"), dec("8.5"), dec("0")))
            .unwrap();

        assert_eq!(summary.green_bean_cost, dec("15.00"));
        assert_eq!(ledger.average_cost("Kenya AA"), dec("2"));
    }

    #[test]
    fn test_batch_ids_sequence_across_bean_types() {
        let mut ledger = ledger_with(&[
            ("Ethiopian Yirgacheffe", "50", "15"),
            ("Colombian Supremo", "40", "12.50"),
            ("Sumatra Mandheling", "30", "14"),
        ]);
        let engine = RoastEngine::default();

        let ids: Vec<String> = [
            ("Ethiopian Yirgacheffe", "10", "8.7"),
            ("Colombian Supremo", "15", "12.75"),
            ("Sumatra Mandheling", "12", "9.84"),
        ]
        .iter()
        .map(|(bean_type, green, roasted)| {
            engine
                .roast(
                    &mut ledger,
                    RoastInput::new(*bean_type, dec(green), dec(roasted), dec("30"))
                        .date(roast_day()),
                )
                .unwrap()
                .batch_id
                .to_string()
        })
        .collect();

        assert_eq!(
            ids,
            vec![
                "ROAST-20240315-0001",
                "ROAST-20240315-0002",
                "ROAST-20240315-0003"
            ]
        );
        assert_eq!(ledger.batch_count(), 3);
    }

    #[test]
    fn test_batch_id_uses_roast_date() {
        let mut ledger = ledger_with(&[("Kenya AA", "50", "10")]);
        let engine = RoastEngine::default();
        let day_one = Utc.with_ymd_and_hms(2024, 12, 31, 23, 0, 0).unwrap();
        let day_two = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();

        let first = engine
            .roast(
                &mut ledger,
                RoastInput::new("Kenya AA", dec("5"), dec("4.2"), dec("5")).date(day_one),
            )
            .unwrap();
        let second = engine
            .roast(
                &mut ledger,
                RoastInput::new("Kenya AA", dec("5"), dec("4.2"), dec("5")).date(day_two),
            )
            .unwrap();

        assert_eq!(first.batch_id.as_str(), "ROAST-20241231-0001");
        assert_eq!(second.batch_id.as_str(), "ROAST-20250101-0002");
        assert_eq!(second.batch_id.sequence(), Some(2));
    }

    #[test]
    fn test_default_roast_level_is_medium() {
        let mut ledger = ledger_with(&[("Kenya AA", "20", "10")]);
        let summary = RoastEngine::default()
            .roast(&mut ledger, RoastInput::new("Kenya AA", dec("10"), dec("8.5"), dec("10")))
            .unwrap();

        assert_eq!(summary.roast_level, "medium");
        assert_eq!(ledger.roast_log()[0].roast_level, "medium");
    }

    #[test]
    fn test_unknown_bean_type_costs_zero() {
        let mut ledger = Ledger::new();
        let summary = RoastEngine::default()
            .roast(&mut ledger, RoastInput::new("Mystery Lot", dec("10"), dec("8.5"), dec("12")))
            .unwrap();

        assert_eq!(summary.green_bean_cost, Decimal::ZERO);
        assert_eq!(summary.total_cost, dec("12.00"));
        assert_eq!(ledger.batch_count(), 1);
        assert!(ledger.green_beans().is_empty());
    }

    #[test]
    fn test_roast_beyond_stock_clamps() {
        let mut ledger = ledger_with(&[("Kenya AA", "5", "10")]);
        let summary = RoastEngine::default()
            .roast(&mut ledger, RoastInput::new("Kenya AA", dec("8"), dec("6.8"), dec("5")))
            .unwrap();

        // Priced at the pre-depletion average for the full green weight
        assert_eq!(summary.green_bean_cost, dec("80.00"));
        assert_eq!(ledger.green_beans().remaining_kg("Kenya AA"), Decimal::ZERO);
    }

    #[test]
    fn test_invalid_roast_leaves_ledger_unchanged() {
        let mut ledger = ledger_with(&[("Kenya AA", "20", "10")]);
        let engine = RoastEngine::default();

        let err = engine
            .roast(&mut ledger, RoastInput::new("Kenya AA", dec("10"), Decimal::ZERO, dec("10")))
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InvalidQuantity {
                field: "roasted_bean_kg",
                ..
            }
        ));

        let err = engine
            .roast(&mut ledger, RoastInput::new("Kenya AA", dec("10"), dec("8"), dec("-1")))
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_COST");

        assert_eq!(ledger.batch_count(), 0);
        assert_eq!(ledger.green_beans().remaining_kg("Kenya AA"), dec("20"));
    }

    #[test]
    fn test_oversized_roast_rejected() {
        let mut ledger = ledger_with(&[("Kenya AA", "20", "1000000000")]);
        let engine = RoastEngine::default();

        let err = engine
            .roast(
                &mut ledger,
                RoastInput::new("Kenya AA", dec("100000000000"), dec("85000000000"), dec("5")),
            )
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_QUANTITY");

        let err = engine
            .roast(
                &mut ledger,
                RoastInput::new("Kenya AA", dec("10"), dec("8.5"), dec("10000000000")),
            )
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_COST");

        assert_eq!(ledger.batch_count(), 0);
        assert!(ledger.roasted_inventory().is_empty());
        assert_eq!(ledger.green_beans().remaining_kg("Kenya AA"), dec("20"));
    }

    #[test]
    fn test_largest_roast_costed_without_overflow() {
        let max_quantity = Decimal::from(shared::MAX_QUANTITY_KG);
        let max_cost = Decimal::from(shared::MAX_COST);
        let mut ledger = Ledger::new();
        ledger
            .record_purchase(RecordPurchaseInput::new("Kenya AA", max_quantity, max_cost))
            .unwrap();

        let summary = RoastEngine::default()
            .roast(
                &mut ledger,
                RoastInput::new("Kenya AA", max_quantity, dec("850000000"), max_cost),
            )
            .unwrap();

        assert_eq!(summary.total_cost, dec("1000000001000000000"));
        assert_eq!(ledger.green_beans().remaining_kg("Kenya AA"), Decimal::ZERO);
    }

    #[test]
    fn test_weight_gain_rejected() {
        let mut ledger = ledger_with(&[("Kenya AA", "20", "10")]);
        let engine = RoastEngine::default().with_weight_gain_policy(WeightGainPolicy::Reject);

        let err = engine
            .roast(&mut ledger, RoastInput::new("Kenya AA", dec("10"), dec("10.5"), dec("5")))
            .unwrap_err();

        assert_eq!(err.code(), "WEIGHT_GAIN");
        assert_eq!(ledger.batch_count(), 0);
        assert_eq!(ledger.green_beans().remaining_kg("Kenya AA"), dec("20"));
    }

    #[test]
    fn test_weight_gain_warned_and_recorded() {
        let mut ledger = ledger_with(&[("Kenya AA", "20", "10")]);
        let engine = RoastEngine::default();
        assert_eq!(engine.weight_gain_policy(), WeightGainPolicy::Warn);

        let summary = engine
            .roast(&mut ledger, RoastInput::new("Kenya AA", dec("10"), dec("10.5"), dec("5")))
            .unwrap();

        assert_eq!(summary.weight_loss_kg, dec("-0.5"));
        assert_eq!(summary.weight_loss_percent, dec("-5"));
        assert_eq!(ledger.batch_count(), 1);
    }

    #[test]
    fn test_weight_gain_allowed() {
        let mut ledger = ledger_with(&[("Kenya AA", "20", "10")]);
        let engine = RoastEngine::default().with_weight_gain_policy(WeightGainPolicy::Allow);

        assert!(engine
            .roast(&mut ledger, RoastInput::new("Kenya AA", dec("10"), dec("11"), dec("5")))
            .is_ok());
    }

    #[test]
    fn test_estimate_uses_expected_weight_loss() {
        let estimate = RoastEngine::default().estimate(dec("10"));

        assert_eq!(estimate.estimated_roasted_kg, dec("8.5"));
        assert_eq!(estimate.expected_weight_loss_kg, dec("1.5"));
        assert_eq!(estimate.weight_loss_percent, dec("15"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating green bean weights (1.0 to 60.0 kg)
    fn green_weight_strategy() -> impl Strategy<Value = Decimal> {
        (10i64..=600i64).prop_map(|n| Decimal::new(n, 1))
    }

    /// Strategy for generating weight loss percentages (10.0% to 25.0%)
    fn weight_loss_percent_strategy() -> impl Strategy<Value = Decimal> {
        (100i64..=250i64).prop_map(|n| Decimal::new(n, 1))
    }

    /// Strategy for generating roasting costs (0.00 to 100.00)
    fn roasting_cost_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=10000i64).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Total cost is the green cost plus the roasting cost
        #[test]
        fn prop_total_cost_is_sum(
            green in green_weight_strategy(),
            loss_percent in weight_loss_percent_strategy(),
            roasting_cost in roasting_cost_strategy()
        ) {
            let mut ledger = ledger_with(&[("Lot", "100", "12.40")]);
            let roasted = (green * (Decimal::from(100) - loss_percent) / Decimal::from(100)).round_dp(3);

            RoastEngine::default()
                .roast(&mut ledger, RoastInput::new("Lot", green, roasted, roasting_cost))
                .unwrap();

            let record = &ledger.roasted_inventory()[0];
            prop_assert_eq!(record.green_bean_cost, green * dec("12.40"));
            prop_assert_eq!(record.total_cost, record.green_bean_cost + roasting_cost);
            let diff = (record.cost_per_kg_roasted * roasted - record.total_cost).abs();
            prop_assert!(diff < dec("0.0001"));
        }

        /// Green stock falls by exactly the roasted green weight
        #[test]
        fn prop_roast_depletes_green_weight(
            green in green_weight_strategy(),
            loss_percent in weight_loss_percent_strategy()
        ) {
            let mut ledger = ledger_with(&[("Lot", "40", "10"), ("Lot", "40", "11")]);
            let roasted = (green * (Decimal::from(100) - loss_percent) / Decimal::from(100)).round_dp(3);

            RoastEngine::default()
                .roast(&mut ledger, RoastInput::new("Lot", green, roasted, Decimal::ZERO))
                .unwrap();

            prop_assert_eq!(ledger.green_beans().remaining_kg("Lot"), dec("80") - green);
        }

        /// Batch sequence numbers count every roast
        #[test]
        fn prop_batch_sequence_matches_count(batches in 1usize..12) {
            let mut ledger = ledger_with(&[("Lot", "1000", "10")]);
            let engine = RoastEngine::default();

            for expected in 1..=batches {
                let summary = engine
                    .roast(&mut ledger, RoastInput::new("Lot", dec("5"), dec("4.2"), dec("1")))
                    .unwrap();
                prop_assert_eq!(summary.batch_id.sequence(), Some(expected));
            }
        }
    }
}
