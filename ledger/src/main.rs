//! Roastery Ledger - demonstration driver
//!
//! Buys three origins, roasts a batch of each, prints the reports and exports
//! the ledger tables as CSV.

use roastery_ledger::{
    Config, CostReporter, CsvExporter, Ledger, RecordPurchaseInput, RoastEngine, RoastInput,
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Roastery Ledger demo");
    tracing::info!("Environment: {}", config.environment);

    let mut ledger = Ledger::new();
    let engine = RoastEngine::new(&config.roasting);

    section("Purchasing green beans");
    for input in [
        RecordPurchaseInput::new("Ethiopian Yirgacheffe", Decimal::from(50), Decimal::from(15))
            .supplier("African Coffee Traders"),
        RecordPurchaseInput::new("Colombian Supremo", Decimal::from(40), Decimal::new(1250, 2))
            .supplier("South American Imports"),
        RecordPurchaseInput::new("Sumatra Mandheling", Decimal::from(30), Decimal::from(14))
            .supplier("Indonesian Beans Co."),
    ] {
        let summary = ledger.record_purchase(input)?;
        println!("{}", summary.message);
    }

    section("Green bean inventory");
    print_json(&CostReporter::new(&ledger).green_bean_summary())?;

    section("Roast estimate");
    print_json(&engine.estimate(Decimal::from(10)))?;

    section("Roasting batches");
    for input in [
        RoastInput::new(
            "Ethiopian Yirgacheffe",
            Decimal::from(10),
            Decimal::new(87, 1),
            Decimal::from(25),
        )
        .roast_level("light")
        .duration_minutes(12),
        RoastInput::new(
            "Colombian Supremo",
            Decimal::from(15),
            Decimal::new(1275, 2),
            Decimal::from(35),
        )
        .roast_level("medium")
        .duration_minutes(14),
        RoastInput::new(
            "Sumatra Mandheling",
            Decimal::from(12),
            Decimal::new(984, 2),
            Decimal::from(30),
        )
        .roast_level("dark")
        .duration_minutes(16),
    ] {
        let summary = engine.roast(&mut ledger, input)?;
        println!("{}: {}", summary.batch_id, summary.message);
        println!(
            "  cost {} (green {} + roasting {}), {} per kg roasted",
            summary.total_cost,
            summary.green_bean_cost,
            summary.roasting_cost,
            summary.cost_per_kg_roasted
        );
    }

    let reporter = CostReporter::new(&ledger);

    section("Weight loss report");
    print_json(&reporter.weight_loss_report())?;

    section("Cost report");
    print_json(&reporter.cost_report())?;

    section("Pricing");
    for (bean_type, price) in reporter.price_list(config.pricing.default_margin_percent) {
        println!(
            "{}: cost {} + {}% markup = {} per kg ({}% of price)",
            bean_type,
            price.cost_per_kg,
            price.margin_percent,
            price.suggested_selling_price_per_kg,
            price.effective_margin_percent()
        );
    }

    section("Updated green bean inventory");
    print_json(&reporter.green_bean_summary())?;

    section("Roasted bean inventory");
    print_json(&reporter.roasted_stock_summary())?;

    section("Low stock");
    let alerts = ledger
        .green_beans()
        .low_stock(config.inventory.low_stock_threshold_kg);
    if alerts.is_empty() {
        println!(
            "No bean type at or below {} kg",
            config.inventory.low_stock_threshold_kg
        );
    }
    for alert in alerts {
        println!("{}: {} kg left", alert.bean_type, alert.remaining_kg);
    }

    section("Export");
    let files = CsvExporter::from_config(&config.export).export(&ledger)?;
    for path in [&files.green_beans, &files.roasted_beans, &files.roasting_log] {
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn section(title: &str) {
    println!("\n=== {} ===", title);
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
