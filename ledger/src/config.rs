//! Configuration management for the Roastery Ledger
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with ROASTERY__ prefix, `__` between
//!    nested keys (e.g. ROASTERY__ROASTING__WEIGHT_GAIN_POLICY=reject)
//!
//! The environment name itself is read from ROASTERY_ENVIRONMENT.

use config::{builder::DefaultState, ConfigBuilder, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Main ledger configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// CSV export configuration
    pub export: ExportConfig,

    /// Roasting defaults and policies
    pub roasting: RoastingConfig,

    /// Pricing defaults
    pub pricing: PricingConfig,

    /// Inventory alerting
    pub inventory: InventoryConfig,

    /// Log filter configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ExportConfig {
    /// Directory the CSV tables are written to
    pub directory: String,

    /// File name prefix for the three tables
    pub prefix: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RoastingConfig {
    /// Roast level recorded when a roast gives none
    pub default_roast_level: String,

    /// Weight loss assumed by roast estimates
    pub expected_weight_loss_percent: Decimal,

    /// How to treat a roast that reports more roasted than green weight
    pub weight_gain_policy: WeightGainPolicy,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PricingConfig {
    /// Markup on cost used for suggested selling prices
    pub default_margin_percent: Decimal,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct InventoryConfig {
    /// Remaining green stock at or below this triggers a low-stock alert
    pub low_stock_threshold_kg: Decimal,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is unset
    pub filter: String,
}

/// Handling of roasts whose output outweighs their input
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightGainPolicy {
    /// Record the batch silently
    Allow,
    /// Record the batch and log a warning
    #[default]
    Warn,
    /// Refuse the batch
    Reject,
}

impl WeightGainPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightGainPolicy::Allow => "allow",
            WeightGainPolicy::Warn => "warn",
            WeightGainPolicy::Reject => "reject",
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("ROASTERY_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Self::load_from(&environment, Self::environment_source())
    }

    /// ROASTERY__ prefixed variables, `__` between nested keys
    fn environment_source() -> Environment {
        Environment::with_prefix("ROASTERY")
            .separator("__")
            .try_parsing(true)
    }

    fn load_from(environment: &str, env: Environment) -> Result<Self, ConfigError> {
        let config = Self::with_defaults(environment)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables
            .add_source(env)
            .build()?;

        config.try_deserialize()
    }

    /// Load the in-code defaults with explicit overrides applied on top
    pub fn load_with_overrides(overrides: &[(&str, &str)]) -> Result<Self, ConfigError> {
        let mut builder = Self::with_defaults("development")?;
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        builder.build()?.try_deserialize()
    }

    fn with_defaults(environment: &str) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("environment", environment)?
            .set_default("export.directory", ".")?
            .set_default("export.prefix", "coffee_roastery")?
            .set_default("roasting.default_roast_level", shared::DEFAULT_ROAST_LEVEL)?
            .set_default(
                "roasting.expected_weight_loss_percent",
                shared::DEFAULT_EXPECTED_WEIGHT_LOSS_PERCENT,
            )?
            .set_default("roasting.weight_gain_policy", WeightGainPolicy::default().as_str())?
            .set_default("pricing.default_margin_percent", shared::DEFAULT_MARGIN_PERCENT)?
            .set_default("inventory.low_stock_threshold_kg", 10)?
            .set_default("logging.filter", "roastery_ledger=info,roastery_demo=info")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            export: ExportConfig::default(),
            roasting: RoastingConfig::default(),
            pricing: PricingConfig::default(),
            inventory: InventoryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            prefix: "coffee_roastery".to_string(),
        }
    }
}

impl Default for RoastingConfig {
    fn default() -> Self {
        Self {
            default_roast_level: shared::DEFAULT_ROAST_LEVEL.to_string(),
            expected_weight_loss_percent: Decimal::from(shared::DEFAULT_EXPECTED_WEIGHT_LOSS_PERCENT),
            weight_gain_policy: WeightGainPolicy::default(),
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            default_margin_percent: Decimal::from(shared::DEFAULT_MARGIN_PERCENT),
        }
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold_kg: Decimal::from(10),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "roastery_ledger=info,roastery_demo=info".to_string(),
        }
    }
}
