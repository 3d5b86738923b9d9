//! Application configuration loading from config.toml
//!
//! This module loads the warehouse rules that both engines share (the pallet
//! weight cap) and the seeding settings used on first start. A missing file
//! is not an error: every section falls back to its defaults.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default maximum weight a single pallet may carry, in pounds.
pub const DEFAULT_MAX_PALLET_WEIGHT_LBS: f64 = 500.0;

/// Default number of packages created by the first-run seed.
pub const DEFAULT_SEED_PACKAGE_COUNT: usize = 50;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize, Clone)]
pub struct AppConfig {
    /// Pallet rules shared by the induction and stow engines
    #[serde(default)]
    pub pallets: PalletRules,
    /// First-run data seeding
    #[serde(default)]
    pub seed: SeedConfig,
}

/// Weight rules applied to every pallet.
///
/// Loaded once at startup and passed by reference into both engines.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct PalletRules {
    /// Maximum total package weight on one pallet, in pounds
    pub max_weight_lbs: f64,
}

impl Default for PalletRules {
    fn default() -> Self {
        Self {
            max_weight_lbs: DEFAULT_MAX_PALLET_WEIGHT_LBS,
        }
    }
}

impl PalletRules {
    /// Creates rules with the given cap, rejecting caps that are not positive and finite.
    pub fn new(max_weight_lbs: f64) -> Result<Self> {
        let rules = Self { max_weight_lbs };
        rules.validate()?;
        Ok(rules)
    }

    /// Checks that the cap is a positive, finite number of pounds.
    pub fn validate(&self) -> Result<()> {
        if !self.max_weight_lbs.is_finite() || self.max_weight_lbs <= 0.0 {
            return Err(Error::Config {
                message: format!(
                    "pallets.max_weight_lbs must be a positive number, got {}",
                    self.max_weight_lbs
                ),
            });
        }
        Ok(())
    }

    /// Whether a single package is too heavy to ever fit on a pallet.
    #[must_use]
    pub fn exceeds_limit(&self, weight_lbs: f64) -> bool {
        weight_lbs > self.max_weight_lbs
    }

    /// Whether adding `weight_lbs` to a pallet already carrying `current_lbs`
    /// stays within the cap. Reaching the cap exactly is allowed.
    #[must_use]
    pub fn fits(&self, current_lbs: f64, weight_lbs: f64) -> bool {
        current_lbs + weight_lbs <= self.max_weight_lbs
    }
}

/// Settings for seeding an empty database.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct SeedConfig {
    /// Whether to seed at all
    #[serde(default = "default_seed_enabled")]
    pub enabled: bool,
    /// Number of PENDING packages to create
    #[serde(default = "default_seed_package_count")]
    pub package_count: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: default_seed_enabled(),
            package_count: default_seed_package_count(),
        }
    }
}

const fn default_seed_enabled() -> bool {
    true
}

const fn default_seed_package_count() -> usize {
    DEFAULT_SEED_PACKAGE_COUNT
}

/// Loads configuration from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns an error if:
/// - The file exists but cannot be read
/// - The TOML syntax is invalid
/// - The pallet weight cap is not a positive number
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::info!("No config file at {:?}, using defaults", path);
        return Ok(AppConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path:?}: {e}"),
    })?;

    parse_config(&contents)
}

/// Parses and validates configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.pallets.validate()?;
    Ok(config)
}

/// Loads configuration from `WAREHOUSE_FLOW_CONFIG`, or ./config.toml when unset
pub fn load_default_config() -> Result<AppConfig> {
    let path =
        std::env::var("WAREHOUSE_FLOW_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    load_config(path)
}
