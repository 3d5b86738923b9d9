/// Database connection and table creation
pub mod database;

/// Pallet rules and seeding settings from config.toml
pub mod rules;

/// HTTP listener settings from environment variables
pub mod server;

pub use rules::{AppConfig, PalletRules, SeedConfig};
