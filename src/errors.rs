//! Unified error type for whole-call failures.
//!
//! Per-package failures inside a batch are not errors in this sense; they are
//! reported through [`crate::core::outcome::ItemFailure`]. This type covers the
//! things that stop a call or the process outright: bad configuration, an
//! unreachable database, a failed transaction commit.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid bind address: {0}")]
    BindAddr(#[from] std::net::AddrParseError),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
