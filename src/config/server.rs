//! HTTP listener configuration.
//!
//! The bind address comes from `BIND_ADDR` (e.g. `0.0.0.0:8080`) and defaults
//! to a localhost port so a fresh checkout does not listen on every interface.

use crate::errors::Result;
use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:4000";

/// Reads and parses the listener address.
///
/// # Errors
/// Returns an error if `BIND_ADDR` is set but is not a valid socket address.
pub fn bind_addr() -> Result<SocketAddr> {
    let raw = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    parse_bind_addr(&raw)
}

fn parse_bind_addr(raw: &str) -> Result<SocketAddr> {
    Ok(raw.trim().parse()?)
}
