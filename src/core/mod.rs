//! Core business logic - framework-agnostic engines and record-store access.
//!
//! The two engines, [`induction`] and [`stow`], are the only code that changes
//! package state. The entity modules ([`package`], [`pallet`], [`client`],
//! [`warehouse`]) are thin store operations the engines and the HTTP layer share.

/// Client reads
pub mod client;
/// PENDING -> INDUCTED batch engine
pub mod induction;
/// Per-package outcomes and failure kinds
pub mod outcome;
/// Package reads and state writes
pub mod package;
/// Pallet reads, creation and touch
pub mod pallet;
/// First-run seed data
pub mod seed;
/// INDUCTED -> STOWED batch engine with pallet bin packing
pub mod stow;
/// Warehouse reads
pub mod warehouse;

pub use induction::{InductRequest, induct_packages};
pub use outcome::{ItemFailure, ItemResult, Outcome};
pub use stow::{StowReport, StowRequest, stow_packages};
