//! Per-package outcomes shared by the induction and stow engines.
//!
//! A batch call never fails because one package failed. Instead every input id
//! gets an [`ItemResult`] whose [`Outcome`] is either a success variant or a
//! typed [`ItemFailure`]. The failure's `Display` text is the message shown to
//! callers.

use crate::entities::PackageStatus;
use thiserror::Error;

/// Why a single package could not be processed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ItemFailure {
    /// The id does not exist, or the package belongs to another client
    #[error("Package ID not found")]
    NotFoundOrForeign,

    /// The id does not exist
    #[error("Package not found")]
    NotFound,

    /// Induction requires a PENDING package
    #[error("Package status is {status}, only PENDING packages can be INDUCTED")]
    NotPending {
        /// Current status
        status: PackageStatus,
    },

    /// Stowing requires an INDUCTED package
    #[error("Cannot stow package with status {status}")]
    NotInducted {
        /// Current status
        status: PackageStatus,
    },

    /// The package alone is heavier than a pallet may carry
    #[error("Package weight of {weight_lbs} exceeds weight limit of {limit_lbs} lbs")]
    OverWeightLimit {
        /// Package weight, in pounds
        weight_lbs: f64,
        /// Configured pallet cap, in pounds
        limit_lbs: f64,
    },

    /// The package was inducted at a different warehouse
    #[error("Package belongs to a different warehouse ({warehouse})")]
    WrongWarehouse {
        /// Warehouse the package is at, `none` if unset
        warehouse: String,
    },

    /// A read or write against the record store failed
    #[error("Server error while attempting to {action}")]
    Storage {
        /// What was being attempted, e.g. "stow package"
        action: &'static str,
    },
}

/// What happened to one package in a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Moved from PENDING to INDUCTED
    Inducted,
    /// Moved from INDUCTED to STOWED on the given pallet
    Stowed {
        /// Pallet the package now sits on
        pallet_id: String,
    },
    /// Left untouched
    Failed(ItemFailure),
}

/// One entry of a batch result, in the caller's input order.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemResult {
    /// The id exactly as the caller sent it
    pub package_id: String,
    /// What happened to it
    pub outcome: Outcome,
}

impl ItemResult {
    /// Pairs a package id with its outcome.
    #[must_use]
    pub const fn new(package_id: String, outcome: Outcome) -> Self {
        Self {
            package_id,
            outcome,
        }
    }

    /// Shorthand for a failed item.
    #[must_use]
    pub const fn failed(package_id: String, failure: ItemFailure) -> Self {
        Self::new(package_id, Outcome::Failed(failure))
    }

    /// Whether the package changed state.
    #[must_use]
    pub const fn success(&self) -> bool {
        !matches!(self.outcome, Outcome::Failed(_))
    }

    /// The failure, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&ItemFailure> {
        match &self.outcome {
            Outcome::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Pallet the package was stowed on; `None` for induction and for failures.
    #[must_use]
    pub fn pallet_id(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Stowed { pallet_id } => Some(pallet_id),
            _ => None,
        }
    }

    /// Human-readable message for the caller.
    #[must_use]
    pub fn message(&self) -> String {
        match &self.outcome {
            Outcome::Inducted => format!("Package {} successfully", PackageStatus::Inducted),
            Outcome::Stowed { .. } => format!("Package {} successfully", PackageStatus::Stowed),
            Outcome::Failed(failure) => failure.to_string(),
        }
    }
}
