//! Request and response bodies for the batch routes.

use crate::core::{ItemResult, StowReport};
use serde::{Deserialize, Serialize};

/// Body of `POST /packages/induct`.
#[derive(Debug, Clone, Deserialize)]
pub struct InductPackagesInput {
    /// Packages to induct, results come back in this order
    pub package_ids: Vec<String>,
    /// Client that owns the packages
    pub client_id: String,
    /// Warehouse the packages arrived at
    pub warehouse_id: String,
}

/// Body of `POST /packages/stow`.
#[derive(Debug, Clone, Deserialize)]
pub struct StowPackagesInput {
    /// Packages to stow, results come back in this order
    pub package_ids: Vec<String>,
    /// Warehouse doing the stowing
    pub warehouse_id: String,
    /// Pallet to start filling
    #[serde(default)]
    pub pallet_id: Option<String>,
}

/// One entry of an induction response.
#[derive(Debug, Clone, Serialize)]
pub struct InductPackageResult {
    /// The id as sent
    pub package_id: String,
    /// Whether the package was inducted
    pub success: bool,
    /// Success text or the failure reason
    pub message: String,
}

impl From<&ItemResult> for InductPackageResult {
    fn from(result: &ItemResult) -> Self {
        Self {
            package_id: result.package_id.clone(),
            success: result.success(),
            message: result.message(),
        }
    }
}

/// One entry of a stow response. `package_id` is only null for the
/// synthetic record returned when the starting pallet could not be prepared.
#[derive(Debug, Clone, Serialize)]
pub struct StowPackageResult {
    /// The id as sent, null for the pallet setup failure record
    pub package_id: Option<String>,
    /// Whether the package was stowed
    pub success: bool,
    /// Success text or the failure reason
    pub message: String,
    /// Pallet the package landed on, or the pallet that could not be prepared
    pub pallet_id: Option<String>,
}

impl From<&ItemResult> for StowPackageResult {
    fn from(result: &ItemResult) -> Self {
        Self {
            package_id: Some(result.package_id.clone()),
            success: result.success(),
            message: result.message(),
            pallet_id: result.pallet_id().map(str::to_string),
        }
    }
}

/// Wrapper shared by both batch responses.
#[derive(Debug, Clone, Serialize)]
pub struct Payload<T> {
    /// One entry per input id, in input order
    pub results: Vec<T>,
}

impl From<&[ItemResult]> for Payload<InductPackageResult> {
    fn from(results: &[ItemResult]) -> Self {
        Self {
            results: results.iter().map(InductPackageResult::from).collect(),
        }
    }
}

impl From<StowReport> for Payload<StowPackageResult> {
    fn from(report: StowReport) -> Self {
        let results = match report {
            StowReport::Completed(results) => results.iter().map(StowPackageResult::from).collect(),
            StowReport::Aborted { pallet_id, failure } => vec![StowPackageResult {
                package_id: None,
                success: false,
                message: failure.to_string(),
                pallet_id: Some(pallet_id),
            }],
        };
        Self { results }
    }
}
