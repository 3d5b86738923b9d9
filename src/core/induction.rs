//! Induction engine - records packages arriving at a warehouse.
//!
//! Each id in the batch is checked on its own and, if valid, moved from
//! PENDING to INDUCTED with the warehouse and a received timestamp. One bad id
//! never blocks the others, and the result list always mirrors the input list
//! one-to-one and in order.

use crate::{
    config::PalletRules,
    core::{
        outcome::{ItemFailure, ItemResult, Outcome},
        package as package_store,
    },
    entities::{PackageStatus, package},
    errors::Result,
};
use chrono::Utc;
use sea_orm::TransactionTrait;
use std::collections::HashMap;
use tracing::{debug, error, info, instrument};

/// A batch of packages to induct on behalf of one client at one warehouse.
#[derive(Debug, Clone, Copy)]
pub struct InductRequest<'a> {
    /// Package ids in the order the caller wants results back
    pub package_ids: &'a [String],
    /// Client that must own every package
    pub client_id: &'a str,
    /// Warehouse the packages arrived at
    pub warehouse_id: &'a str,
}

/// Inducts a batch of packages.
///
/// The whole batch runs in one database transaction. Per-package failures,
/// including failed writes, are reported in the returned list; an `Err` is
/// only returned when the batch itself cannot run (fetch, begin or commit).
#[instrument(skip(db, rules, request), fields(
    batch_size = request.package_ids.len(),
    client_id = request.client_id,
    warehouse_id = request.warehouse_id
))]
pub async fn induct_packages<C>(
    db: &C,
    rules: &PalletRules,
    request: InductRequest<'_>,
) -> Result<Vec<ItemResult>>
where
    C: TransactionTrait,
{
    if request.package_ids.is_empty() {
        return Ok(Vec::new());
    }

    let txn = db.begin().await?;

    let mut packages: HashMap<String, package::Model> =
        package_store::find_packages_where_in(&txn, request.package_ids)
            .await?
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();

    let now = Utc::now();
    let mut results = Vec::with_capacity(request.package_ids.len());

    for package_id in request.package_ids {
        let checked = check_inductable(
            packages.get(package_id.as_str()),
            request.client_id,
            rules,
        );

        let outcome = match checked {
            Err(failure) => {
                debug!(package_id = %package_id, reason = %failure, "Package rejected for induction");
                Outcome::Failed(failure)
            }
            Ok(()) => {
                match package_store::mark_inducted(&txn, package_id, request.warehouse_id, now)
                    .await
                {
                    Ok(()) => {
                        // A repeated id later in the batch must see the new state
                        if let Some(pkg) = packages.get_mut(package_id.as_str()) {
                            pkg.status = PackageStatus::Inducted;
                        }
                        Outcome::Inducted
                    }
                    Err(e) => {
                        error!(package_id = %package_id, "Failed to induct package: {}", e);
                        Outcome::Failed(ItemFailure::Storage {
                            action: "induct package",
                        })
                    }
                }
            }
        };

        results.push(ItemResult::new(package_id.clone(), outcome));
    }

    txn.commit().await?;

    let inducted = results.iter().filter(|r| r.success()).count();
    info!(
        inducted,
        rejected = results.len() - inducted,
        "Induction batch finished"
    );

    Ok(results)
}

/// Validates one package for induction. The first failing rule wins.
fn check_inductable(
    package: Option<&package::Model>,
    client_id: &str,
    rules: &PalletRules,
) -> std::result::Result<(), ItemFailure> {
    let Some(package) = package.filter(|p| p.client_id == client_id) else {
        return Err(ItemFailure::NotFoundOrForeign);
    };

    if !package.status.can_advance_to(PackageStatus::Inducted) {
        return Err(ItemFailure::NotPending {
            status: package.status,
        });
    }

    if rules.exceeds_limit(package.weight_lbs) {
        return Err(ItemFailure::OverWeightLimit {
            weight_lbs: package.weight_lbs,
            limit_lbs: rules.max_weight_lbs,
        });
    }

    Ok(())
}
