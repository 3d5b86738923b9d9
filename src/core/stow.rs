//! Stow engine - assigns inducted packages to pallets.
//!
//! Pallet assignment is a greedy, weight-bounded bin packing:
//!
//! 1. Fetch the requested packages and sort a copy by service date, then weight,
//!    so packages shipping around the same day end up on the same pallet.
//! 2. Start from the caller's pallet (reusing its current weight) or open a new one.
//! 3. Walk the sorted packages. When the next package would push the current
//!    pallet over the cap, that pallet is closed for this run and a fresh one
//!    is opened.
//! 4. Re-project the per-package outcomes into the caller's input order.
//!
//! If the starting pallet cannot be prepared the call is aborted before any
//! package is touched, and a single synthetic failure is returned instead of
//! per-package results.

use crate::{
    config::PalletRules,
    core::{
        outcome::{ItemFailure, ItemResult, Outcome},
        package as package_store, pallet as pallet_store,
    },
    entities::{PackageStatus, package},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, TransactionTrait};
use std::collections::HashMap;
use tracing::{debug, error, info, instrument};

/// A batch of packages to stow at one warehouse.
#[derive(Debug, Clone, Copy)]
pub struct StowRequest<'a> {
    /// Package ids in the order the caller wants results back
    pub package_ids: &'a [String],
    /// Warehouse the packages must have been inducted at
    pub warehouse_id: &'a str,
    /// Pallet to start filling; a new one is opened when `None`
    pub pallet_id: Option<&'a str>,
}

/// Result of a stow call.
#[derive(Debug, Clone, PartialEq)]
pub enum StowReport {
    /// One result per input id, in input order
    Completed(Vec<ItemResult>),
    /// The starting pallet could not be looked up, created or updated.
    /// No package was processed.
    Aborted {
        /// The pallet id that was being prepared
        pallet_id: String,
        /// Always a storage failure
        failure: ItemFailure,
    },
}

/// The pallet currently being filled and what it already carries.
#[derive(Debug)]
struct PalletCursor {
    id: String,
    weight_lbs: f64,
}

/// Stows a batch of packages.
///
/// The whole batch runs in one database transaction, which is rolled back on
/// the abort path. Per-package failures are reported in the returned list; an
/// `Err` is only returned when the batch itself cannot run.
#[instrument(skip(db, rules, request), fields(
    batch_size = request.package_ids.len(),
    warehouse_id = request.warehouse_id,
    pallet_id = request.pallet_id
))]
pub async fn stow_packages<C>(
    db: &C,
    rules: &PalletRules,
    request: StowRequest<'_>,
) -> Result<StowReport>
where
    C: TransactionTrait,
{
    if request.package_ids.is_empty() {
        return Ok(StowReport::Completed(Vec::new()));
    }

    let txn = db.begin().await?;

    let fetched = package_store::find_packages_where_in(&txn, request.package_ids).await?;
    let ordered = sorted_for_stowing(fetched);
    let now = Utc::now();

    let mut cursor =
        match start_pallet(&txn, request.warehouse_id, request.pallet_id, now).await {
            Ok(cursor) => cursor,
            Err((pallet_id, e)) => {
                error!(pallet_id = %pallet_id, "Failed to prepare starting pallet: {}", e);
                if let Err(e) = txn.rollback().await {
                    error!("Failed to roll back stow batch: {}", e);
                }
                return Ok(StowReport::Aborted {
                    pallet_id,
                    failure: ItemFailure::Storage {
                        action: "insert or update pallet",
                    },
                });
            }
        };

    let mut outcomes: HashMap<String, Outcome> = HashMap::with_capacity(ordered.len());
    for package in &ordered {
        let outcome = stow_one(&txn, rules, request.warehouse_id, &mut cursor, package, now).await;
        outcomes.insert(package.id.clone(), outcome);
    }

    txn.commit().await?;

    let results: Vec<ItemResult> = request
        .package_ids
        .iter()
        .map(|package_id| match outcomes.get(package_id) {
            Some(outcome) => ItemResult::new(package_id.clone(), outcome.clone()),
            None => ItemResult::failed(package_id.clone(), ItemFailure::NotFound),
        })
        .collect();

    let stowed = results.iter().filter(|r| r.success()).count();
    info!(
        stowed,
        rejected = results.len() - stowed,
        last_pallet_id = %cursor.id,
        last_pallet_weight_lbs = cursor.weight_lbs,
        "Stow batch finished"
    );

    Ok(StowReport::Completed(results))
}

/// Orders packages by service date (missing dates first), then by weight.
/// Ties fall back to the id so the packing is deterministic.
fn sorted_for_stowing(mut packages: Vec<package::Model>) -> Vec<package::Model> {
    packages.sort_by(|a, b| {
        a.service_date
            .cmp(&b.service_date)
            .then_with(|| a.weight_lbs.total_cmp(&b.weight_lbs))
            .then_with(|| a.id.cmp(&b.id))
    });
    packages
}

/// Resolves the pallet the batch starts filling.
///
/// On failure the attempted pallet id is handed back so the caller can report it.
async fn start_pallet<C>(
    db: &C,
    warehouse_id: &str,
    requested: Option<&str>,
    now: DateTime<Utc>,
) -> std::result::Result<PalletCursor, (String, Error)>
where
    C: ConnectionTrait,
{
    let pallet_id = requested.map_or_else(pallet_store::new_pallet_id, str::to_string);

    match prepare_pallet(db, &pallet_id, warehouse_id, requested.is_some(), now).await {
        Ok(weight_lbs) => Ok(PalletCursor {
            id: pallet_id,
            weight_lbs,
        }),
        Err(e) => Err((pallet_id, e)),
    }
}

/// Touches an existing pallet and returns its current weight, or opens a new
/// pallet under `pallet_id` and returns zero.
async fn prepare_pallet<C>(
    db: &C,
    pallet_id: &str,
    warehouse_id: &str,
    may_exist: bool,
    now: DateTime<Utc>,
) -> Result<f64>
where
    C: ConnectionTrait,
{
    let existing = if may_exist {
        pallet_store::get_pallet_by_id(db, pallet_id).await?
    } else {
        None
    };

    if existing.is_some() {
        let weight_lbs = package_store::total_weight_on_pallet(db, pallet_id).await?;
        pallet_store::touch_stowed(db, pallet_id, now).await?;
        debug!(pallet_id, weight_lbs, "Reusing existing pallet");
        Ok(weight_lbs)
    } else {
        pallet_store::open_pallet(db, pallet_id, warehouse_id, now).await?;
        debug!(pallet_id, "Opened starting pallet");
        Ok(0.0)
    }
}

/// Validates, places and records one package against the running cursor.
async fn stow_one<C>(
    db: &C,
    rules: &PalletRules,
    warehouse_id: &str,
    cursor: &mut PalletCursor,
    package: &package::Model,
    now: DateTime<Utc>,
) -> Outcome
where
    C: ConnectionTrait,
{
    if let Err(failure) = check_stowable(package, warehouse_id, rules) {
        debug!(package_id = %package.id, reason = %failure, "Package rejected for stowing");
        return Outcome::Failed(failure);
    }

    if !rules.fits(cursor.weight_lbs, package.weight_lbs) {
        let next_id = pallet_store::new_pallet_id();
        if let Err(e) = pallet_store::open_pallet(db, &next_id, warehouse_id, now).await {
            error!(package_id = %package.id, "Failed to open a new pallet: {}", e);
            return Outcome::Failed(ItemFailure::Storage {
                action: "open a new pallet",
            });
        }
        info!(
            closed_pallet_id = %cursor.id,
            closed_weight_lbs = cursor.weight_lbs,
            opened_pallet_id = %next_id,
            "Pallet full, opened a new one"
        );
        *cursor = PalletCursor {
            id: next_id,
            weight_lbs: 0.0,
        };
    }

    match package_store::mark_stowed(db, &package.id, &cursor.id, now).await {
        Ok(()) => {
            cursor.weight_lbs += package.weight_lbs;
            Outcome::Stowed {
                pallet_id: cursor.id.clone(),
            }
        }
        // The failed package does not consume pallet capacity
        Err(e) => {
            error!(package_id = %package.id, pallet_id = %cursor.id, "Failed to stow package: {}", e);
            Outcome::Failed(ItemFailure::Storage {
                action: "stow package",
            })
        }
    }
}

/// Validates one package for stowing. The first failing rule wins.
fn check_stowable(
    package: &package::Model,
    warehouse_id: &str,
    rules: &PalletRules,
) -> std::result::Result<(), ItemFailure> {
    if !package.status.can_advance_to(PackageStatus::Stowed) {
        return Err(ItemFailure::NotInducted {
            status: package.status,
        });
    }

    if package.warehouse_id.as_deref() != Some(warehouse_id) {
        return Err(ItemFailure::WrongWarehouse {
            warehouse: package
                .warehouse_id
                .clone()
                .unwrap_or_else(|| "none".to_string()),
        });
    }

    // Only reachable for rows that bypassed induction
    if rules.exceeds_limit(package.weight_lbs) {
        return Err(ItemFailure::OverWeightLimit {
            weight_lbs: package.weight_lbs,
            limit_lbs: rules.max_weight_lbs,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    #![allow(clippy::panic)]
    use super::*;
    use crate::core::{package::get_package_by_id, pallet::get_pallet_by_id};
    use crate::entities::pallet;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    fn completed(report: StowReport) -> Vec<ItemResult> {
        match report {
            StowReport::Completed(results) => results,
            StowReport::Aborted { .. } => panic!("stow call was aborted: {report:?}"),
        }
    }

    fn exec_ok() -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }
    }

    #[tokio::test]
    async fn test_stow_onto_requested_pallet() -> Result<()> {
        let (db, fixture) = setup_with_fixture().await?;
        let (client, wh) = (&fixture.client.id, &fixture.warehouse.id);
        create_inducted_package(&db, "pkg-1", client, wh, 20.0, None).await?;
        create_inducted_package(&db, "pkg-2", client, wh, 30.0, None).await?;

        let package_ids = ids(&["pkg-1", "pkg-2"]);
        let req = StowRequest {
            package_ids: &package_ids,
            warehouse_id: wh,
            pallet_id: Some("pal-9999"),
        };
        let results = completed(stow_packages(&db, &PalletRules::default(), req).await?);

        assert_eq!(results.len(), 2);
        for result in &results {
            assert!(result.success());
            assert_eq!(result.message(), "Package STOWED successfully");
            assert_eq!(result.pallet_id(), Some("pal-9999"));

            let stored = get_package_by_id(&db, &result.package_id).await?.unwrap();
            assert_eq!(stored.status, PackageStatus::Stowed);
            assert_eq!(stored.pallet_id.as_deref(), Some("pal-9999"));
        }

        let pallet = get_pallet_by_id(&db, "pal-9999").await?.unwrap();
        assert_eq!(pallet.warehouse_id, *wh);
        assert!(pallet.stowed_ts.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_stow_without_pallet_opens_one() -> Result<()> {
        let (db, fixture) = setup_with_fixture().await?;
        let (client, wh) = (&fixture.client.id, &fixture.warehouse.id);
        create_inducted_package(&db, "pkg-1", client, wh, 20.0, None).await?;
        create_inducted_package(&db, "pkg-2", client, wh, 30.0, None).await?;

        let package_ids = ids(&["pkg-1", "pkg-2"]);
        let req = StowRequest {
            package_ids: &package_ids,
            warehouse_id: wh,
            pallet_id: None,
        };
        let results = completed(stow_packages(&db, &PalletRules::default(), req).await?);

        let pallet_id = results[0].pallet_id().unwrap().to_string();
        assert_eq!(results[1].pallet_id(), Some(pallet_id.as_str()));
        assert!(get_pallet_by_id(&db, &pallet_id).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_rejects_packages_not_inducted() -> Result<()> {
        let (db, fixture) = setup_with_fixture().await?;
        create_test_package(&db, "pending", &fixture.client.id, 10.0).await?;

        let package_ids = ids(&["pending"]);
        let req = StowRequest {
            package_ids: &package_ids,
            warehouse_id: &fixture.warehouse.id,
            pallet_id: Some("pal-1"),
        };
        let results = completed(stow_packages(&db, &PalletRules::default(), req).await?);

        assert_eq!(results[0].message(), "Cannot stow package with status PENDING");
        assert_eq!(results[0].pallet_id(), None);
        let stored = get_package_by_id(&db, "pending").await?.unwrap();
        assert_eq!(stored.status, PackageStatus::Pending);
        assert_eq!(stored.pallet_id, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_rejects_already_stowed_package() -> Result<()> {
        let (db, fixture) = setup_with_fixture().await?;
        let (client, wh) = (&fixture.client.id, &fixture.warehouse.id);
        create_test_pallet(&db, "pal-old", wh).await?;
        create_inducted_package(&db, "pkg-1", client, wh, 10.0, None).await?;
        package_store::mark_stowed(&db, "pkg-1", "pal-old", Utc::now()).await?;

        let package_ids = ids(&["pkg-1"]);
        let req = StowRequest {
            package_ids: &package_ids,
            warehouse_id: wh,
            pallet_id: Some("pal-new"),
        };
        let results = completed(stow_packages(&db, &PalletRules::default(), req).await?);

        assert_eq!(results[0].message(), "Cannot stow package with status STOWED");
        let stored = get_package_by_id(&db, "pkg-1").await?.unwrap();
        assert_eq!(stored.pallet_id.as_deref(), Some("pal-old"));
        Ok(())
    }

    #[tokio::test]
    async fn test_rejects_package_from_other_warehouse() -> Result<()> {
        let (db, fixture) = setup_with_fixture().await?;
        let other = create_test_warehouse(&db, "wh-2").await?;
        create_inducted_package(&db, "pkg-1", &fixture.client.id, &other.id, 10.0, None).await?;

        let package_ids = ids(&["pkg-1"]);
        let req = StowRequest {
            package_ids: &package_ids,
            warehouse_id: &fixture.warehouse.id,
            pallet_id: None,
        };
        let results = completed(stow_packages(&db, &PalletRules::default(), req).await?);

        assert_eq!(
            results[0].failure(),
            Some(&ItemFailure::WrongWarehouse {
                warehouse: "wh-2".to_string()
            })
        );
        assert_eq!(
            results[0].message(),
            "Package belongs to a different warehouse (wh-2)"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_ids_reported_in_input_order() -> Result<()> {
        let (db, fixture) = setup_with_fixture().await?;
        let (client, wh) = (&fixture.client.id, &fixture.warehouse.id);
        create_inducted_package(&db, "pkg-1", client, wh, 10.0, None).await?;

        let package_ids = ids(&["ghost-1", "pkg-1", "ghost-2"]);
        let req = StowRequest {
            package_ids: &package_ids,
            warehouse_id: wh,
            pallet_id: None,
        };
        let results = completed(stow_packages(&db, &PalletRules::default(), req).await?);

        let returned: Vec<&str> = results.iter().map(|r| r.package_id.as_str()).collect();
        assert_eq!(returned, vec!["ghost-1", "pkg-1", "ghost-2"]);
        assert_eq!(results[0].message(), "Package not found");
        assert_eq!(results[0].pallet_id(), None);
        assert!(results[1].success());
        assert_eq!(results[2].failure(), Some(&ItemFailure::NotFound));
        Ok(())
    }

    #[tokio::test]
    async fn test_full_pallet_rolls_over_to_new_pallet() -> Result<()> {
        let (db, fixture) = setup_with_fixture().await?;
        let (client, wh) = (&fixture.client.id, &fixture.warehouse.id);
        let day = Some(date(2025, 7, 1));
        create_inducted_package(&db, "pkg-1", client, wh, 200.0, day).await?;
        create_inducted_package(&db, "pkg-2", client, wh, 200.0, day).await?;
        create_inducted_package(&db, "pkg-3", client, wh, 200.0, day).await?;

        let package_ids = ids(&["pkg-1", "pkg-2", "pkg-3"]);
        let req = StowRequest {
            package_ids: &package_ids,
            warehouse_id: wh,
            pallet_id: Some("pal-1"),
        };
        let results = completed(stow_packages(&db, &PalletRules::default(), req).await?);

        assert!(results.iter().all(ItemResult::success));
        assert_eq!(results[0].pallet_id(), Some("pal-1"));
        assert_eq!(results[1].pallet_id(), Some("pal-1"));
        let second = results[2].pallet_id().unwrap();
        assert_ne!(second, "pal-1");

        assert_eq!(package_store::total_weight_on_pallet(&db, "pal-1").await?, 400.0);
        assert_eq!(package_store::total_weight_on_pallet(&db, second).await?, 200.0);
        assert!(get_pallet_by_id(&db, second).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_filling_exactly_to_cap_is_allowed() -> Result<()> {
        let (db, fixture) = setup_with_fixture().await?;
        let (client, wh) = (&fixture.client.id, &fixture.warehouse.id);
        create_inducted_package(&db, "pkg-1", client, wh, 250.0, None).await?;
        create_inducted_package(&db, "pkg-2", client, wh, 250.0, None).await?;

        let package_ids = ids(&["pkg-1", "pkg-2"]);
        let req = StowRequest {
            package_ids: &package_ids,
            warehouse_id: wh,
            pallet_id: Some("pal-1"),
        };
        let results = completed(stow_packages(&db, &PalletRules::default(), req).await?);

        assert_eq!(results[0].pallet_id(), Some("pal-1"));
        assert_eq!(results[1].pallet_id(), Some("pal-1"));
        assert_eq!(package_store::total_weight_on_pallet(&db, "pal-1").await?, 500.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_same_service_date_packed_together() -> Result<()> {
        let (db, fixture) = setup_with_fixture().await?;
        let (client, wh) = (&fixture.client.id, &fixture.warehouse.id);
        create_inducted_package(&db, "C", client, wh, 100.0, Some(date(2025, 7, 5))).await?;
        create_inducted_package(&db, "A", client, wh, 250.0, Some(date(2025, 7, 1))).await?;
        create_inducted_package(&db, "B", client, wh, 250.0, Some(date(2025, 7, 1))).await?;

        let package_ids = ids(&["C", "A", "B"]);
        let req = StowRequest {
            package_ids: &package_ids,
            warehouse_id: wh,
            pallet_id: None,
        };
        let results = completed(stow_packages(&db, &PalletRules::default(), req).await?);

        // Results come back in input order even though A and B were packed first
        assert_eq!(results[0].package_id, "C");
        assert_eq!(results[1].package_id, "A");
        assert_eq!(results[2].package_id, "B");
        assert!(results.iter().all(ItemResult::success));

        assert_eq!(results[1].pallet_id(), results[2].pallet_id());
        assert_ne!(results[0].pallet_id(), results[1].pallet_id());
        Ok(())
    }

    #[tokio::test]
    async fn test_reused_pallet_accumulates_weight_across_calls() -> Result<()> {
        let (db, fixture) = setup_with_fixture().await?;
        let (client, wh) = (&fixture.client.id, &fixture.warehouse.id);
        create_inducted_package(&db, "first", client, wh, 300.0, None).await?;
        create_inducted_package(&db, "small", client, wh, 150.0, None).await?;
        create_inducted_package(&db, "large", client, wh, 160.0, None).await?;

        let first_ids = ids(&["first"]);
        let req = StowRequest {
            package_ids: &first_ids,
            warehouse_id: wh,
            pallet_id: Some("pal-1"),
        };
        completed(stow_packages(&db, &PalletRules::default(), req).await?);

        let second_ids = ids(&["large", "small"]);
        let req = StowRequest {
            package_ids: &second_ids,
            warehouse_id: wh,
            pallet_id: Some("pal-1"),
        };
        let results = completed(stow_packages(&db, &PalletRules::default(), req).await?);

        // small (150) fits next to the 300 already there; large (160) would not
        assert_eq!(results[1].pallet_id(), Some("pal-1"));
        let large_pallet = results[0].pallet_id().unwrap();
        assert_ne!(large_pallet, "pal-1");
        assert_eq!(package_store::total_weight_on_pallet(&db, "pal-1").await?, 450.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_reused_pallet_is_touched() -> Result<()> {
        let (db, fixture) = setup_with_fixture().await?;
        let (client, wh) = (&fixture.client.id, &fixture.warehouse.id);
        let pallet = create_test_pallet(&db, "pal-1", wh).await?;
        assert!(pallet.stowed_ts.is_none());
        create_inducted_package(&db, "pkg-1", client, wh, 10.0, None).await?;

        let package_ids = ids(&["pkg-1"]);
        let req = StowRequest {
            package_ids: &package_ids,
            warehouse_id: wh,
            pallet_id: Some("pal-1"),
        };
        completed(stow_packages(&db, &PalletRules::default(), req).await?);

        let touched = get_pallet_by_id(&db, "pal-1").await?.unwrap();
        assert!(touched.stowed_ts.is_some());
        assert_eq!(touched.label, pallet.label);
        Ok(())
    }

    #[tokio::test]
    async fn test_overweight_inducted_row_is_not_stowed() -> Result<()> {
        let (db, fixture) = setup_with_fixture().await?;
        let (client, wh) = (&fixture.client.id, &fixture.warehouse.id);
        create_inducted_package(&db, "heavy", client, wh, 650.0, None).await?;

        let package_ids = ids(&["heavy"]);
        let req = StowRequest {
            package_ids: &package_ids,
            warehouse_id: wh,
            pallet_id: Some("pal-1"),
        };
        let results = completed(stow_packages(&db, &PalletRules::default(), req).await?);

        assert!(matches!(
            results[0].failure(),
            Some(ItemFailure::OverWeightLimit { .. })
        ));
        assert_eq!(package_store::total_weight_on_pallet(&db, "pal-1").await?, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_pallet_setup_failure_aborts_with_single_record() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([vec![
                mock_package("pkg-1", PackageStatus::Inducted, 10.0, "client-1", Some("wh-1")),
                mock_package("pkg-2", PackageStatus::Inducted, 20.0, "client-1", Some("wh-1")),
            ]])
            .append_query_results([Vec::<pallet::Model>::new()])
            .append_exec_errors([DbErr::Custom("constraint failed".to_string())])
            .into_connection();

        let package_ids = ids(&["pkg-1", "pkg-2"]);
        let req = StowRequest {
            package_ids: &package_ids,
            warehouse_id: "wh-1",
            pallet_id: Some("pal-x"),
        };
        let report = stow_packages(&db, &PalletRules::default(), req).await?;

        assert_eq!(
            report,
            StowReport::Aborted {
                pallet_id: "pal-x".to_string(),
                failure: ItemFailure::Storage {
                    action: "insert or update pallet"
                },
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_write_does_not_consume_capacity() -> Result<()> {
        // pkg-1 (250) fails to save; pkg-2 (300) must still land on pal-1.
        // Had pkg-1's weight been counted, 550 > 500 would open a second pallet
        // and consume the exec result meant for pkg-2.
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([vec![
                mock_package("pkg-2", PackageStatus::Inducted, 300.0, "client-1", Some("wh-1")),
                mock_package("pkg-1", PackageStatus::Inducted, 250.0, "client-1", Some("wh-1")),
            ]])
            .append_query_results([Vec::<pallet::Model>::new()])
            .append_exec_results([exec_ok()])
            .append_exec_errors([DbErr::Custom("disk I/O error".to_string())])
            .append_exec_results([exec_ok()])
            .into_connection();

        let package_ids = ids(&["pkg-1", "pkg-2"]);
        let req = StowRequest {
            package_ids: &package_ids,
            warehouse_id: "wh-1",
            pallet_id: Some("pal-1"),
        };
        let results = completed(stow_packages(&db, &PalletRules::default(), req).await?);

        assert_eq!(
            results[0].failure(),
            Some(&ItemFailure::Storage {
                action: "stow package"
            })
        );
        assert_eq!(results[0].pallet_id(), None);
        assert_eq!(results[1].pallet_id(), Some("pal-1"));
        Ok(())
    }

    #[tokio::test]
    async fn test_rollover_open_failure_fails_only_that_package() -> Result<()> {
        // Packing order is pkg-3 (100), pkg-1 (300), pkg-2 (300). pkg-2 needs a
        // new pallet and opening it fails; the cursor stays on pal-1.
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([vec![
                mock_package("pkg-1", PackageStatus::Inducted, 300.0, "client-1", Some("wh-1")),
                mock_package("pkg-2", PackageStatus::Inducted, 300.0, "client-1", Some("wh-1")),
                mock_package("pkg-3", PackageStatus::Inducted, 100.0, "client-1", Some("wh-1")),
            ]])
            .append_query_results([Vec::<pallet::Model>::new()])
            .append_exec_results([exec_ok(), exec_ok(), exec_ok()])
            .append_exec_errors([DbErr::Custom("database is locked".to_string())])
            .into_connection();

        let package_ids = ids(&["pkg-1", "pkg-2", "pkg-3"]);
        let req = StowRequest {
            package_ids: &package_ids,
            warehouse_id: "wh-1",
            pallet_id: Some("pal-1"),
        };
        let results = completed(stow_packages(&db, &PalletRules::default(), req).await?);

        let returned: Vec<&str> = results.iter().map(|r| r.package_id.as_str()).collect();
        assert_eq!(returned, vec!["pkg-1", "pkg-2", "pkg-3"]);
        assert_eq!(results[0].pallet_id(), Some("pal-1"));
        assert_eq!(
            results[1].failure(),
            Some(&ItemFailure::Storage {
                action: "open a new pallet"
            })
        );
        assert_eq!(
            results[1].message(),
            "Server error while attempting to open a new pallet"
        );
        assert_eq!(results[1].pallet_id(), None);
        assert_eq!(results[2].pallet_id(), Some("pal-1"));
        Ok(())
    }

    #[test]
    fn test_sort_by_service_date_then_weight() {
        let mut late = mock_package("late", PackageStatus::Inducted, 1.0, "c", Some("w"));
        late.service_date = Some(date(2025, 7, 5));
        let mut early_heavy = mock_package("early-heavy", PackageStatus::Inducted, 9.0, "c", Some("w"));
        early_heavy.service_date = Some(date(2025, 7, 1));
        let mut early_light = mock_package("early-light", PackageStatus::Inducted, 2.0, "c", Some("w"));
        early_light.service_date = Some(date(2025, 7, 1));
        let undated = mock_package("undated", PackageStatus::Inducted, 50.0, "c", Some("w"));

        let sorted = sorted_for_stowing(vec![late, early_heavy, undated, early_light]);
        let order: Vec<&str> = sorted.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["undated", "early-light", "early-heavy", "late"]);
    }
}
