//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating warehouses, clients, pallets and packages with sensible defaults.

use crate::{
    entities::{PackageStatus, client, package, pallet, warehouse},
    errors::Result,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// A warehouse and a client, the minimum needed to create packages.
pub struct Fixture {
    /// Warehouse `wh-1`
    pub warehouse: warehouse::Model,
    /// Client `client-1`
    pub client: client::Model,
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Sets up a database with one warehouse (`wh-1`) and one client (`client-1`).
pub async fn setup_with_fixture() -> Result<(DatabaseConnection, Fixture)> {
    let db = setup_test_db().await?;
    let warehouse = create_test_warehouse(&db, "wh-1").await?;
    let client = create_test_client(&db, "client-1").await?;
    Ok((db, Fixture { warehouse, client }))
}

/// Creates a warehouse named after its id.
pub async fn create_test_warehouse(
    db: &DatabaseConnection,
    id: &str,
) -> Result<warehouse::Model> {
    let warehouse = warehouse::ActiveModel {
        id: Set(id.to_string()),
        name: Set(format!("Warehouse {id}")),
        location: Set(Some("Test City".to_string())),
    };
    Ok(warehouse.insert(db).await?)
}

/// Creates a client named after its id.
pub async fn create_test_client(db: &DatabaseConnection, id: &str) -> Result<client::Model> {
    let client = client::ActiveModel {
        id: Set(id.to_string()),
        name: Set(format!("Client {id}")),
        email: Set(Some(format!("{id}@example.com"))),
    };
    Ok(client.insert(db).await?)
}

/// Creates a pallet with no timestamps set.
pub async fn create_test_pallet(
    db: &DatabaseConnection,
    id: &str,
    warehouse_id: &str,
) -> Result<pallet::Model> {
    let pallet = pallet::ActiveModel {
        id: Set(id.to_string()),
        label: Set(Some(format!("Pallet {id}"))),
        storage_location: Set(None),
        stowed_ts: Set(None),
        staged_ts: Set(None),
        picked_ts: Set(None),
        warehouse_id: Set(warehouse_id.to_string()),
    };
    Ok(pallet.insert(db).await?)
}

/// Creates a PENDING package with no service date.
pub async fn create_test_package(
    db: &DatabaseConnection,
    id: &str,
    client_id: &str,
    weight_lbs: f64,
) -> Result<package::Model> {
    create_custom_package(
        db,
        id,
        client_id,
        weight_lbs,
        None,
        PackageStatus::Pending,
        None,
    )
    .await
}

/// Creates an INDUCTED package at `warehouse_id` with the given service date.
pub async fn create_inducted_package(
    db: &DatabaseConnection,
    id: &str,
    client_id: &str,
    warehouse_id: &str,
    weight_lbs: f64,
    service_date: Option<NaiveDate>,
) -> Result<package::Model> {
    create_custom_package(
        db,
        id,
        client_id,
        weight_lbs,
        service_date,
        PackageStatus::Inducted,
        Some(warehouse_id),
    )
    .await
}

/// Creates a package with custom parameters.
/// Use this when you need a package in a specific state.
pub async fn create_custom_package(
    db: &DatabaseConnection,
    id: &str,
    client_id: &str,
    weight_lbs: f64,
    service_date: Option<NaiveDate>,
    status: PackageStatus,
    warehouse_id: Option<&str>,
) -> Result<package::Model> {
    let now = Utc::now();
    let received_ts = warehouse_id.map(|_| now);
    let package = package::ActiveModel {
        id: Set(id.to_string()),
        weight_lbs: Set(weight_lbs),
        status: Set(status),
        service_date: Set(service_date),
        received_ts: Set(received_ts),
        created_at: Set(now),
        updated_at: Set(now),
        warehouse_id: Set(warehouse_id.map(str::to_string)),
        client_id: Set(client_id.to_string()),
        pallet_id: Set(None),
    };
    Ok(package.insert(db).await?)
}

/// A package row for `MockDatabase` query results.
pub fn mock_package(
    id: &str,
    status: PackageStatus,
    weight_lbs: f64,
    client_id: &str,
    warehouse_id: Option<&str>,
) -> package::Model {
    let now = Utc::now();
    package::Model {
        id: id.to_string(),
        weight_lbs,
        status,
        service_date: None,
        received_ts: None,
        created_at: now,
        updated_at: now,
        warehouse_id: warehouse_id.map(str::to_string),
        client_id: client_id.to_string(),
        pallet_id: None,
    }
}

/// Builds a calendar date, panicking on an invalid one.
#[allow(clippy::expect_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Turns string literals into owned package ids.
pub fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}
