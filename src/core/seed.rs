//! First-run data seeding.
//!
//! When the packages table is empty, creates three warehouses, three clients
//! and a batch of PENDING packages with random weights and service dates over
//! the next thirty days. Fixed ids make the seeded data easy to address from
//! requests and fixtures.

use crate::{
    config::SeedConfig,
    entities::{Package, PackageStatus, client, package, warehouse},
    errors::Result,
};
use chrono::{Duration, Utc};
use rand::Rng;
use sea_orm::{PaginatorTrait, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Ids of the seeded warehouses, in name order.
pub const WAREHOUSE_IDS: [&str; 3] = [
    "00000000-0000-0000-0000-000000000001",
    "00000000-0000-0000-0000-000000000002",
    "00000000-0000-0000-0000-000000000003",
];

/// Ids of the seeded clients, in name order.
pub const CLIENT_IDS: [&str; 3] = [
    "00000000-0000-0000-0000-000000000011",
    "00000000-0000-0000-0000-000000000012",
    "00000000-0000-0000-0000-000000000013",
];

const WAREHOUSES: [(&str, &str); 3] = [
    ("Warehouse A", "New York"),
    ("Warehouse B", "Chicago"),
    ("Warehouse C", "Los Angeles"),
];

/// Rows per insert statement, keeping bound parameters under SQLite's limit.
const SEED_INSERT_CHUNK: usize = 500;

const CLIENTS: [(&str, &str); 3] = [
    ("Client One", "one@example.com"),
    ("Client Two", "two@example.com"),
    ("Client Three", "three@example.com"),
];

/// Id of the `index`-th seeded package.
#[must_use]
pub fn seed_package_id(index: usize) -> String {
    format!("00000000-0000-0000-0000-0000000001{}", 100 + index)
}

/// Seeds the database if it holds no packages yet.
///
/// Returns `true` when data was inserted and `false` when seeding was skipped.
#[instrument(skip(db))]
pub async fn seed_initial_data<C>(db: &C, config: &SeedConfig) -> Result<bool>
where
    C: ConnectionTrait + TransactionTrait,
{
    if !config.enabled {
        info!("Seeding disabled by configuration");
        return Ok(false);
    }

    let existing = Package::find().count(db).await?;
    if existing > 0 {
        info!(existing, "Packages already present, skipping seed");
        return Ok(false);
    }

    let txn = db.begin().await?;

    for (id, (name, location)) in WAREHOUSE_IDS.iter().zip(WAREHOUSES) {
        warehouse::ActiveModel {
            id: Set((*id).to_string()),
            name: Set(name.to_string()),
            location: Set(Some(location.to_string())),
        }
        .insert(&txn)
        .await?;
    }

    for (id, (name, email)) in CLIENT_IDS.iter().zip(CLIENTS) {
        client::ActiveModel {
            id: Set((*id).to_string()),
            name: Set(name.to_string()),
            email: Set(Some(email.to_string())),
        }
        .insert(&txn)
        .await?;
    }

    let packages = random_packages(config.package_count);
    let count = packages.len();
    for chunk in packages.chunks(SEED_INSERT_CHUNK) {
        Package::insert_many(chunk.to_vec())
            .exec_without_returning(&txn)
            .await?;
    }

    txn.commit().await?;

    info!(
        warehouses = WAREHOUSE_IDS.len(),
        clients = CLIENT_IDS.len(),
        packages = count,
        "Seeded initial data"
    );
    Ok(true)
}

/// Builds PENDING packages weighing 1.00 to 51.00 lbs with service dates
/// within the next thirty days, assigned to clients round-robin.
fn random_packages(count: usize) -> Vec<package::ActiveModel> {
    let mut rng = rand::thread_rng();
    let now = Utc::now();
    let today = now.date_naive();

    (0..count)
        .map(|index| {
            let weight_lbs = (rng.gen_range(1.0..51.0_f64) * 100.0).round() / 100.0;
            let service_date = today + Duration::days(rng.gen_range(0..30));

            package::ActiveModel {
                id: Set(seed_package_id(index)),
                weight_lbs: Set(weight_lbs),
                status: Set(PackageStatus::Pending),
                service_date: Set(Some(service_date)),
                received_ts: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
                warehouse_id: Set(None),
                client_id: Set(CLIENT_IDS[index % CLIENT_IDS.len()].to_string()),
                pallet_id: Set(None),
            }
        })
        .collect()
}
