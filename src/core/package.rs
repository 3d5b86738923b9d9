//! Package store operations - reads and the two state-changing writes.
//!
//! The writes used by the engines go through `update_many` filtered by id, so
//! each one is a single `UPDATE` statement. Functions take any
//! `ConnectionTrait` so they run equally on a pooled connection or inside the
//! batch transaction an engine opens.

use crate::{
    entities::{Package, PackageStatus, package},
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*, sea_query::Expr};

/// Retrieves all packages, ordered by id.
pub async fn get_all_packages<C>(db: &C) -> Result<Vec<package::Model>>
where
    C: ConnectionTrait,
{
    Package::find()
        .order_by_asc(package::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a package by its id.
pub async fn get_package_by_id<C>(db: &C, package_id: &str) -> Result<Option<package::Model>>
where
    C: ConnectionTrait,
{
    Package::find_by_id(package_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Fetches every package whose id is in `package_ids`.
///
/// Unknown ids are simply absent from the result; the order of the returned
/// rows is unspecified.
pub async fn find_packages_where_in<C>(db: &C, package_ids: &[String]) -> Result<Vec<package::Model>>
where
    C: ConnectionTrait,
{
    Package::find()
        .filter(package::Column::Id.is_in(package_ids.iter().cloned()))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Packages owned by a client.
pub async fn get_packages_for_client<C>(db: &C, client_id: &str) -> Result<Vec<package::Model>>
where
    C: ConnectionTrait,
{
    Package::find()
        .filter(package::Column::ClientId.eq(client_id))
        .order_by_asc(package::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Packages inducted at a warehouse.
pub async fn get_packages_for_warehouse<C>(
    db: &C,
    warehouse_id: &str,
) -> Result<Vec<package::Model>>
where
    C: ConnectionTrait,
{
    Package::find()
        .filter(package::Column::WarehouseId.eq(warehouse_id))
        .order_by_asc(package::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Packages currently stowed on a pallet.
pub async fn get_packages_on_pallet<C>(db: &C, pallet_id: &str) -> Result<Vec<package::Model>>
where
    C: ConnectionTrait,
{
    Package::find()
        .filter(package::Column::PalletId.eq(pallet_id))
        .order_by_asc(package::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sums `weight_lbs` over the packages on a pallet.
///
/// `SUM` over no rows is `NULL` in SQL; that comes back as `0.0`.
pub async fn total_weight_on_pallet<C>(db: &C, pallet_id: &str) -> Result<f64>
where
    C: ConnectionTrait,
{
    let total: Option<Option<f64>> = Package::find()
        .select_only()
        .column_as(Expr::col(package::Column::WeightLbs).sum(), "total_weight")
        .filter(package::Column::PalletId.eq(pallet_id))
        .into_tuple()
        .one(db)
        .await?;

    Ok(total.flatten().unwrap_or(0.0))
}

/// Records a package's arrival at a warehouse: PENDING -> INDUCTED.
pub async fn mark_inducted<C>(
    db: &C,
    package_id: &str,
    warehouse_id: &str,
    now: DateTime<Utc>,
) -> Result<()>
where
    C: ConnectionTrait,
{
    Package::update_many()
        .set(package::ActiveModel {
            status: Set(PackageStatus::Inducted),
            warehouse_id: Set(Some(warehouse_id.to_string())),
            received_ts: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        })
        .filter(package::Column::Id.eq(package_id))
        .exec(db)
        .await?;
    Ok(())
}

/// Places a package on a pallet: INDUCTED -> STOWED.
pub async fn mark_stowed<C>(
    db: &C,
    package_id: &str,
    pallet_id: &str,
    now: DateTime<Utc>,
) -> Result<()>
where
    C: ConnectionTrait,
{
    Package::update_many()
        .set(package::ActiveModel {
            status: Set(PackageStatus::Stowed),
            pallet_id: Set(Some(pallet_id.to_string())),
            updated_at: Set(now),
            ..Default::default()
        })
        .filter(package::Column::Id.eq(package_id))
        .exec(db)
        .await?;
    Ok(())
}
