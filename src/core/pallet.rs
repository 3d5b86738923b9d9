//! Pallet store operations.
//!
//! Pallets are opened by the stow engine (a fresh row with `stowed_ts` set) or
//! touched when an existing pallet is reused. Inserts use
//! `exec_without_returning` so opening a pallet is exactly one statement.

use crate::{
    entities::{Pallet, pallet},
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Retrieves all pallets, ordered by id.
pub async fn get_all_pallets<C>(db: &C) -> Result<Vec<pallet::Model>>
where
    C: ConnectionTrait,
{
    Pallet::find()
        .order_by_asc(pallet::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a pallet by its id.
pub async fn get_pallet_by_id<C>(db: &C, pallet_id: &str) -> Result<Option<pallet::Model>>
where
    C: ConnectionTrait,
{
    Pallet::find_by_id(pallet_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Pallets held by a warehouse.
pub async fn get_pallets_for_warehouse<C>(db: &C, warehouse_id: &str) -> Result<Vec<pallet::Model>>
where
    C: ConnectionTrait,
{
    Pallet::find()
        .filter(pallet::Column::WarehouseId.eq(warehouse_id))
        .order_by_asc(pallet::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Inserts a new, empty pallet stowed at `now`.
pub async fn open_pallet<C>(
    db: &C,
    pallet_id: &str,
    warehouse_id: &str,
    now: DateTime<Utc>,
) -> Result<()>
where
    C: ConnectionTrait,
{
    let pallet = pallet::ActiveModel {
        id: Set(pallet_id.to_string()),
        label: Set(None),
        storage_location: Set(None),
        stowed_ts: Set(Some(now)),
        staged_ts: Set(None),
        picked_ts: Set(None),
        warehouse_id: Set(warehouse_id.to_string()),
    };

    Pallet::insert(pallet).exec_without_returning(db).await?;
    Ok(())
}

/// Marks an existing pallet as stowed again at `now`.
pub async fn touch_stowed<C>(db: &C, pallet_id: &str, now: DateTime<Utc>) -> Result<()>
where
    C: ConnectionTrait,
{
    Pallet::update_many()
        .set(pallet::ActiveModel {
            stowed_ts: Set(Some(now)),
            ..Default::default()
        })
        .filter(pallet::Column::Id.eq(pallet_id))
        .exec(db)
        .await?;
    Ok(())
}

/// Allocates an id for a pallet the stow engine is about to open.
#[must_use]
pub fn new_pallet_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
