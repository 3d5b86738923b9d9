//! Warehouse reads. Warehouses are created by the seed and never modified here.

use crate::{
    entities::{Warehouse, warehouse},
    errors::Result,
};
use sea_orm::{QueryOrder, prelude::*};

/// Retrieves all warehouses, ordered by name.
pub async fn get_all_warehouses<C>(db: &C) -> Result<Vec<warehouse::Model>>
where
    C: ConnectionTrait,
{
    Warehouse::find()
        .order_by_asc(warehouse::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a warehouse by its id.
pub async fn get_warehouse_by_id<C>(db: &C, warehouse_id: &str) -> Result<Option<warehouse::Model>>
where
    C: ConnectionTrait,
{
    Warehouse::find_by_id(warehouse_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}
