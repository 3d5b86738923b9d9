//! Pallet entity - A physical unit that aggregates packages up to a weight cap.
//!
//! Lifecycle timestamps (`stowed_ts`, `staged_ts`, `picked_ts`) are set when the
//! corresponding event happens. The weight of a pallet is never stored; it is
//! always the sum of `weight_lbs` over the packages that reference it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Pallet database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pallets")]
pub struct Model {
    /// Unique identifier for the pallet
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Optional printed label
    pub label: Option<String>,
    /// Optional storage location inside the warehouse
    pub storage_location: Option<String>,
    /// When packages were last stowed onto this pallet
    pub stowed_ts: Option<DateTimeUtc>,
    /// When the pallet was staged for dispatch
    pub staged_ts: Option<DateTimeUtc>,
    /// When the pallet was picked up
    pub picked_ts: Option<DateTimeUtc>,
    /// Warehouse that holds this pallet
    pub warehouse_id: String,
}

/// Defines relationships between Pallet and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each pallet sits in one warehouse
    #[sea_orm(
        belongs_to = "super::warehouse::Entity",
        from = "Column::WarehouseId",
        to = "super::warehouse::Column::Id",
        on_delete = "Cascade"
    )]
    Warehouse,
    /// One pallet carries many packages
    #[sea_orm(has_many = "super::package::Entity")]
    Packages,
}

impl Related<super::warehouse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Warehouse.def()
    }
}

impl Related<super::package::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Packages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
