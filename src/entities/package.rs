//! Package entity - A parcel moving through the warehouse lifecycle.
//!
//! Packages are seeded in `PENDING` with no warehouse or pallet. Induction sets
//! the warehouse and `received_ts`; stowing sets the pallet. The status column
//! is stored as text using the upper-case names (`"PENDING"`, `"INDUCTED"`, ...).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a package.
///
/// Variants are declared in lifecycle order, so the derived `Ord` matches the
/// order in which a package moves through the warehouse.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageStatus {
    /// Registered by the client, not yet physically received
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Received at a warehouse
    #[sea_orm(string_value = "INDUCTED")]
    Inducted,
    /// Placed on a pallet
    #[sea_orm(string_value = "STOWED")]
    Stowed,
    /// Pallet staged for dispatch
    #[sea_orm(string_value = "STAGED")]
    Staged,
    /// Picked up for delivery
    #[sea_orm(string_value = "PICKED")]
    Picked,
}

impl PackageStatus {
    /// The upper-case name used in storage and in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Inducted => "INDUCTED",
            Self::Stowed => "STOWED",
            Self::Staged => "STAGED",
            Self::Picked => "PICKED",
        }
    }

    /// The status that follows this one, or `None` for the final stage.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Inducted),
            Self::Inducted => Some(Self::Stowed),
            Self::Stowed => Some(Self::Staged),
            Self::Staged => Some(Self::Picked),
            Self::Picked => None,
        }
    }

    /// Whether a package in this status may move to `target`.
    ///
    /// Only single-step forward moves are legal; nothing skips a stage and
    /// nothing moves backwards.
    #[must_use]
    pub fn can_advance_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Package database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "packages")]
pub struct Model {
    /// Unique identifier for the package
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Weight in pounds
    pub weight_lbs: f64,
    /// Current lifecycle status
    pub status: PackageStatus,
    /// Date the package is due to ship
    pub service_date: Option<Date>,
    /// When the package was inducted at a warehouse
    pub received_ts: Option<DateTimeUtc>,
    /// When the row was created
    pub created_at: DateTimeUtc,
    /// When the row was last modified
    pub updated_at: DateTimeUtc,
    /// Warehouse that inducted the package, None while pending
    pub warehouse_id: Option<String>,
    /// Client that owns the package
    pub client_id: String,
    /// Pallet the package is stowed on, None until stowed
    pub pallet_id: Option<String>,
}

/// Defines relationships between Package and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each package belongs to one client
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id",
        on_delete = "Cascade"
    )]
    Client,
    /// Each inducted package belongs to one warehouse
    #[sea_orm(
        belongs_to = "super::warehouse::Entity",
        from = "Column::WarehouseId",
        to = "super::warehouse::Column::Id",
        on_delete = "Cascade"
    )]
    Warehouse,
    /// Each stowed package sits on one pallet
    #[sea_orm(
        belongs_to = "super::pallet::Entity",
        from = "Column::PalletId",
        to = "super::pallet::Column::Id",
        on_delete = "Cascade"
    )]
    Pallet,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::warehouse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Warehouse.def()
    }
}

impl Related<super::pallet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pallet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
