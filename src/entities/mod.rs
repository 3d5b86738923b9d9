//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the four warehouse tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod client;
pub mod package;
pub mod pallet;
pub mod warehouse;

// Re-export specific types to avoid conflicts
pub use client::{Column as ClientColumn, Entity as Client, Model as ClientModel};
pub use package::{
    Column as PackageColumn, Entity as Package, Model as PackageModel, PackageStatus,
};
pub use pallet::{Column as PalletColumn, Entity as Pallet, Model as PalletModel};
pub use warehouse::{Column as WarehouseColumn, Entity as Warehouse, Model as WarehouseModel};
