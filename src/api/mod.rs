//! HTTP gateway.
//!
//! Exposes the induction and stow engines as JSON batch routes and offers
//! read-only listings of packages, pallets, clients and warehouses.

pub mod error;
pub mod handlers;
pub mod types;

use crate::config::PalletRules;
use axum::{
    Router,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared state handed to every handler.
#[derive(Debug)]
pub struct AppState {
    /// Connection pool
    pub database: DatabaseConnection,
    /// Pallet weight rules used by both engines
    pub rules: PalletRules,
}

impl AppState {
    /// Wraps a connection and rules for use as router state.
    #[must_use]
    pub fn new(database: DatabaseConnection, rules: PalletRules) -> Arc<Self> {
        Arc::new(Self { database, rules })
    }
}

/// Builds the router with all routes, CORS and request tracing.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/packages", get(handlers::list_packages))
        .route("/packages/induct", post(handlers::induct))
        .route("/packages/stow", post(handlers::stow))
        .route("/packages/:id", get(handlers::get_package))
        .route("/pallets", get(handlers::list_pallets))
        .route("/pallets/:id", get(handlers::get_pallet))
        .route("/pallets/:id/packages", get(handlers::pallet_packages))
        .route("/clients", get(handlers::list_clients))
        .route("/clients/:id", get(handlers::get_client))
        .route("/clients/:id/packages", get(handlers::client_packages))
        .route("/warehouses", get(handlers::list_warehouses))
        .route("/warehouses/:id", get(handlers::get_warehouse))
        .route("/warehouses/:id/pallets", get(handlers::warehouse_pallets))
        .route("/warehouses/:id/packages", get(handlers::warehouse_packages))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
