//! Route handlers.
//!
//! Batch handlers translate JSON bodies into engine requests and engine results
//! back into JSON. Read handlers are straight lookups; a single-row lookup that
//! does not resolve answers 404.

use super::{
    AppState,
    error::ApiError,
    types::{InductPackageResult, InductPackagesInput, Payload, StowPackageResult, StowPackagesInput},
};
use crate::{
    core::{
        InductRequest, StowRequest, client as client_store, induct_packages,
        package as package_store, pallet as pallet_store, stow_packages,
        warehouse as warehouse_store,
    },
    entities::{client, package, pallet, warehouse},
};
use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

fn found<T>(row: Option<T>, entity: &'static str, id: String) -> ApiResult<T> {
    row.map(Json).ok_or(ApiError::NotFound { entity, id })
}

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}

/// `POST /packages/induct`
pub async fn induct(
    State(state): State<Arc<AppState>>,
    Json(input): Json<InductPackagesInput>,
) -> ApiResult<Payload<InductPackageResult>> {
    let request = InductRequest {
        package_ids: &input.package_ids,
        client_id: &input.client_id,
        warehouse_id: &input.warehouse_id,
    };
    let results = induct_packages(&state.database, &state.rules, request).await?;
    Ok(Json(Payload::from(results.as_slice())))
}

/// `POST /packages/stow`
pub async fn stow(
    State(state): State<Arc<AppState>>,
    Json(input): Json<StowPackagesInput>,
) -> ApiResult<Payload<StowPackageResult>> {
    let request = StowRequest {
        package_ids: &input.package_ids,
        warehouse_id: &input.warehouse_id,
        pallet_id: input.pallet_id.as_deref(),
    };
    let report = stow_packages(&state.database, &state.rules, request).await?;
    Ok(Json(Payload::from(report)))
}

/// `GET /packages`
pub async fn list_packages(State(state): State<Arc<AppState>>) -> ApiResult<Vec<package::Model>> {
    Ok(Json(package_store::get_all_packages(&state.database).await?))
}

/// `GET /packages/:id`
pub async fn get_package(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<package::Model> {
    let row = package_store::get_package_by_id(&state.database, &id).await?;
    found(row, "Package", id)
}

/// `GET /pallets`
pub async fn list_pallets(State(state): State<Arc<AppState>>) -> ApiResult<Vec<pallet::Model>> {
    Ok(Json(pallet_store::get_all_pallets(&state.database).await?))
}

/// `GET /pallets/:id`
pub async fn get_pallet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<pallet::Model> {
    let row = pallet_store::get_pallet_by_id(&state.database, &id).await?;
    found(row, "Pallet", id)
}

/// `GET /pallets/:id/packages`
pub async fn pallet_packages(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Vec<package::Model>> {
    if pallet_store::get_pallet_by_id(&state.database, &id).await?.is_none() {
        return Err(ApiError::NotFound {
            entity: "Pallet",
            id,
        });
    }
    Ok(Json(
        package_store::get_packages_on_pallet(&state.database, &id).await?,
    ))
}

/// `GET /clients`
pub async fn list_clients(State(state): State<Arc<AppState>>) -> ApiResult<Vec<client::Model>> {
    Ok(Json(client_store::get_all_clients(&state.database).await?))
}

/// `GET /clients/:id`
pub async fn get_client(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<client::Model> {
    let row = client_store::get_client_by_id(&state.database, &id).await?;
    found(row, "Client", id)
}

/// `GET /clients/:id/packages`
pub async fn client_packages(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Vec<package::Model>> {
    if client_store::get_client_by_id(&state.database, &id).await?.is_none() {
        return Err(ApiError::NotFound {
            entity: "Client",
            id,
        });
    }
    Ok(Json(
        package_store::get_packages_for_client(&state.database, &id).await?,
    ))
}

/// `GET /warehouses`
pub async fn list_warehouses(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Vec<warehouse::Model>> {
    Ok(Json(warehouse_store::get_all_warehouses(&state.database).await?))
}

/// `GET /warehouses/:id`
pub async fn get_warehouse(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<warehouse::Model> {
    let row = warehouse_store::get_warehouse_by_id(&state.database, &id).await?;
    found(row, "Warehouse", id)
}

/// `GET /warehouses/:id/pallets`
pub async fn warehouse_pallets(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Vec<pallet::Model>> {
    if warehouse_store::get_warehouse_by_id(&state.database, &id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound {
            entity: "Warehouse",
            id,
        });
    }
    Ok(Json(
        pallet_store::get_pallets_for_warehouse(&state.database, &id).await?,
    ))
}

/// `GET /warehouses/:id/packages`
pub async fn warehouse_packages(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Vec<package::Model>> {
    if warehouse_store::get_warehouse_by_id(&state.database, &id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound {
            entity: "Warehouse",
            id,
        });
    }
    Ok(Json(
        package_store::get_packages_for_warehouse(&state.database, &id).await?,
    ))
}
