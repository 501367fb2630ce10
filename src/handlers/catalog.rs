use crate::{
    entities::{product, supplier, warehouse},
    handlers::StoreQuery,
    services::catalog::{RegisterProductRequest, RegisterSupplierRequest},
    ApiResponse, ApiResult, AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct RegisterProductBody {
    pub store: String,
    #[serde(flatten)]
    pub product: RegisterProductRequest,
}

pub async fn register_product(
    State(state): State<AppState>,
    Json(body): Json<RegisterProductBody>,
) -> ApiResult<product::Model> {
    let created = state
        .services
        .catalog
        .register_product(&body.store, body.product)
        .await?;
    Ok(Json(ApiResponse::success(created)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<RegisterProductBody>,
) -> ApiResult<product::Model> {
    let updated = state
        .services
        .catalog
        .update_product(&body.store, id, body.product)
        .await?;
    Ok(Json(ApiResponse::success(updated)))
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<StoreQuery>,
) -> ApiResult<Vec<product::Model>> {
    let products = state.services.catalog.list_products(&query.store).await?;
    Ok(Json(ApiResponse::success(products)))
}

#[derive(Debug, Deserialize)]
pub struct RegisterWarehouseBody {
    pub store: String,
    pub name: String,
}

pub async fn register_warehouse(
    State(state): State<AppState>,
    Json(body): Json<RegisterWarehouseBody>,
) -> ApiResult<warehouse::Model> {
    let created = state
        .services
        .catalog
        .register_warehouse(&body.store, &body.name)
        .await?;
    Ok(Json(ApiResponse::success(created)))
}

pub async fn delete_warehouse(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<StoreQuery>,
) -> ApiResult<()> {
    state
        .services
        .catalog
        .delete_warehouse(&query.store, id)
        .await?;
    Ok(Json(ApiResponse::success(())))
}

pub async fn list_warehouses(
    State(state): State<AppState>,
    Query(query): Query<StoreQuery>,
) -> ApiResult<Vec<warehouse::Model>> {
    let warehouses = state.services.catalog.list_warehouses(&query.store).await?;
    Ok(Json(ApiResponse::success(warehouses)))
}

#[derive(Debug, Deserialize)]
pub struct RegisterSupplierBody {
    pub store: String,
    #[serde(flatten)]
    pub supplier: RegisterSupplierRequest,
}

pub async fn register_supplier(
    State(state): State<AppState>,
    Json(body): Json<RegisterSupplierBody>,
) -> ApiResult<supplier::Model> {
    let created = state
        .services
        .catalog
        .register_supplier(&body.store, body.supplier)
        .await?;
    Ok(Json(ApiResponse::success(created)))
}

pub async fn list_suppliers(
    State(state): State<AppState>,
    Query(query): Query<StoreQuery>,
) -> ApiResult<Vec<supplier::Model>> {
    let suppliers = state.services.catalog.list_suppliers(&query.store).await?;
    Ok(Json(ApiResponse::success(suppliers)))
}
