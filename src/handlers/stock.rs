use crate::{
    services::pricing::ProductPurchaseInfo,
    services::recorder::RecordStockAdjustmentRequest,
    services::stock::WarehouseStock,
    ApiResponse, ApiResult, AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct StockSummaryQuery {
    pub store: String,
    pub product_id: Option<Uuid>,
}

pub async fn stock_summary(
    State(state): State<AppState>,
    Query(query): Query<StockSummaryQuery>,
) -> ApiResult<Vec<WarehouseStock>> {
    let summary = state
        .services
        .stock
        .stock_summary(&query.store, query.product_id)
        .await?;
    Ok(Json(ApiResponse::success(summary)))
}

#[derive(Debug, Serialize)]
pub struct AdjustmentCreated {
    pub adjustment_id: Uuid,
}

pub async fn record_stock_adjustment(
    State(state): State<AppState>,
    Json(request): Json<RecordStockAdjustmentRequest>,
) -> ApiResult<AdjustmentCreated> {
    let adjustment_id = state
        .services
        .recorder
        .record_stock_adjustment(request)
        .await?;
    Ok(Json(ApiResponse::success(AdjustmentCreated {
        adjustment_id,
    })))
}

#[derive(Debug, Deserialize)]
pub struct MigrateStockBody {
    pub store: String,
    pub product_id: Uuid,
    pub source_warehouse_id: Uuid,
    pub target_warehouse_id: Uuid,
    pub quantity: i64,
}

pub async fn migrate_stock(
    State(state): State<AppState>,
    Json(body): Json<MigrateStockBody>,
) -> ApiResult<()> {
    state
        .services
        .stock
        .migrate_stock(
            &body.store,
            body.product_id,
            body.source_warehouse_id,
            body.target_warehouse_id,
            body.quantity,
        )
        .await?;
    Ok(Json(ApiResponse::success(())))
}

#[derive(Debug, Deserialize)]
pub struct StoreScope {
    pub store: String,
}

pub async fn product_purchase_info(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<StoreScope>,
) -> ApiResult<ProductPurchaseInfo> {
    let info = state
        .services
        .pricing
        .product_purchase_info(&query.store, id)
        .await?;
    Ok(Json(ApiResponse::success(info)))
}
