use crate::{
    services::recorder::{RecordPurchaseReturnRequest, RecordSaleReturnRequest},
    ApiResponse, ApiResult, AppState,
};
use axum::{extract::State, response::Json};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct ReturnCreated {
    pub return_id: Uuid,
}

pub async fn record_purchase_return(
    State(state): State<AppState>,
    Json(request): Json<RecordPurchaseReturnRequest>,
) -> ApiResult<ReturnCreated> {
    let return_id = state
        .services
        .recorder
        .record_purchase_return(request)
        .await?;
    Ok(Json(ApiResponse::success(ReturnCreated { return_id })))
}

pub async fn record_sale_return(
    State(state): State<AppState>,
    Json(request): Json<RecordSaleReturnRequest>,
) -> ApiResult<ReturnCreated> {
    let return_id = state.services.recorder.record_sale_return(request).await?;
    Ok(Json(ApiResponse::success(ReturnCreated { return_id })))
}
