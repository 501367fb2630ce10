use crate::{
    services::recorder::{
        RecordExpenseRequest, RecordPurchaseMultiRequest, RecordPurchaseRequest,
        RecordSalaryPaymentRequest, RecordSaleMultiRequest, RecordSaleRequest,
    },
    ApiResponse, ApiResult, AppState,
};
use axum::{extract::State, response::Json};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct TransactionCreated {
    pub transaction_id: Uuid,
}

pub async fn record_purchase(
    State(state): State<AppState>,
    Json(request): Json<RecordPurchaseRequest>,
) -> ApiResult<TransactionCreated> {
    let transaction_id = state.services.recorder.record_purchase(request).await?;
    Ok(Json(ApiResponse::success(TransactionCreated {
        transaction_id,
    })))
}

pub async fn record_purchase_multi(
    State(state): State<AppState>,
    Json(request): Json<RecordPurchaseMultiRequest>,
) -> ApiResult<TransactionCreated> {
    let transaction_id = state
        .services
        .recorder
        .record_purchase_multi(request)
        .await?;
    Ok(Json(ApiResponse::success(TransactionCreated {
        transaction_id,
    })))
}

pub async fn record_sale(
    State(state): State<AppState>,
    Json(request): Json<RecordSaleRequest>,
) -> ApiResult<TransactionCreated> {
    let transaction_id = state.services.recorder.record_sale(request).await?;
    Ok(Json(ApiResponse::success(TransactionCreated {
        transaction_id,
    })))
}

pub async fn record_sale_multi(
    State(state): State<AppState>,
    Json(request): Json<RecordSaleMultiRequest>,
) -> ApiResult<TransactionCreated> {
    let transaction_id = state.services.recorder.record_sale_multi(request).await?;
    Ok(Json(ApiResponse::success(TransactionCreated {
        transaction_id,
    })))
}

pub async fn record_expense(
    State(state): State<AppState>,
    Json(request): Json<RecordExpenseRequest>,
) -> ApiResult<TransactionCreated> {
    let transaction_id = state.services.recorder.record_expense(request).await?;
    Ok(Json(ApiResponse::success(TransactionCreated {
        transaction_id,
    })))
}

pub async fn record_salary_payment(
    State(state): State<AppState>,
    Json(request): Json<RecordSalaryPaymentRequest>,
) -> ApiResult<TransactionCreated> {
    let transaction_id = state
        .services
        .recorder
        .record_salary_payment(request)
        .await?;
    Ok(Json(ApiResponse::success(TransactionCreated {
        transaction_id,
    })))
}
