use crate::{
    entities::{
        debt::{DebtDirection, DebtStatus},
        payment_history,
    },
    handlers::StoreQuery,
    services::debts::DebtSummary,
    ApiResponse, ApiResult, AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct DebtListQuery {
    pub store: String,
    /// `payable` or `receivable`; both when omitted
    pub direction: Option<DebtDirection>,
    /// `open` (default) or `paid`
    pub status: Option<DebtStatus>,
}

pub async fn list_debts(
    State(state): State<AppState>,
    Query(query): Query<DebtListQuery>,
) -> ApiResult<Vec<DebtSummary>> {
    let debts = match query.status.unwrap_or(DebtStatus::Open) {
        DebtStatus::Open => {
            state
                .services
                .debts
                .active_debts(&query.store, query.direction)
                .await?
        }
        DebtStatus::Paid => {
            state
                .services
                .debts
                .settled_debts(&query.store, query.direction)
                .await?
        }
    };
    Ok(Json(ApiResponse::success(debts)))
}

#[derive(Debug, Deserialize)]
pub struct RecordPaymentBody {
    pub store: String,
    pub amount: Decimal,
    pub note: Option<String>,
    pub date: DateTime<Utc>,
}

#[derive(Debug, serde::Serialize)]
pub struct PaymentCreated {
    pub payment_id: Uuid,
}

pub async fn record_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<RecordPaymentBody>,
) -> ApiResult<PaymentCreated> {
    let payment_id = state
        .services
        .debts
        .record_payment(&body.store, id, body.amount, body.note, body.date)
        .await?;
    Ok(Json(ApiResponse::success(PaymentCreated { payment_id })))
}

pub async fn payment_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<StoreQuery>,
) -> ApiResult<Vec<payment_history::Model>> {
    let history = state
        .services
        .debts
        .payment_history(&query.store, id)
        .await?;
    Ok(Json(ApiResponse::success(history)))
}
