use crate::{
    entities::{account, account_transaction},
    handlers::StoreQuery,
    services::accounts::ReconciliationReport,
    services::catalog::RegisterAccountRequest,
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
pub struct RegisterAccountBody {
    pub store: String,
    #[serde(flatten)]
    pub account: RegisterAccountRequest,
}

pub async fn register_account(
    State(state): State<AppState>,
    Json(body): Json<RegisterAccountBody>,
) -> ApiResult<account::Model> {
    let created = state
        .services
        .catalog
        .register_account(&body.store, body.account)
        .await?;
    Ok(Json(ApiResponse::success(created)))
}

pub async fn create_default_cash_account(
    State(state): State<AppState>,
    Json(body): Json<StoreBody>,
) -> ApiResult<account::Model> {
    let account = state
        .services
        .catalog
        .create_default_cash_account(&body.store)
        .await?;
    Ok(Json(ApiResponse::success(account)))
}

#[derive(Debug, Deserialize)]
pub struct StoreBody {
    pub store: String,
}

pub async fn list_accounts(
    State(state): State<AppState>,
    Query(query): Query<StoreQuery>,
) -> ApiResult<Vec<account::Model>> {
    let accounts = state.services.catalog.list_accounts(&query.store).await?;
    Ok(Json(ApiResponse::success(accounts)))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub store: String,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

pub async fn account_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Vec<account_transaction::Model>> {
    let history = state
        .services
        .accounts
        .account_history(&query.store, id, query.from, query.to)
        .await?;
    Ok(Json(ApiResponse::success(history)))
}

pub async fn reconcile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<StoreQuery>,
) -> ApiResult<ReconciliationReport> {
    let report = state.services.accounts.reconcile(&query.store, id).await?;
    Ok(Json(ApiResponse::success(report)))
}

#[derive(Debug, Deserialize)]
pub struct AdjustBalanceBody {
    pub store: String,
    pub amount: Decimal,
    pub description: String,
    pub created_by: Option<String>,
    pub date: DateTime<Utc>,
}

pub async fn adjust_balance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AdjustBalanceBody>,
) -> ApiResult<account_transaction::Model> {
    let entry = state
        .services
        .accounts
        .adjust_balance(
            &body.store,
            id,
            body.amount,
            body.description,
            body.created_by,
            body.date,
        )
        .await?;
    Ok(Json(ApiResponse::success(entry)))
}

#[derive(Debug, Deserialize)]
pub struct TransferFundsBody {
    pub store: String,
    pub from_account_id: Uuid,
    pub to_account_id: Uuid,
    pub amount: Decimal,
    pub description: String,
    pub created_by: Option<String>,
    pub date: DateTime<Utc>,
}

pub async fn transfer_funds(
    State(state): State<AppState>,
    Json(body): Json<TransferFundsBody>,
) -> ApiResult<()> {
    state
        .services
        .accounts
        .transfer_funds(
            &body.store,
            body.from_account_id,
            body.to_account_id,
            body.amount,
            body.description,
            body.created_by,
            body.date,
        )
        .await?;
    Ok(Json(ApiResponse::success(())))
}
