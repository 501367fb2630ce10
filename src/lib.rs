//! StoreLedger API Library
//!
//! The transactional ledger core behind a multi-warehouse store
//! inventory front end: purchases, sales, returns, stock adjustments,
//! account balances and supplier/customer debts.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod services;

use axum::{response::Json, routing::get, routing::post, Router};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use handlers::AppServices;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: AppServices,
}

// Common response wrappers
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Standard API result type for JSON responses
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, errors::ServiceError>;

/// The v1 operation surface. One route per recorder operation plus the
/// ledger read queries; no business logic lives here.
pub fn api_v1_routes() -> Router<AppState> {
    let catalog = Router::new()
        .route(
            "/products",
            get(handlers::catalog::list_products).post(handlers::catalog::register_product),
        )
        .route("/products/:id", axum::routing::put(handlers::catalog::update_product))
        .route(
            "/warehouses",
            get(handlers::catalog::list_warehouses).post(handlers::catalog::register_warehouse),
        )
        .route(
            "/warehouses/:id",
            axum::routing::delete(handlers::catalog::delete_warehouse),
        )
        .route(
            "/suppliers",
            get(handlers::catalog::list_suppliers).post(handlers::catalog::register_supplier),
        )
        .route(
            "/accounts",
            get(handlers::accounts::list_accounts).post(handlers::accounts::register_account),
        )
        .route(
            "/accounts/default",
            post(handlers::accounts::create_default_cash_account),
        );

    let trade = Router::new()
        .route("/purchases", post(handlers::transactions::record_purchase))
        .route(
            "/purchases/multi",
            post(handlers::transactions::record_purchase_multi),
        )
        .route("/sales", post(handlers::transactions::record_sale))
        .route(
            "/sales/multi",
            post(handlers::transactions::record_sale_multi),
        )
        .route(
            "/returns/purchase",
            post(handlers::returns::record_purchase_return),
        )
        .route("/returns/sale", post(handlers::returns::record_sale_return))
        .route("/expenses", post(handlers::transactions::record_expense))
        .route(
            "/expenses/salary",
            post(handlers::transactions::record_salary_payment),
        );

    let stock = Router::new()
        .route("/stock", get(handlers::stock::stock_summary))
        .route(
            "/stock/adjustments",
            post(handlers::stock::record_stock_adjustment),
        )
        .route("/stock/migrate", post(handlers::stock::migrate_stock))
        .route(
            "/pricing/products/:id",
            get(handlers::stock::product_purchase_info),
        );

    let money = Router::new()
        .route("/debts", get(handlers::debts::list_debts))
        .route("/debts/:id/payments", post(handlers::debts::record_payment))
        .route(
            "/debts/:id/history",
            get(handlers::debts::payment_history),
        )
        .route(
            "/accounts/:id/transactions",
            get(handlers::accounts::account_history),
        )
        .route(
            "/accounts/:id/reconcile",
            get(handlers::accounts::reconcile),
        )
        .route("/accounts/:id/adjust", post(handlers::accounts::adjust_balance))
        .route("/accounts/transfer", post(handlers::accounts::transfer_funds));

    Router::new()
        .route("/status", get(api_status))
        .route("/health", get(health_check))
        .merge(catalog)
        .merge(trade)
        .merge(stock)
        .merge(money)
}

async fn api_status() -> Result<Json<ApiResponse<Value>>, errors::ServiceError> {
    let version = env!("CARGO_PKG_VERSION");
    let status_data = json!({
        "status": "ok",
        "version": version,
        "service": "storeledger-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    Ok(Json(ApiResponse::success(status_data)))
}

async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<Json<ApiResponse<Value>>, errors::ServiceError> {
    let db_status = match state.db.ping().await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    let health_data = json!({
        "status": db_status,
        "checks": {
            "database": db_status,
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    Ok(Json(ApiResponse::success(health_data)))
}

#[cfg(test)]
mod response_tests {
    use super::*;

    #[test]
    fn success_response_carries_data() {
        let response = ApiResponse::success("ok");
        assert!(response.success);
        assert_eq!(response.data, Some("ok"));
        assert!(response.message.is_none());
    }

    #[test]
    fn error_response_carries_message() {
        let response = ApiResponse::<()>::error("oops".into());
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.message.as_deref(), Some("oops"));
    }
}
