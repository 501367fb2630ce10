use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use sea_orm::error::DbErr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error body returned by the HTTP facade.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status category (e.g., "Not Found", "Unprocessable Entity")
    pub error: String,
    /// Human-readable error description
    pub message: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// ISO 8601 timestamp when the error occurred
    pub timestamp: String,
}

/// Unified error type for all ledger operations.
///
/// Business-rule violations (insufficient stock/funds, overpayment,
/// return-exceeds-debt) carry the figures the caller needs to present the
/// failure; none of them leaves side effects behind. `DatabaseError` is the
/// infrastructure case: the enclosing transaction has been rolled back and
/// the caller may retry.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Insufficient stock for product {product_id} in warehouse {warehouse_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: Uuid,
        warehouse_id: Uuid,
        available: i64,
        requested: i64,
    },

    #[error("Insufficient funds in account {account_id}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        account_id: Uuid,
        balance: Decimal,
        requested: Decimal,
    },

    #[error("Payment of {requested} exceeds remaining debt {remaining} on {debt_id}")]
    Overpayment {
        debt_id: Uuid,
        remaining: Decimal,
        requested: Decimal,
    },

    #[error("Return value {requested} exceeds remaining debt {remaining}")]
    ReturnExceedsDebt {
        remaining: Decimal,
        requested: Decimal,
    },

    #[error("Debt {0} is already settled")]
    DebtAlreadyPaid(Uuid),

    #[error("{entity} '{name}' already exists for this store")]
    DuplicateEntity { entity: &'static str, name: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Event error: {0}")]
    EventError(String),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl ServiceError {
    /// Returns the HTTP status code for this error.
    /// This is the single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::DatabaseError(_) | Self::EventError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ValidationError(_) | Self::InvalidOperation(_) => StatusCode::BAD_REQUEST,
            Self::DuplicateEntity { .. } | Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InsufficientStock { .. }
            | Self::InsufficientFunds { .. }
            | Self::Overpayment { .. }
            | Self::ReturnExceedsDebt { .. }
            | Self::DebtAlreadyPaid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Returns the error message suitable for HTTP responses.
    /// Infrastructure errors return generic messages so that storage
    /// details never leak into a response body.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Storage unavailable".to_string(),
            Self::EventError(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let err = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.response_message(),
            details: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(err)).into_response()
    }
}
