use crate::{
    db::DbPool,
    entities::{
        debt::{self, DebtDirection, DebtStatus, Entity as Debt},
        payment_history::{self, Entity as PaymentHistory},
        supplier::Entity as Supplier,
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Debt as presented to callers: counterparty resolved to a display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtSummary {
    pub id: Uuid,
    pub direction: String,
    pub counterparty: String,
    pub total_debt: Decimal,
    pub paid_amount: Decimal,
    pub remaining_debt: Decimal,
    pub status: String,
    pub due_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub debt_date: DateTime<Utc>,
}

fn summarize(model: debt::Model, supplier_name: Option<String>) -> DebtSummary {
    let counterparty = supplier_name
        .or_else(|| model.customer_name.clone())
        .unwrap_or_else(|| "Unnamed".to_string());
    DebtSummary {
        id: model.id,
        direction: model.direction,
        counterparty,
        total_debt: model.total_debt,
        paid_amount: model.paid_amount,
        remaining_debt: model.remaining_debt,
        status: model.status,
        due_date: model.due_date,
        description: model.description,
        debt_date: model.debt_date,
    }
}

/// Creates an open debt with nothing paid yet, on the caller's
/// connection. Used by the transaction recorder for credit-type
/// purchases and sales.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn create_debt<C: ConnectionTrait>(
    conn: &C,
    store: &str,
    direction: DebtDirection,
    supplier_id: Option<Uuid>,
    customer_name: Option<String>,
    total_debt: Decimal,
    due_date: Option<DateTime<Utc>>,
    description: Option<String>,
    group_id: Option<Uuid>,
    debt_date: DateTime<Utc>,
) -> Result<debt::Model, ServiceError> {
    if total_debt <= Decimal::ZERO {
        return Err(ServiceError::ValidationError(
            "Debt total must be positive".to_string(),
        ));
    }

    let now = Utc::now();
    let created = debt::ActiveModel {
        id: Set(Uuid::new_v4()),
        store: Set(store.to_string()),
        direction: Set(direction.to_string()),
        supplier_id: Set(supplier_id),
        customer_name: Set(customer_name),
        total_debt: Set(total_debt),
        paid_amount: Set(Decimal::ZERO),
        remaining_debt: Set(total_debt),
        status: Set(DebtStatus::Open.to_string()),
        due_date: Set(due_date),
        description: Set(description),
        group_id: Set(group_id),
        debt_date: Set(debt_date),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await?;

    Ok(created)
}

/// Applies a credit-note value against a counterparty's open debts,
/// oldest first, by reducing `total_debt` and `remaining_debt` directly.
/// This is the documented exception to the normal payment flow: no
/// payment-history row is written and `paid_amount` stays untouched.
///
/// Fails with `ReturnExceedsDebt` before mutating anything when the
/// value exceeds the aggregate remaining debt.
pub(crate) async fn apply_credit_note<C: ConnectionTrait>(
    conn: &C,
    store: &str,
    direction: DebtDirection,
    supplier_id: Option<Uuid>,
    customer_name: Option<&str>,
    amount: Decimal,
) -> Result<Vec<Uuid>, ServiceError> {
    let mut query = Debt::find()
        .filter(debt::Column::Store.eq(store))
        .filter(debt::Column::Direction.eq(direction.to_string()))
        .filter(debt::Column::Status.eq(DebtStatus::Open.to_string()))
        .order_by_asc(debt::Column::DebtDate);

    if let Some(supplier_id) = supplier_id {
        query = query.filter(debt::Column::SupplierId.eq(supplier_id));
    }
    if let Some(customer_name) = customer_name {
        query = query.filter(debt::Column::CustomerName.eq(customer_name));
    }

    let open_debts = query.all(conn).await?;

    let aggregate_remaining: Decimal = open_debts.iter().map(|d| d.remaining_debt).sum();
    if amount > aggregate_remaining {
        return Err(ServiceError::ReturnExceedsDebt {
            remaining: aggregate_remaining,
            requested: amount,
        });
    }

    let mut left = amount;
    let mut touched = Vec::new();

    for open in open_debts {
        if left <= Decimal::ZERO {
            break;
        }
        let take = left.min(open.remaining_debt);

        let result = Debt::update_many()
            .col_expr(
                debt::Column::TotalDebt,
                Expr::col(debt::Column::TotalDebt).sub(Expr::val(take)),
            )
            .col_expr(
                debt::Column::RemainingDebt,
                Expr::col(debt::Column::RemainingDebt).sub(Expr::val(take)),
            )
            .col_expr(debt::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(debt::Column::Id.eq(open.id))
            .filter(debt::Column::RemainingDebt.gte(take))
            .exec(conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::Conflict(format!(
                "Debt {} changed concurrently",
                open.id
            )));
        }

        Debt::update_many()
            .col_expr(
                debt::Column::Status,
                Expr::value(DebtStatus::Paid.to_string()),
            )
            .filter(debt::Column::Id.eq(open.id))
            .filter(debt::Column::RemainingDebt.eq(Decimal::ZERO))
            .exec(conn)
            .await?;

        touched.push(open.id);
        left -= take;
    }

    Ok(touched)
}

/// Service for supplier payables and customer receivables.
#[derive(Clone)]
pub struct DebtService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl DebtService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Records a partial payment against an open debt: appends the
    /// payment-history row and moves `paid_amount`/`remaining_debt` in
    /// one guarded update. Reaching zero settles the debt terminally.
    #[instrument(skip(self, note), fields(debt_id = %debt_id))]
    pub async fn record_payment(
        &self,
        store: &str,
        debt_id: Uuid,
        amount: Decimal,
        note: Option<String>,
        paid_at: DateTime<Utc>,
    ) -> Result<Uuid, ServiceError> {
        if amount <= Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Payment amount must be positive".to_string(),
            ));
        }

        let db = &*self.db_pool;
        let txn = db.begin().await?;

        let debt = Debt::find_by_id(debt_id)
            .filter(debt::Column::Store.eq(store))
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Debt {} not found", debt_id)))?;

        if !debt.is_open() {
            return Err(ServiceError::DebtAlreadyPaid(debt_id));
        }
        if amount > debt.remaining_debt {
            return Err(ServiceError::Overpayment {
                debt_id,
                remaining: debt.remaining_debt,
                requested: amount,
            });
        }

        let result = Debt::update_many()
            .col_expr(
                debt::Column::PaidAmount,
                Expr::col(debt::Column::PaidAmount).add(Expr::val(amount)),
            )
            .col_expr(
                debt::Column::RemainingDebt,
                Expr::col(debt::Column::RemainingDebt).sub(Expr::val(amount)),
            )
            .col_expr(debt::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(debt::Column::Id.eq(debt_id))
            .filter(debt::Column::Status.eq(DebtStatus::Open.to_string()))
            .filter(debt::Column::RemainingDebt.gte(amount))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::Conflict(format!(
                "Debt {} changed concurrently",
                debt_id
            )));
        }

        Debt::update_many()
            .col_expr(
                debt::Column::Status,
                Expr::value(DebtStatus::Paid.to_string()),
            )
            .filter(debt::Column::Id.eq(debt_id))
            .filter(debt::Column::RemainingDebt.eq(Decimal::ZERO))
            .exec(&txn)
            .await?;

        let payment = payment_history::ActiveModel {
            id: Set(Uuid::new_v4()),
            debt_id: Set(debt_id),
            amount: Set(amount),
            note: Set(note),
            paid_at: Set(paid_at),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let updated = Debt::find_by_id(debt_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Debt {} disappeared", debt_id)))?;

        txn.commit().await?;

        info!(amount = %amount, remaining = %updated.remaining_debt, "Debt payment recorded");

        if let Err(e) = self
            .event_sender
            .send(Event::DebtPaymentRecorded {
                debt_id,
                payment_id: payment.id,
                amount,
                remaining: updated.remaining_debt,
            })
            .await
        {
            warn!(error = %e, "Failed to send debt payment event");
        }
        if !updated.is_open() {
            if let Err(e) = self.event_sender.send(Event::DebtSettled(debt_id)).await {
                warn!(error = %e, "Failed to send debt settled event");
            }
        }

        Ok(payment.id)
    }

    /// Open debts for a store, optionally one direction only.
    #[instrument(skip(self), fields(store = %store))]
    pub async fn active_debts(
        &self,
        store: &str,
        direction: Option<DebtDirection>,
    ) -> Result<Vec<DebtSummary>, ServiceError> {
        self.list_debts(store, direction, DebtStatus::Open).await
    }

    /// Settled debts for a store, optionally one direction only.
    #[instrument(skip(self), fields(store = %store))]
    pub async fn settled_debts(
        &self,
        store: &str,
        direction: Option<DebtDirection>,
    ) -> Result<Vec<DebtSummary>, ServiceError> {
        self.list_debts(store, direction, DebtStatus::Paid).await
    }

    async fn list_debts(
        &self,
        store: &str,
        direction: Option<DebtDirection>,
        status: DebtStatus,
    ) -> Result<Vec<DebtSummary>, ServiceError> {
        let db = &*self.db_pool;

        let mut query = Debt::find()
            .filter(debt::Column::Store.eq(store))
            .filter(debt::Column::Status.eq(status.to_string()))
            .find_also_related(Supplier)
            .order_by_desc(debt::Column::DebtDate);

        if let Some(direction) = direction {
            query = query.filter(debt::Column::Direction.eq(direction.to_string()));
        }

        let rows = query.all(db).await?;

        Ok(rows
            .into_iter()
            .map(|(model, sup)| summarize(model, sup.map(|s| s.name)))
            .collect())
    }

    /// Payment history of one debt, newest first.
    #[instrument(skip(self), fields(debt_id = %debt_id))]
    pub async fn payment_history(
        &self,
        store: &str,
        debt_id: Uuid,
    ) -> Result<Vec<payment_history::Model>, ServiceError> {
        let db = &*self.db_pool;

        Debt::find_by_id(debt_id)
            .filter(debt::Column::Store.eq(store))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Debt {} not found", debt_id)))?;

        Ok(PaymentHistory::find()
            .filter(payment_history::Column::DebtId.eq(debt_id))
            .order_by_desc(payment_history::Column::PaidAt)
            .all(db)
            .await?)
    }

    /// Aggregate remaining payable debt towards one supplier.
    #[instrument(skip(self), fields(store = %store, supplier_id = %supplier_id))]
    pub async fn supplier_outstanding(
        &self,
        store: &str,
        supplier_id: Uuid,
    ) -> Result<Decimal, ServiceError> {
        let db = &*self.db_pool;

        let debts = Debt::find()
            .filter(debt::Column::Store.eq(store))
            .filter(debt::Column::SupplierId.eq(supplier_id))
            .filter(debt::Column::Direction.eq(DebtDirection::Payable.to_string()))
            .filter(debt::Column::Status.eq(DebtStatus::Open.to_string()))
            .all(db)
            .await?;

        Ok(debts.iter().map(|d| d.remaining_debt).sum())
    }

    /// Fetches one debt, store-scoped.
    pub async fn get_debt(&self, store: &str, debt_id: Uuid) -> Result<debt::Model, ServiceError> {
        let db = &*self.db_pool;
        Debt::find_by_id(debt_id)
            .filter(debt::Column::Store.eq(store))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Debt {} not found", debt_id)))
    }
}
