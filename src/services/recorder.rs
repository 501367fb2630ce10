use crate::{
    db::DbPool,
    entities::{
        account_transaction::EntryKind,
        debt::DebtDirection,
        operational_expense,
        product::{self, Entity as Product},
        purchase_line,
        return_line,
        return_record::{self, ReturnKind, ReturnType},
        salary_payment, sale_line,
        stock_adjustment::{self, AdjustmentDirection},
        supplier::{self, Entity as Supplier},
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::{accounts, debts, stock},
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

pub use crate::entities::purchase_line::PaymentKind;

/// One line of a purchase, sale or return submission. Multi-item
/// requests carry a fully-formed list per call; the core holds no
/// cart state between calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeItem {
    pub product_id: Uuid,
    pub quantity: i64,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPurchaseRequest {
    pub store: String,
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub supplier_id: Uuid,
    pub payment_kind: PaymentKind,
    pub account_id: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
    pub invoice_number: Option<String>,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPurchaseMultiRequest {
    pub store: String,
    pub supplier_id: Uuid,
    pub warehouse_id: Uuid,
    pub items: Vec<TradeItem>,
    pub payment_kind: PaymentKind,
    pub account_id: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
    pub invoice_number: Option<String>,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSaleRequest {
    pub store: String,
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub customer_name: Option<String>,
    pub payment_kind: PaymentKind,
    pub account_id: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
    pub invoice_number: Option<String>,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSaleMultiRequest {
    pub store: String,
    pub warehouse_id: Uuid,
    pub items: Vec<TradeItem>,
    pub payment_kind: PaymentKind,
    pub account_id: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
    pub customer_name: Option<String>,
    pub invoice_number: Option<String>,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPurchaseReturnRequest {
    pub store: String,
    pub supplier_id: Uuid,
    pub warehouse_id: Uuid,
    pub items: Vec<TradeItem>,
    pub return_type: ReturnType,
    pub reason: String,
    pub description: Option<String>,
    pub account_id: Option<Uuid>,
    pub invoice_number: Option<String>,
    pub date: DateTime<Utc>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSaleReturnRequest {
    pub store: String,
    pub warehouse_id: Uuid,
    pub customer_name: Option<String>,
    pub items: Vec<TradeItem>,
    pub return_type: ReturnType,
    pub reason: String,
    pub description: Option<String>,
    pub account_id: Option<Uuid>,
    pub date: DateTime<Utc>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordStockAdjustmentRequest {
    pub store: String,
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub direction: AdjustmentDirection,
    pub quantity: i64,
    pub reason: String,
    pub date: DateTime<Utc>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordExpenseRequest {
    pub store: String,
    pub expense_type: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub account_id: Option<Uuid>,
    pub reference_id: Option<Uuid>,
    pub date: DateTime<Utc>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSalaryPaymentRequest {
    pub store: String,
    pub staff_name: String,
    pub period: NaiveDate,
    pub amount: Decimal,
    pub note: Option<String>,
    pub account_id: Option<Uuid>,
    pub date: DateTime<Utc>,
    pub created_by: Option<String>,
}

fn validate_items(items: &[TradeItem]) -> Result<(), ServiceError> {
    if items.is_empty() {
        return Err(ServiceError::ValidationError(
            "At least one item is required".to_string(),
        ));
    }
    for item in items {
        if item.quantity <= 0 {
            return Err(ServiceError::ValidationError(format!(
                "Quantity for product {} must be positive",
                item.product_id
            )));
        }
        if item.unit_price < Decimal::ZERO {
            return Err(ServiceError::ValidationError(format!(
                "Unit price for product {} must not be negative",
                item.product_id
            )));
        }
    }
    Ok(())
}

fn batch_total(items: &[TradeItem]) -> Decimal {
    items
        .iter()
        .map(|i| i.unit_price * Decimal::from(i.quantity))
        .sum()
}

async fn find_product<C: ConnectionTrait>(
    conn: &C,
    store: &str,
    product_id: Uuid,
) -> Result<product::Model, ServiceError> {
    Product::find_by_id(product_id)
        .filter(product::Column::Store.eq(store))
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", product_id)))
}

async fn find_supplier<C: ConnectionTrait>(
    conn: &C,
    store: &str,
    supplier_id: Uuid,
) -> Result<supplier::Model, ServiceError> {
    Supplier::find_by_id(supplier_id)
        .filter(supplier::Column::Store.eq(store))
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Supplier {} not found", supplier_id)))
}

/// The orchestrator: composes the stock, account and debt ledgers into
/// one database transaction per recorded operation. Any failed step
/// rolls back every prior step of the same request; events go out only
/// after the commit.
#[derive(Clone)]
pub struct TransactionRecorder {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl TransactionRecorder {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Records a single-line purchase. Returns the transaction group id.
    #[instrument(skip(self, request), fields(store = %request.store, product_id = %request.product_id))]
    pub async fn record_purchase(
        &self,
        request: RecordPurchaseRequest,
    ) -> Result<Uuid, ServiceError> {
        self.record_purchase_multi(RecordPurchaseMultiRequest {
            store: request.store,
            supplier_id: request.supplier_id,
            warehouse_id: request.warehouse_id,
            items: vec![TradeItem {
                product_id: request.product_id,
                quantity: request.quantity,
                unit_price: request.unit_price,
            }],
            payment_kind: request.payment_kind,
            account_id: request.account_id,
            due_date: request.due_date,
            invoice_number: request.invoice_number,
            description: request.description,
            date: request.date,
            created_by: request.created_by,
        })
        .await
    }

    /// Records a purchase of one or more items under a shared group id:
    /// stock in per item, then either an account debit (cash) or a
    /// payable debt (credit) for the batch total, then one line row per
    /// item. One transaction; no partial effects survive a failure.
    #[instrument(skip(self, request), fields(store = %request.store, items = request.items.len()))]
    pub async fn record_purchase_multi(
        &self,
        request: RecordPurchaseMultiRequest,
    ) -> Result<Uuid, ServiceError> {
        validate_items(&request.items)?;

        let db = &*self.db_pool;
        let txn = db.begin().await?;

        let supplier = find_supplier(&txn, &request.store, request.supplier_id).await?;
        stock::find_warehouse(&txn, &request.store, request.warehouse_id).await?;
        for item in &request.items {
            find_product(&txn, &request.store, item.product_id).await?;
        }

        let group_id = Uuid::new_v4();
        let total = batch_total(&request.items);

        for item in &request.items {
            stock::apply_stock_delta(
                &txn,
                &request.store,
                item.product_id,
                request.warehouse_id,
                item.quantity,
            )
            .await?;
        }

        let mut debt_created: Option<(Uuid, Decimal)> = None;
        let (account_id, debt_id) = match request.payment_kind {
            PaymentKind::Cash => {
                if let Some(account_id) = request.account_id {
                    let account = accounts::find_account(&txn, &request.store, account_id).await?;
                    accounts::post_to_account(
                        &txn,
                        &account,
                        -total,
                        EntryKind::Purchase,
                        request
                            .description
                            .clone()
                            .or_else(|| Some(format!("Purchase from {}", supplier.name))),
                        request.date,
                        request.created_by.clone(),
                        false,
                    )
                    .await?;
                    (Some(account_id), None)
                } else {
                    (None, None)
                }
            }
            PaymentKind::Credit => {
                let debt = debts::create_debt(
                    &txn,
                    &request.store,
                    DebtDirection::Payable,
                    Some(supplier.id),
                    None,
                    total,
                    request.due_date,
                    request.description.clone(),
                    Some(group_id),
                    request.date,
                )
                .await?;
                debt_created = Some((debt.id, debt.total_debt));
                (None, Some(debt.id))
            }
        };

        let now = Utc::now();
        for item in &request.items {
            purchase_line::ActiveModel {
                id: Set(Uuid::new_v4()),
                store: Set(request.store.clone()),
                group_id: Set(group_id),
                product_id: Set(item.product_id),
                warehouse_id: Set(request.warehouse_id),
                supplier_id: Set(request.supplier_id),
                quantity: Set(item.quantity),
                unit_price: Set(item.unit_price),
                total: Set(item.unit_price * Decimal::from(item.quantity)),
                payment_kind: Set(request.payment_kind.to_string()),
                account_id: Set(account_id),
                debt_id: Set(debt_id),
                invoice_number: Set(request.invoice_number.clone()),
                description: Set(request.description.clone()),
                transaction_date: Set(request.date),
                created_by: Set(request.created_by.clone()),
                created_at: Set(now),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        info!(group_id = %group_id, total = %total, "Purchase recorded");

        if let Err(e) = self
            .event_sender
            .send(Event::PurchaseRecorded {
                store: request.store.clone(),
                group_id,
                total,
                line_count: request.items.len(),
            })
            .await
        {
            warn!(error = %e, "Failed to send purchase recorded event");
        }
        if let Some((debt_id, total_debt)) = debt_created {
            if let Err(e) = self
                .event_sender
                .send(Event::DebtCreated {
                    store: request.store,
                    debt_id,
                    total_debt,
                })
                .await
            {
                warn!(error = %e, "Failed to send debt created event");
            }
        }

        Ok(group_id)
    }

    /// Records a single-line sale. Returns the transaction group id.
    #[instrument(skip(self, request), fields(store = %request.store, product_id = %request.product_id))]
    pub async fn record_sale(&self, request: RecordSaleRequest) -> Result<Uuid, ServiceError> {
        self.record_sale_multi(RecordSaleMultiRequest {
            store: request.store,
            warehouse_id: request.warehouse_id,
            items: vec![TradeItem {
                product_id: request.product_id,
                quantity: request.quantity,
                unit_price: request.unit_price,
            }],
            payment_kind: request.payment_kind,
            account_id: request.account_id,
            due_date: request.due_date,
            customer_name: request.customer_name,
            invoice_number: request.invoice_number,
            description: request.description,
            date: request.date,
            created_by: request.created_by,
        })
        .await
    }

    /// Records a sale of one or more items under a shared group id:
    /// stock out per item (each decrement guarded against overselling),
    /// then an account credit (cash) or a receivable debt (credit) for
    /// the batch total, then one line row per item. If any item fails
    /// its stock check the whole batch is rejected untouched.
    #[instrument(skip(self, request), fields(store = %request.store, items = request.items.len()))]
    pub async fn record_sale_multi(
        &self,
        request: RecordSaleMultiRequest,
    ) -> Result<Uuid, ServiceError> {
        validate_items(&request.items)?;

        let db = &*self.db_pool;
        let txn = db.begin().await?;

        stock::find_warehouse(&txn, &request.store, request.warehouse_id).await?;
        for item in &request.items {
            find_product(&txn, &request.store, item.product_id).await?;
        }

        let group_id = Uuid::new_v4();
        let total = batch_total(&request.items);

        for item in &request.items {
            stock::apply_stock_delta(
                &txn,
                &request.store,
                item.product_id,
                request.warehouse_id,
                -item.quantity,
            )
            .await?;
        }

        let mut debt_created: Option<(Uuid, Decimal)> = None;
        let (account_id, debt_id) = match request.payment_kind {
            PaymentKind::Cash => {
                if let Some(account_id) = request.account_id {
                    let account = accounts::find_account(&txn, &request.store, account_id).await?;
                    accounts::post_to_account(
                        &txn,
                        &account,
                        total,
                        EntryKind::Sale,
                        request
                            .description
                            .clone()
                            .or_else(|| request.customer_name.clone().map(|c| format!("Sale to {}", c))),
                        request.date,
                        request.created_by.clone(),
                        false,
                    )
                    .await?;
                    (Some(account_id), None)
                } else {
                    (None, None)
                }
            }
            PaymentKind::Credit => {
                let debt = debts::create_debt(
                    &txn,
                    &request.store,
                    DebtDirection::Receivable,
                    None,
                    request.customer_name.clone(),
                    total,
                    request.due_date,
                    request.description.clone(),
                    Some(group_id),
                    request.date,
                )
                .await?;
                debt_created = Some((debt.id, debt.total_debt));
                (None, Some(debt.id))
            }
        };

        let now = Utc::now();
        for item in &request.items {
            sale_line::ActiveModel {
                id: Set(Uuid::new_v4()),
                store: Set(request.store.clone()),
                group_id: Set(group_id),
                product_id: Set(item.product_id),
                warehouse_id: Set(request.warehouse_id),
                customer_name: Set(request.customer_name.clone()),
                quantity: Set(item.quantity),
                unit_price: Set(item.unit_price),
                total: Set(item.unit_price * Decimal::from(item.quantity)),
                payment_kind: Set(request.payment_kind.to_string()),
                account_id: Set(account_id),
                debt_id: Set(debt_id),
                invoice_number: Set(request.invoice_number.clone()),
                description: Set(request.description.clone()),
                transaction_date: Set(request.date),
                created_by: Set(request.created_by.clone()),
                created_at: Set(now),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        info!(group_id = %group_id, total = %total, "Sale recorded");

        if let Err(e) = self
            .event_sender
            .send(Event::SaleRecorded {
                store: request.store.clone(),
                group_id,
                total,
                line_count: request.items.len(),
            })
            .await
        {
            warn!(error = %e, "Failed to send sale recorded event");
        }
        if let Some((debt_id, total_debt)) = debt_created {
            if let Err(e) = self
                .event_sender
                .send(Event::DebtCreated {
                    store: request.store,
                    debt_id,
                    total_debt,
                })
                .await
            {
                warn!(error = %e, "Failed to send debt created event");
            }
        }

        Ok(group_id)
    }

    /// Reverses part of a prior purchase: goods leave the warehouse back
    /// to the supplier. `refund` credits the account the supplier repaid
    /// into, `replacement` has no money effect, `credit_note` offsets
    /// the supplier's open payable debt.
    #[instrument(skip(self, request), fields(store = %request.store, items = request.items.len()))]
    pub async fn record_purchase_return(
        &self,
        request: RecordPurchaseReturnRequest,
    ) -> Result<Uuid, ServiceError> {
        validate_items(&request.items)?;
        if request.reason.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "Return reason is required".to_string(),
            ));
        }

        let db = &*self.db_pool;
        let txn = db.begin().await?;

        let supplier = find_supplier(&txn, &request.store, request.supplier_id).await?;
        stock::find_warehouse(&txn, &request.store, request.warehouse_id).await?;

        let total = batch_total(&request.items);

        for item in &request.items {
            find_product(&txn, &request.store, item.product_id).await?;
            stock::apply_stock_delta(
                &txn,
                &request.store,
                item.product_id,
                request.warehouse_id,
                -item.quantity,
            )
            .await?;
        }

        match request.return_type {
            ReturnType::Refund => {
                if let Some(account_id) = request.account_id {
                    let account = accounts::find_account(&txn, &request.store, account_id).await?;
                    accounts::post_to_account(
                        &txn,
                        &account,
                        total,
                        EntryKind::RefundIn,
                        Some(format!("Purchase return refund from {}", supplier.name)),
                        request.date,
                        request.created_by.clone(),
                        false,
                    )
                    .await?;
                }
            }
            ReturnType::Replacement => {}
            ReturnType::CreditNote => {
                debts::apply_credit_note(
                    &txn,
                    &request.store,
                    DebtDirection::Payable,
                    Some(request.supplier_id),
                    None,
                    total,
                )
                .await?;
            }
        }

        let return_id = self
            .insert_return(
                &txn,
                &request.store,
                ReturnKind::Purchase,
                request.return_type,
                &request.reason,
                request.description.clone(),
                request.warehouse_id,
                Some(request.supplier_id),
                None,
                request.account_id,
                total,
                request.invoice_number.clone(),
                request.date,
                request.created_by.clone(),
                &request.items,
            )
            .await?;

        txn.commit().await?;

        info!(return_id = %return_id, total = %total, "Purchase return recorded");

        self.emit_return_event(&request.store, return_id, ReturnKind::Purchase, request.return_type, total)
            .await;

        Ok(return_id)
    }

    /// Reverses part of a prior sale: goods come back into the
    /// warehouse. `refund` debits the paying account (never below
    /// zero), `replacement` has no money effect, `credit_note` offsets
    /// the customer's open receivable debt.
    #[instrument(skip(self, request), fields(store = %request.store, items = request.items.len()))]
    pub async fn record_sale_return(
        &self,
        request: RecordSaleReturnRequest,
    ) -> Result<Uuid, ServiceError> {
        validate_items(&request.items)?;
        if request.reason.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "Return reason is required".to_string(),
            ));
        }
        if request.return_type == ReturnType::CreditNote && request.customer_name.is_none() {
            return Err(ServiceError::ValidationError(
                "Customer name is required for a credit-note sale return".to_string(),
            ));
        }

        let db = &*self.db_pool;
        let txn = db.begin().await?;

        stock::find_warehouse(&txn, &request.store, request.warehouse_id).await?;

        let total = batch_total(&request.items);

        for item in &request.items {
            find_product(&txn, &request.store, item.product_id).await?;
            stock::apply_stock_delta(
                &txn,
                &request.store,
                item.product_id,
                request.warehouse_id,
                item.quantity,
            )
            .await?;
        }

        match request.return_type {
            ReturnType::Refund => {
                if let Some(account_id) = request.account_id {
                    let account = accounts::find_account(&txn, &request.store, account_id).await?;
                    accounts::post_to_account(
                        &txn,
                        &account,
                        -total,
                        EntryKind::RefundOut,
                        Some(match &request.customer_name {
                            Some(name) => format!("Sale return refund to {}", name),
                            None => "Sale return refund".to_string(),
                        }),
                        request.date,
                        request.created_by.clone(),
                        false,
                    )
                    .await?;
                }
            }
            ReturnType::Replacement => {}
            ReturnType::CreditNote => {
                debts::apply_credit_note(
                    &txn,
                    &request.store,
                    DebtDirection::Receivable,
                    None,
                    request.customer_name.as_deref(),
                    total,
                )
                .await?;
            }
        }

        let return_id = self
            .insert_return(
                &txn,
                &request.store,
                ReturnKind::Sale,
                request.return_type,
                &request.reason,
                request.description.clone(),
                request.warehouse_id,
                None,
                request.customer_name.clone(),
                request.account_id,
                total,
                None,
                request.date,
                request.created_by.clone(),
                &request.items,
            )
            .await?;

        txn.commit().await?;

        info!(return_id = %return_id, total = %total, "Sale return recorded");

        self.emit_return_event(&request.store, return_id, ReturnKind::Sale, request.return_type, total)
            .await;

        Ok(return_id)
    }

    /// Manual stock correction with a mandatory reason. Produces an
    /// audit row; has no money effect. A reduction past the current
    /// quantity is rejected.
    #[instrument(skip(self, request), fields(store = %request.store, product_id = %request.product_id))]
    pub async fn record_stock_adjustment(
        &self,
        request: RecordStockAdjustmentRequest,
    ) -> Result<Uuid, ServiceError> {
        if request.quantity <= 0 {
            return Err(ServiceError::ValidationError(
                "Adjustment quantity must be positive".to_string(),
            ));
        }
        if request.reason.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "Adjustment reason is required".to_string(),
            ));
        }

        let db = &*self.db_pool;
        let txn = db.begin().await?;

        find_product(&txn, &request.store, request.product_id).await?;
        stock::find_warehouse(&txn, &request.store, request.warehouse_id).await?;

        let delta = match request.direction {
            AdjustmentDirection::Add => request.quantity,
            AdjustmentDirection::Reduce => -request.quantity,
        };

        let new_quantity = stock::apply_stock_delta(
            &txn,
            &request.store,
            request.product_id,
            request.warehouse_id,
            delta,
        )
        .await?;

        let audit = stock_adjustment::ActiveModel {
            id: Set(Uuid::new_v4()),
            store: Set(request.store.clone()),
            product_id: Set(request.product_id),
            warehouse_id: Set(request.warehouse_id),
            direction: Set(request.direction.as_str().to_string()),
            quantity: Set(request.quantity),
            reason: Set(request.reason.trim().to_string()),
            adjusted_at: Set(request.date),
            created_by: Set(request.created_by.clone()),
            created_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(adjustment_id = %audit.id, new_quantity, "Stock adjustment recorded");

        if let Err(e) = self
            .event_sender
            .send(Event::StockAdjusted {
                store: request.store,
                product_id: request.product_id,
                warehouse_id: request.warehouse_id,
                new_quantity,
            })
            .await
        {
            warn!(error = %e, "Failed to send stock adjusted event");
        }

        Ok(audit.id)
    }

    /// Records an operational expense: the account debit (when an
    /// account is given) and the expense row commit as one unit.
    #[instrument(skip(self, request), fields(store = %request.store, expense_type = %request.expense_type))]
    pub async fn record_expense(&self, request: RecordExpenseRequest) -> Result<Uuid, ServiceError> {
        let expense_type = request.expense_type.trim().to_lowercase();
        if expense_type.is_empty() {
            return Err(ServiceError::ValidationError(
                "Expense type is required".to_string(),
            ));
        }
        if request.amount <= Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Expense amount must be positive".to_string(),
            ));
        }

        let db = &*self.db_pool;
        let txn = db.begin().await?;

        if let Some(account_id) = request.account_id {
            let account = accounts::find_account(&txn, &request.store, account_id).await?;
            accounts::post_to_account(
                &txn,
                &account,
                -request.amount,
                EntryKind::Expense,
                Some(
                    request
                        .description
                        .clone()
                        .unwrap_or_else(|| expense_type.clone()),
                ),
                request.date,
                request.created_by.clone(),
                false,
            )
            .await?;
        }

        let expense = operational_expense::ActiveModel {
            id: Set(Uuid::new_v4()),
            store: Set(request.store.clone()),
            expense_type: Set(expense_type.clone()),
            amount: Set(request.amount),
            description: Set(request.description.clone()),
            account_id: Set(request.account_id),
            reference_id: Set(request.reference_id),
            expense_date: Set(request.date),
            created_by: Set(request.created_by.clone()),
            created_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(expense_id = %expense.id, amount = %request.amount, "Expense recorded");

        if let Err(e) = self
            .event_sender
            .send(Event::ExpenseRecorded {
                store: request.store,
                expense_id: expense.id,
                expense_type,
                amount: request.amount,
            })
            .await
        {
            warn!(error = %e, "Failed to send expense recorded event");
        }

        Ok(expense.id)
    }

    /// Pays a salary: records a `salary` expense (atomic), then writes
    /// the denormalised payroll row. The payroll write is intentionally
    /// outside the expense transaction; a failure there leaves the
    /// expense standing and is surfaced to the caller.
    #[instrument(skip(self, request), fields(store = %request.store, staff = %request.staff_name))]
    pub async fn record_salary_payment(
        &self,
        request: RecordSalaryPaymentRequest,
    ) -> Result<Uuid, ServiceError> {
        if request.staff_name.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "Staff name is required".to_string(),
            ));
        }

        let expense_id = self
            .record_expense(RecordExpenseRequest {
                store: request.store.clone(),
                expense_type: "salary".to_string(),
                amount: request.amount,
                description: Some(format!(
                    "Salary {} for {}",
                    request.staff_name, request.period
                )),
                account_id: request.account_id,
                reference_id: None,
                date: request.date,
                created_by: request.created_by.clone(),
            })
            .await?;

        let db = &*self.db_pool;
        let payroll = salary_payment::ActiveModel {
            id: Set(Uuid::new_v4()),
            store: Set(request.store.clone()),
            staff_name: Set(request.staff_name.trim().to_string()),
            period: Set(request.period),
            amount: Set(request.amount),
            expense_id: Set(expense_id),
            note: Set(request.note.clone()),
            paid_at: Set(request.date),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await;

        if let Err(e) = payroll {
            error!(error = %e, expense_id = %expense_id, "Salary expense committed but payroll row failed");
            return Err(e.into());
        }

        Ok(expense_id)
    }

    #[allow(clippy::too_many_arguments)]
    async fn insert_return<C: ConnectionTrait>(
        &self,
        conn: &C,
        store: &str,
        kind: ReturnKind,
        return_type: ReturnType,
        reason: &str,
        description: Option<String>,
        warehouse_id: Uuid,
        supplier_id: Option<Uuid>,
        customer_name: Option<String>,
        account_id: Option<Uuid>,
        total: Decimal,
        invoice_number: Option<String>,
        return_date: DateTime<Utc>,
        created_by: Option<String>,
        items: &[TradeItem],
    ) -> Result<Uuid, ServiceError> {
        let return_id = Uuid::new_v4();

        return_record::ActiveModel {
            id: Set(return_id),
            store: Set(store.to_string()),
            kind: Set(kind.to_string()),
            return_type: Set(return_type.to_string()),
            reason: Set(reason.trim().to_string()),
            description: Set(description),
            warehouse_id: Set(warehouse_id),
            supplier_id: Set(supplier_id),
            customer_name: Set(customer_name),
            account_id: Set(account_id),
            total: Set(total),
            invoice_number: Set(invoice_number),
            return_date: Set(return_date),
            created_by: Set(created_by),
            created_at: Set(Utc::now()),
        }
        .insert(conn)
        .await?;

        for item in items {
            return_line::ActiveModel {
                id: Set(Uuid::new_v4()),
                return_id: Set(return_id),
                product_id: Set(item.product_id),
                quantity: Set(item.quantity),
                unit_price: Set(item.unit_price),
                subtotal: Set(item.unit_price * Decimal::from(item.quantity)),
            }
            .insert(conn)
            .await?;
        }

        Ok(return_id)
    }

    async fn emit_return_event(
        &self,
        store: &str,
        return_id: Uuid,
        kind: ReturnKind,
        return_type: ReturnType,
        total: Decimal,
    ) {
        if let Err(e) = self
            .event_sender
            .send(Event::ReturnRecorded {
                store: store.to_string(),
                return_id,
                kind: kind.to_string(),
                return_type: return_type.to_string(),
                total,
            })
            .await
        {
            warn!(error = %e, "Failed to send return recorded event");
        }
    }
}
