use crate::{
    db::DbPool,
    entities::{
        account::{self, Entity as Account},
        account_transaction::{self, Entity as AccountTransaction, EntryKind},
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

/// Result of checking an account's journal against its cached balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub account_id: Uuid,
    pub balance: Decimal,
    pub journal_sum: Decimal,
    pub consistent: bool,
}

/// Fetches an account and verifies it belongs to the store.
pub(crate) async fn find_account<C: ConnectionTrait>(
    conn: &C,
    store: &str,
    account_id: Uuid,
) -> Result<account::Model, ServiceError> {
    Account::find_by_id(account_id)
        .filter(account::Column::Store.eq(store))
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Account {} not found", account_id)))
}

/// Posts one signed amount to an account: updates the cached balance and
/// appends the journal entry with its `balance_after` snapshot, all on
/// the caller's connection (normally a transaction).
///
/// Debits are guarded by `balance >= -amount` in the UPDATE itself
/// unless `allow_negative` is set (manual owner adjustments only), so a
/// concurrent debit cannot overdraw the account past the check.
pub(crate) async fn post_to_account<C: ConnectionTrait>(
    conn: &C,
    account: &account::Model,
    amount: Decimal,
    kind: EntryKind,
    description: Option<String>,
    transaction_date: DateTime<Utc>,
    created_by: Option<String>,
    allow_negative: bool,
) -> Result<account_transaction::Model, ServiceError> {
    let mut update = Account::update_many()
        .col_expr(
            account::Column::Balance,
            Expr::col(account::Column::Balance).add(Expr::val(amount)),
        )
        .col_expr(account::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(account::Column::Id.eq(account.id));

    if amount < Decimal::ZERO && !allow_negative {
        update = update.filter(account::Column::Balance.gte(-amount));
    }

    let result = update.exec(conn).await?;

    if result.rows_affected == 0 {
        let balance = Account::find_by_id(account.id)
            .one(conn)
            .await?
            .map(|a| a.balance)
            .unwrap_or(Decimal::ZERO);
        return Err(ServiceError::InsufficientFunds {
            account_id: account.id,
            balance,
            requested: -amount,
        });
    }

    // The row lock from the UPDATE holds until commit, so this read
    // observes exactly the balance our posting produced.
    let balance_after = Account::find_by_id(account.id)
        .one(conn)
        .await?
        .map(|a| a.balance)
        .ok_or_else(|| ServiceError::NotFound(format!("Account {} disappeared", account.id)))?;

    let entry = account_transaction::ActiveModel {
        id: Set(Uuid::new_v4()),
        account_id: Set(account.id),
        amount: Set(amount),
        description: Set(description),
        kind: Set(kind.as_str().to_string()),
        transaction_date: Set(transaction_date),
        balance_after: Set(balance_after),
        created_by: Set(created_by),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    Ok(entry)
}

/// Service for cash/bank balances and their journals.
#[derive(Clone)]
pub struct AccountService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl AccountService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Manual balance correction (opening capital, owner withdrawal).
    /// The only posting path that may take a balance negative.
    #[instrument(skip(self, description), fields(store = %store, account_id = %account_id))]
    pub async fn adjust_balance(
        &self,
        store: &str,
        account_id: Uuid,
        amount: Decimal,
        description: String,
        created_by: Option<String>,
        transaction_date: DateTime<Utc>,
    ) -> Result<account_transaction::Model, ServiceError> {
        if amount == Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Adjustment amount must be non-zero".to_string(),
            ));
        }

        let db = &*self.db_pool;
        let txn = db.begin().await?;

        let account = find_account(&txn, store, account_id).await?;
        let entry = post_to_account(
            &txn,
            &account,
            amount,
            EntryKind::Adjustment,
            Some(description),
            transaction_date,
            created_by,
            true,
        )
        .await?;

        txn.commit().await?;

        info!(amount = %amount, balance_after = %entry.balance_after, "Account balance adjusted");

        if let Err(e) = self
            .event_sender
            .send(Event::AccountTransactionPosted {
                account_id,
                amount,
                balance_after: entry.balance_after,
            })
            .await
        {
            warn!(error = %e, "Failed to send account transaction event");
        }

        Ok(entry)
    }

    /// Moves `amount` between two accounts of the same store as one
    /// atomic unit. The debit is checked before either posting becomes
    /// visible; cash accounts never go negative through a transfer.
    #[instrument(skip(self, description), fields(store = %store))]
    pub async fn transfer_funds(
        &self,
        store: &str,
        from_account_id: Uuid,
        to_account_id: Uuid,
        amount: Decimal,
        description: String,
        created_by: Option<String>,
        transaction_date: DateTime<Utc>,
    ) -> Result<(), ServiceError> {
        if amount <= Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Transfer amount must be positive".to_string(),
            ));
        }
        if from_account_id == to_account_id {
            return Err(ServiceError::ValidationError(
                "Source and target account must differ".to_string(),
            ));
        }

        let db = &*self.db_pool;
        let txn = db.begin().await?;

        let from_account = find_account(&txn, store, from_account_id).await?;
        let to_account = find_account(&txn, store, to_account_id).await?;

        post_to_account(
            &txn,
            &from_account,
            -amount,
            EntryKind::TransferOut,
            Some(description.clone()),
            transaction_date,
            created_by.clone(),
            false,
        )
        .await?;

        post_to_account(
            &txn,
            &to_account,
            amount,
            EntryKind::TransferIn,
            Some(description),
            transaction_date,
            created_by,
            false,
        )
        .await?;

        txn.commit().await?;

        info!(amount = %amount, "Funds transferred");

        if let Err(e) = self
            .event_sender
            .send(Event::FundsTransferred {
                from_account_id,
                to_account_id,
                amount,
            })
            .await
        {
            warn!(error = %e, "Failed to send funds transferred event");
        }

        Ok(())
    }

    /// Journal entries for an account, newest first, optionally bounded
    /// by transaction date.
    #[instrument(skip(self), fields(store = %store, account_id = %account_id))]
    pub async fn account_history(
        &self,
        store: &str,
        account_id: Uuid,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<account_transaction::Model>, ServiceError> {
        let db = &*self.db_pool;

        find_account(db, store, account_id).await?;

        let mut query = AccountTransaction::find()
            .filter(account_transaction::Column::AccountId.eq(account_id))
            .order_by_desc(account_transaction::Column::TransactionDate);

        if let Some(from) = from {
            query = query.filter(account_transaction::Column::TransactionDate.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(account_transaction::Column::TransactionDate.lt(to));
        }

        Ok(query.all(db).await?)
    }

    /// Verifies the maintained balance projection against the sum of the
    /// journal. The two must agree after every operation; this is the
    /// on-demand check.
    #[instrument(skip(self), fields(store = %store, account_id = %account_id))]
    pub async fn reconcile(
        &self,
        store: &str,
        account_id: Uuid,
    ) -> Result<ReconciliationReport, ServiceError> {
        let db = &*self.db_pool;

        let account = find_account(db, store, account_id).await?;

        let entries = AccountTransaction::find()
            .filter(account_transaction::Column::AccountId.eq(account_id))
            .all(db)
            .await?;

        let journal_sum: Decimal = entries.iter().map(|e| e.amount).sum();

        Ok(ReconciliationReport {
            account_id,
            balance: account.balance,
            journal_sum,
            consistent: journal_sum == account.balance,
        })
    }
}
