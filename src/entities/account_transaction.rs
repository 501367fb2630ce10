use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What caused a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Sale,
    Purchase,
    DebtPayment,
    Adjustment,
    TransferIn,
    TransferOut,
    Expense,
    RefundIn,
    RefundOut,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Sale => "sale",
            EntryKind::Purchase => "purchase",
            EntryKind::DebtPayment => "debt_payment",
            EntryKind::Adjustment => "adjustment",
            EntryKind::TransferIn => "transfer_in",
            EntryKind::TransferOut => "transfer_out",
            EntryKind::Expense => "expense",
            EntryKind::RefundIn => "refund_in",
            EntryKind::RefundOut => "refund_out",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sale" => Some(EntryKind::Sale),
            "purchase" => Some(EntryKind::Purchase),
            "debt_payment" => Some(EntryKind::DebtPayment),
            "adjustment" => Some(EntryKind::Adjustment),
            "transfer_in" => Some(EntryKind::TransferIn),
            "transfer_out" => Some(EntryKind::TransferOut),
            "expense" => Some(EntryKind::Expense),
            "refund_in" => Some(EntryKind::RefundIn),
            "refund_out" => Some(EntryKind::RefundOut),
            _ => None,
        }
    }
}

/// Append-only journal entry against an account. Never mutated or
/// deleted after insertion; `balance_after` snapshots the running
/// balance at insert time.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub account_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub amount: Decimal,
    pub description: Option<String>,
    pub kind: String,
    pub transaction_date: DateTime<Utc>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub balance_after: Decimal,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id"
    )]
    Account,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C: ConnectionTrait>(self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;
        if let ActiveValue::NotSet = active_model.created_at {
            active_model.created_at = Set(Utc::now());
        }
        Ok(active_model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_kind_string_mapping() {
        assert_eq!(EntryKind::DebtPayment.as_str(), "debt_payment");
        assert_eq!(EntryKind::from_str("transfer_out"), Some(EntryKind::TransferOut));
        assert_eq!(EntryKind::from_str("bogus"), None);
    }
}
