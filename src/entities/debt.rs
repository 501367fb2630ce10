use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether the store owes (payable, to a supplier) or is owed
/// (receivable, from a customer).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DebtDirection {
    Payable,
    Receivable,
}

/// `Open` while remaining_debt > 0, `Paid` once it reaches zero.
/// `Paid` is terminal: no further payments are accepted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DebtStatus {
    Open,
    Paid,
}

/// A deferred-payment balance created by a credit-type purchase or sale.
///
/// Invariants: `remaining_debt == total_debt - paid_amount`,
/// `remaining_debt >= 0`, `paid_amount` equals the sum of the debt's
/// payment history and never decreases. Only the transaction recorder
/// mutates these fields.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "debts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub store: String,
    pub direction: String,
    pub supplier_id: Option<Uuid>,
    pub customer_name: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub total_debt: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub paid_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub remaining_debt: Decimal,
    pub status: String,
    pub due_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub group_id: Option<Uuid>,
    pub debt_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Model {
    pub fn direction(&self) -> Option<DebtDirection> {
        self.direction.parse().ok()
    }

    pub fn is_open(&self) -> bool {
        self.status == DebtStatus::Open.to_string()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id"
    )]
    Supplier,
    #[sea_orm(has_many = "super::payment_history::Entity")]
    PaymentHistory,
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Related<super::payment_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debt_enums_round_trip_through_strings() {
        assert_eq!(DebtDirection::Payable.to_string(), "payable");
        assert_eq!(
            "receivable".parse::<DebtDirection>().unwrap(),
            DebtDirection::Receivable
        );
        assert_eq!(DebtStatus::Open.to_string(), "open");
        assert_eq!("paid".parse::<DebtStatus>().unwrap(), DebtStatus::Paid);
    }
}
