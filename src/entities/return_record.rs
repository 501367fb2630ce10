use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which side of the ledger a return reverses.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReturnKind {
    Purchase,
    Sale,
}

/// How the money side of a return settles: `refund` moves cash,
/// `replacement` has no money effect, `credit_note` offsets the
/// counterparty's open debt.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReturnType {
    Refund,
    Replacement,
    CreditNote,
}

/// Return header: one row per submitted return, lines in `return_lines`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "returns")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub store: String,
    pub kind: String,
    pub return_type: String,
    pub reason: String,
    pub description: Option<String>,
    pub warehouse_id: Uuid,
    pub supplier_id: Option<Uuid>,
    pub customer_name: Option<String>,
    pub account_id: Option<Uuid>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub total: Decimal,
    pub invoice_number: Option<String>,
    pub return_date: DateTime<Utc>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::return_line::Entity")]
    ReturnLine,
}

impl Related<super::return_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReturnLine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_type_uses_snake_case_strings() {
        assert_eq!(ReturnType::CreditNote.to_string(), "credit_note");
        assert_eq!(
            "credit_note".parse::<ReturnType>().unwrap(),
            ReturnType::CreditNote
        );
        assert_eq!(ReturnKind::Purchase.to_string(), "purchase");
    }
}
