use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a manual stock correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentDirection {
    Add,
    Reduce,
}

impl AdjustmentDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentDirection::Add => "add",
            AdjustmentDirection::Reduce => "reduce",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "add" => Some(AdjustmentDirection::Add),
            "reduce" => Some(AdjustmentDirection::Reduce),
            _ => None,
        }
    }
}

/// Audit row for a manual stock correction. Carries a mandatory reason;
/// has no money effect.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_adjustments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub store: String,
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub direction: String,
    pub quantity: i64,
    pub reason: String,
    pub adjusted_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_string_mapping() {
        assert_eq!(AdjustmentDirection::Add.as_str(), "add");
        assert_eq!(
            AdjustmentDirection::from_str("reduce"),
            Some(AdjustmentDirection::Reduce)
        );
        assert_eq!(AdjustmentDirection::from_str("remove"), None);
    }
}
