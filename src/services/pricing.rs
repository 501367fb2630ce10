use crate::{
    db::DbPool,
    entities::{
        product::{self, Entity as Product},
        purchase_line::{self, Entity as PurchaseLine},
        stock_level::{self, Entity as StockLevel},
        warehouse::Entity as Warehouse,
    },
    errors::ServiceError,
    services::stock::WarehouseStock,
};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Purchase-side summary of one product: its average acquisition price
/// and where its stock sits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPurchaseInfo {
    pub product_id: Uuid,
    pub average_price: Decimal,
    pub warehouse_stock: Vec<WarehouseStock>,
}

/// Read-only pricing queries over the purchase history. Never mutates
/// state.
#[derive(Clone)]
pub struct PricingService {
    db_pool: Arc<DbPool>,
}

impl PricingService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Arithmetic mean of the unit prices across all purchase lines for
    /// the product: each purchase event contributes its unit price once,
    /// regardless of quantity. Returns zero with no purchase history.
    #[instrument(skip(self), fields(store = %store, product_id = %product_id))]
    pub async fn average_acquisition_price(
        &self,
        store: &str,
        product_id: Uuid,
    ) -> Result<Decimal, ServiceError> {
        let db = &*self.db_pool;

        let lines = PurchaseLine::find()
            .filter(purchase_line::Column::Store.eq(store))
            .filter(purchase_line::Column::ProductId.eq(product_id))
            .all(db)
            .await?;

        if lines.is_empty() {
            return Ok(Decimal::ZERO);
        }

        let sum: Decimal = lines.iter().map(|l| l.unit_price).sum();
        Ok(sum / Decimal::from(lines.len() as i64))
    }

    /// Average price plus the per-warehouse stock distribution, as the
    /// purchase and sale forms display it.
    #[instrument(skip(self), fields(store = %store, product_id = %product_id))]
    pub async fn product_purchase_info(
        &self,
        store: &str,
        product_id: Uuid,
    ) -> Result<ProductPurchaseInfo, ServiceError> {
        let db = &*self.db_pool;

        Product::find_by_id(product_id)
            .filter(product::Column::Store.eq(store))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", product_id)))?;

        let average_price = self.average_acquisition_price(store, product_id).await?;

        let rows = StockLevel::find()
            .filter(stock_level::Column::Store.eq(store))
            .filter(stock_level::Column::ProductId.eq(product_id))
            .find_also_related(Warehouse)
            .order_by_asc(stock_level::Column::WarehouseId)
            .all(db)
            .await?;

        let warehouse_stock = rows
            .into_iter()
            .map(|(level, wh)| WarehouseStock {
                product_id: level.product_id,
                warehouse_id: level.warehouse_id,
                warehouse_name: wh.map(|w| w.name).unwrap_or_default(),
                quantity: level.quantity,
            })
            .collect();

        Ok(ProductPurchaseInfo {
            product_id,
            average_price,
            warehouse_stock,
        })
    }
}
