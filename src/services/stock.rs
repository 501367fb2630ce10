use crate::{
    db::DbPool,
    entities::{
        stock_level::{self, Entity as StockLevel},
        warehouse::{self, Entity as Warehouse},
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Stock quantity of one product in one warehouse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseStock {
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub warehouse_name: String,
    pub quantity: i64,
}

/// Applies a signed quantity delta to the (store, product, warehouse)
/// stock row, creating it lazily on first use.
///
/// Decrements run as a single conditional UPDATE guarded by
/// `quantity >= -delta`, so two concurrent sales can never both pass a
/// stock check against stale data: the second one simply affects zero
/// rows and fails with `InsufficientStock`.
///
/// Returns the quantity after the change.
pub(crate) async fn apply_stock_delta<C: ConnectionTrait>(
    conn: &C,
    store: &str,
    product_id: Uuid,
    warehouse_id: Uuid,
    delta: i64,
) -> Result<i64, ServiceError> {
    let existing = StockLevel::find()
        .filter(stock_level::Column::Store.eq(store))
        .filter(stock_level::Column::ProductId.eq(product_id))
        .filter(stock_level::Column::WarehouseId.eq(warehouse_id))
        .one(conn)
        .await?;

    let Some(row) = existing else {
        if delta < 0 {
            return Err(ServiceError::InsufficientStock {
                product_id,
                warehouse_id,
                available: 0,
                requested: -delta,
            });
        }
        let now = Utc::now();
        let created = stock_level::ActiveModel {
            id: Set(Uuid::new_v4()),
            store: Set(store.to_string()),
            product_id: Set(product_id),
            warehouse_id: Set(warehouse_id),
            quantity: Set(delta),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(conn)
        .await?;
        return Ok(created.quantity);
    };

    let mut update = StockLevel::update_many()
        .col_expr(
            stock_level::Column::Quantity,
            Expr::col(stock_level::Column::Quantity).add(Expr::val(delta)),
        )
        .col_expr(stock_level::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(stock_level::Column::Id.eq(row.id));

    if delta < 0 {
        update = update.filter(stock_level::Column::Quantity.gte(-delta));
    }

    let result = update.exec(conn).await?;

    if result.rows_affected == 0 {
        // The guard lost against a concurrent decrement; report the
        // quantity as it stands now.
        let available = StockLevel::find_by_id(row.id)
            .one(conn)
            .await?
            .map(|r| r.quantity)
            .unwrap_or(0);
        return Err(ServiceError::InsufficientStock {
            product_id,
            warehouse_id,
            available,
            requested: -delta,
        });
    }

    let updated = StockLevel::find_by_id(row.id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Stock row {} disappeared", row.id)))?;

    Ok(updated.quantity)
}

/// Verifies the warehouse exists and belongs to the store.
pub(crate) async fn find_warehouse<C: ConnectionTrait>(
    conn: &C,
    store: &str,
    warehouse_id: Uuid,
) -> Result<warehouse::Model, ServiceError> {
    Warehouse::find_by_id(warehouse_id)
        .filter(warehouse::Column::Store.eq(store))
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Warehouse {} not found", warehouse_id)))
}

/// Service for stock quantities across warehouses.
#[derive(Clone)]
pub struct StockService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl StockService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Applies a signed delta to one stock row as its own transaction.
    /// Fails with `InsufficientStock` when the delta would take the
    /// quantity below zero.
    #[instrument(skip(self), fields(store = %store, product_id = %product_id))]
    pub async fn adjust_stock(
        &self,
        store: &str,
        product_id: Uuid,
        warehouse_id: Uuid,
        delta: i64,
    ) -> Result<i64, ServiceError> {
        if delta == 0 {
            return Err(ServiceError::ValidationError(
                "Stock delta must be non-zero".to_string(),
            ));
        }

        let db = &*self.db_pool;
        let txn = db.begin().await?;

        find_warehouse(&txn, store, warehouse_id).await?;
        let new_quantity = apply_stock_delta(&txn, store, product_id, warehouse_id, delta).await?;

        txn.commit().await?;

        info!(new_quantity, "Stock adjusted");

        if let Err(e) = self
            .event_sender
            .send(Event::StockAdjusted {
                store: store.to_string(),
                product_id,
                warehouse_id,
                new_quantity,
            })
            .await
        {
            warn!(error = %e, "Failed to send stock adjusted event");
        }

        Ok(new_quantity)
    }

    /// Moves `quantity` units between two warehouses of the same store
    /// as one atomic unit. A partial move is never observable: the
    /// debit and credit either both commit or both roll back.
    #[instrument(skip(self), fields(store = %store, product_id = %product_id))]
    pub async fn migrate_stock(
        &self,
        store: &str,
        product_id: Uuid,
        source_warehouse_id: Uuid,
        target_warehouse_id: Uuid,
        quantity: i64,
    ) -> Result<(), ServiceError> {
        if quantity <= 0 {
            return Err(ServiceError::ValidationError(
                "Migration quantity must be positive".to_string(),
            ));
        }
        if source_warehouse_id == target_warehouse_id {
            return Err(ServiceError::ValidationError(
                "Source and target warehouse must differ".to_string(),
            ));
        }

        let db = &*self.db_pool;
        let txn = db.begin().await?;

        find_warehouse(&txn, store, source_warehouse_id).await?;
        find_warehouse(&txn, store, target_warehouse_id).await?;

        apply_stock_delta(&txn, store, product_id, source_warehouse_id, -quantity).await?;
        apply_stock_delta(&txn, store, product_id, target_warehouse_id, quantity).await?;

        txn.commit().await?;

        info!(quantity, "Stock migrated between warehouses");

        if let Err(e) = self
            .event_sender
            .send(Event::StockMigrated {
                store: store.to_string(),
                product_id,
                source_warehouse_id,
                target_warehouse_id,
                quantity,
            })
            .await
        {
            warn!(error = %e, "Failed to send stock migrated event");
        }

        Ok(())
    }

    /// Per-warehouse stock rows for a store, optionally restricted to
    /// one product. Served straight from the ledger.
    #[instrument(skip(self), fields(store = %store))]
    pub async fn stock_summary(
        &self,
        store: &str,
        product_id: Option<Uuid>,
    ) -> Result<Vec<WarehouseStock>, ServiceError> {
        let db = &*self.db_pool;

        let mut query = StockLevel::find()
            .filter(stock_level::Column::Store.eq(store))
            .find_also_related(Warehouse)
            .order_by_asc(stock_level::Column::WarehouseId);

        if let Some(product_id) = product_id {
            query = query.filter(stock_level::Column::ProductId.eq(product_id));
        }

        let rows = query.all(db).await?;

        Ok(rows
            .into_iter()
            .map(|(level, wh)| WarehouseStock {
                product_id: level.product_id,
                warehouse_id: level.warehouse_id,
                warehouse_name: wh.map(|w| w.name).unwrap_or_default(),
                quantity: level.quantity,
            })
            .collect())
    }

    /// Current quantity for one (product, warehouse) pair; zero when the
    /// row has not been created yet.
    pub async fn quantity_of(
        &self,
        store: &str,
        product_id: Uuid,
        warehouse_id: Uuid,
    ) -> Result<i64, ServiceError> {
        let db = &*self.db_pool;

        let quantity = StockLevel::find()
            .filter(stock_level::Column::Store.eq(store))
            .filter(stock_level::Column::ProductId.eq(product_id))
            .filter(stock_level::Column::WarehouseId.eq(warehouse_id))
            .one(db)
            .await?
            .map(|r| r.quantity)
            .unwrap_or(0);

        Ok(quantity)
    }
}
