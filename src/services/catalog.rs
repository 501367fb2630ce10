use crate::{
    db::DbPool,
    entities::{
        account::{self, AccountKind, Entity as Account},
        product::{self, Entity as Product},
        stock_level::{self, Entity as StockLevel},
        supplier::{self, Entity as Supplier},
        warehouse::{self, Entity as Warehouse},
    },
    errors::ServiceError,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

const DEFAULT_CASH_ACCOUNT_NAME: &str = "Cash on Hand";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterProductRequest {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,
    pub kind: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterSupplierRequest {
    #[validate(length(min = 1, message = "Supplier name is required"))]
    pub name: String,
    pub contact: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterAccountRequest {
    #[validate(length(min = 1, message = "Account name is required"))]
    pub name: String,
    pub kind: AccountKind,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
}

/// Registration and lookup of the entities the ledgers reference:
/// products, warehouses, suppliers and accounts.
#[derive(Clone)]
pub struct CatalogService {
    db_pool: Arc<DbPool>,
}

impl CatalogService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, request), fields(store = %store, name = %request.name))]
    pub async fn register_product(
        &self,
        store: &str,
        request: RegisterProductRequest,
    ) -> Result<product::Model, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let now = Utc::now();

        let created = product::ActiveModel {
            id: Set(Uuid::new_v4()),
            store: Set(store.to_string()),
            name: Set(request.name),
            kind: Set(request.kind),
            size: Set(request.size),
            color: Set(request.color),
            brand: Set(request.brand),
            description: Set(request.description),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await?;

        info!(product_id = %created.id, "Product registered");

        Ok(created)
    }

    /// Updates a product's display attributes. Products are never
    /// deleted; historical transactions keep referencing them.
    #[instrument(skip(self, request), fields(store = %store, product_id = %product_id))]
    pub async fn update_product(
        &self,
        store: &str,
        product_id: Uuid,
        request: RegisterProductRequest,
    ) -> Result<product::Model, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;

        let existing = Product::find_by_id(product_id)
            .filter(product::Column::Store.eq(store))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", product_id)))?;

        let mut active: product::ActiveModel = existing.into();
        active.name = Set(request.name);
        active.kind = Set(request.kind);
        active.size = Set(request.size);
        active.color = Set(request.color);
        active.brand = Set(request.brand);
        active.description = Set(request.description);
        active.updated_at = Set(Utc::now());

        Ok(active.update(db).await?)
    }

    pub async fn list_products(&self, store: &str) -> Result<Vec<product::Model>, ServiceError> {
        let db = &*self.db_pool;
        Ok(Product::find()
            .filter(product::Column::Store.eq(store))
            .order_by_asc(product::Column::Name)
            .all(db)
            .await?)
    }

    #[instrument(skip(self), fields(store = %store, name = %name))]
    pub async fn register_warehouse(
        &self,
        store: &str,
        name: &str,
    ) -> Result<warehouse::Model, ServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::ValidationError(
                "Warehouse name is required".to_string(),
            ));
        }

        let db = &*self.db_pool;

        let clash = Warehouse::find()
            .filter(warehouse::Column::Store.eq(store))
            .filter(warehouse::Column::Name.eq(name))
            .one(db)
            .await?;
        if clash.is_some() {
            return Err(ServiceError::DuplicateEntity {
                entity: "Warehouse",
                name: name.to_string(),
            });
        }

        let created = warehouse::ActiveModel {
            id: Set(Uuid::new_v4()),
            store: Set(store.to_string()),
            name: Set(name.to_string()),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await?;

        info!(warehouse_id = %created.id, "Warehouse registered");

        Ok(created)
    }

    /// Deletes a warehouse only when it holds no stock. Callers migrate
    /// remaining stock first; stock records are never silently
    /// discarded.
    #[instrument(skip(self), fields(store = %store, warehouse_id = %warehouse_id))]
    pub async fn delete_warehouse(
        &self,
        store: &str,
        warehouse_id: Uuid,
    ) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let txn = db.begin().await?;

        let wh = Warehouse::find_by_id(warehouse_id)
            .filter(warehouse::Column::Store.eq(store))
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Warehouse {} not found", warehouse_id))
            })?;

        let held = StockLevel::find()
            .filter(stock_level::Column::WarehouseId.eq(warehouse_id))
            .filter(stock_level::Column::Quantity.gt(0))
            .one(&txn)
            .await?;
        if held.is_some() {
            return Err(ServiceError::InvalidOperation(format!(
                "Warehouse {} still holds stock; migrate it before deleting",
                wh.name
            )));
        }

        StockLevel::delete_many()
            .filter(stock_level::Column::WarehouseId.eq(warehouse_id))
            .exec(&txn)
            .await?;
        wh.delete(&txn).await?;

        txn.commit().await?;

        info!("Warehouse deleted");

        Ok(())
    }

    pub async fn list_warehouses(&self, store: &str) -> Result<Vec<warehouse::Model>, ServiceError> {
        let db = &*self.db_pool;
        Ok(Warehouse::find()
            .filter(warehouse::Column::Store.eq(store))
            .order_by_asc(warehouse::Column::Name)
            .all(db)
            .await?)
    }

    #[instrument(skip(self, request), fields(store = %store, name = %request.name))]
    pub async fn register_supplier(
        &self,
        store: &str,
        request: RegisterSupplierRequest,
    ) -> Result<supplier::Model, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;

        let clash = Supplier::find()
            .filter(supplier::Column::Store.eq(store))
            .filter(supplier::Column::Name.eq(request.name.as_str()))
            .one(db)
            .await?;
        if clash.is_some() {
            return Err(ServiceError::DuplicateEntity {
                entity: "Supplier",
                name: request.name,
            });
        }

        let created = supplier::ActiveModel {
            id: Set(Uuid::new_v4()),
            store: Set(store.to_string()),
            name: Set(request.name),
            contact: Set(request.contact),
            address: Set(request.address),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await?;

        info!(supplier_id = %created.id, "Supplier registered");

        Ok(created)
    }

    pub async fn list_suppliers(&self, store: &str) -> Result<Vec<supplier::Model>, ServiceError> {
        let db = &*self.db_pool;
        Ok(Supplier::find()
            .filter(supplier::Column::Store.eq(store))
            .order_by_asc(supplier::Column::Name)
            .all(db)
            .await?)
    }

    #[instrument(skip(self, request), fields(store = %store, name = %request.name))]
    pub async fn register_account(
        &self,
        store: &str,
        request: RegisterAccountRequest,
    ) -> Result<account::Model, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;

        let clash = Account::find()
            .filter(account::Column::Store.eq(store))
            .filter(account::Column::Name.eq(request.name.as_str()))
            .one(db)
            .await?;
        if clash.is_some() {
            return Err(ServiceError::DuplicateEntity {
                entity: "Account",
                name: request.name,
            });
        }

        let now = Utc::now();
        let created = account::ActiveModel {
            id: Set(Uuid::new_v4()),
            store: Set(store.to_string()),
            name: Set(request.name),
            kind: Set(request.kind.to_string()),
            bank_name: Set(request.bank_name),
            account_number: Set(request.account_number),
            is_default: Set(false),
            balance: Set(Decimal::ZERO),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await?;

        info!(account_id = %created.id, "Account registered");

        Ok(created)
    }

    /// Ensures the store has its default cash-on-hand account.
    /// Idempotent: returns the existing default when one is present.
    #[instrument(skip(self), fields(store = %store))]
    pub async fn create_default_cash_account(
        &self,
        store: &str,
    ) -> Result<account::Model, ServiceError> {
        let db = &*self.db_pool;

        if let Some(existing) = Account::find()
            .filter(account::Column::Store.eq(store))
            .filter(account::Column::IsDefault.eq(true))
            .one(db)
            .await?
        {
            return Ok(existing);
        }

        let now = Utc::now();
        let created = account::ActiveModel {
            id: Set(Uuid::new_v4()),
            store: Set(store.to_string()),
            name: Set(DEFAULT_CASH_ACCOUNT_NAME.to_string()),
            kind: Set(AccountKind::Cash.to_string()),
            bank_name: Set(None),
            account_number: Set(None),
            is_default: Set(true),
            balance: Set(Decimal::ZERO),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await?;

        info!(account_id = %created.id, "Default cash account created");

        Ok(created)
    }

    pub async fn list_accounts(&self, store: &str) -> Result<Vec<account::Model>, ServiceError> {
        let db = &*self.db_pool;
        Ok(Account::find()
            .filter(account::Column::Store.eq(store))
            .order_by_desc(account::Column::IsDefault)
            .order_by_asc(account::Column::Name)
            .all(db)
            .await?)
    }
}
