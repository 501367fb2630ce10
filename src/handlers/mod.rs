//! HTTP facade over the service layer. Handlers validate the request
//! shape, call the matching service operation and wrap the result; all
//! ledger semantics live in `services`.

pub mod accounts;
pub mod catalog;
pub mod debts;
pub mod returns;
pub mod stock;
pub mod transactions;

use crate::{
    db::DbPool,
    events::EventSender,
    services::{
        accounts::AccountService, catalog::CatalogService, debts::DebtService,
        pricing::PricingService, recorder::TransactionRecorder, stock::StockService,
    },
};
use serde::Deserialize;
use std::sync::Arc;

/// Aggregated services used by the HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub catalog: Arc<CatalogService>,
    pub stock: Arc<StockService>,
    pub pricing: Arc<PricingService>,
    pub accounts: Arc<AccountService>,
    pub debts: Arc<DebtService>,
    pub recorder: Arc<TransactionRecorder>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            catalog: Arc::new(CatalogService::new(db_pool.clone())),
            stock: Arc::new(StockService::new(db_pool.clone(), event_sender.clone())),
            pricing: Arc::new(PricingService::new(db_pool.clone())),
            accounts: Arc::new(AccountService::new(db_pool.clone(), event_sender.clone())),
            debts: Arc::new(DebtService::new(db_pool.clone(), event_sender.clone())),
            recorder: Arc::new(TransactionRecorder::new(db_pool, event_sender)),
        }
    }
}

/// Store scope for read queries: every listing is per tenant.
#[derive(Debug, Deserialize)]
pub struct StoreQuery {
    pub store: String,
}
