#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};
use tokio::sync::mpsc;
use uuid::Uuid;

use storeledger_api::{
    db::{self, DbConfig, DbPool},
    entities::{account, account::AccountKind, product, supplier, warehouse},
    events::{self, EventSender},
    handlers::AppServices,
};

/// Test harness: fresh in-memory SQLite database migrated to the current
/// schema, with the full service set wired to a live event channel.
pub struct TestApp {
    pub db: Arc<DbPool>,
    pub services: AppServices,
    event_sender: EventSender,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    pub async fn new() -> Self {
        // A single pooled connection keeps the in-memory database alive
        // and private to this test.
        let db_cfg = DbConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        };

        let pool = db::establish_connection_with_config(&db_cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db = Arc::new(pool);
        let (event_tx, event_rx) = mpsc::channel(256);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let services = AppServices::new(db.clone(), Arc::new(event_sender.clone()));

        Self {
            db,
            services,
            event_sender,
            _event_task: event_task,
        }
    }

    /// Clone of the live event sender, for wiring an `AppState`.
    #[allow(dead_code)]
    pub fn event_sender(&self) -> EventSender {
        self.event_sender.clone()
    }

    /// Fixed transaction timestamp so tests stay deterministic.
    pub fn date(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
    }

    pub async fn seed_product(&self, store: &str, name: &str) -> product::Model {
        let now = Utc::now();
        product::ActiveModel {
            id: Set(Uuid::new_v4()),
            store: Set(store.to_string()),
            name: Set(name.to_string()),
            kind: Set(Some("granite".to_string())),
            size: Set(Some("60x60".to_string())),
            color: Set(None),
            brand: Set(None),
            description: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await
        .expect("seed product")
    }

    pub async fn seed_warehouse(&self, store: &str, name: &str) -> warehouse::Model {
        warehouse::ActiveModel {
            id: Set(Uuid::new_v4()),
            store: Set(store.to_string()),
            name: Set(name.to_string()),
            created_at: Set(Utc::now()),
        }
        .insert(&*self.db)
        .await
        .expect("seed warehouse")
    }

    pub async fn seed_supplier(&self, store: &str, name: &str) -> supplier::Model {
        supplier::ActiveModel {
            id: Set(Uuid::new_v4()),
            store: Set(store.to_string()),
            name: Set(name.to_string()),
            contact: Set(None),
            address: Set(None),
            created_at: Set(Utc::now()),
        }
        .insert(&*self.db)
        .await
        .expect("seed supplier")
    }

    pub async fn seed_account(&self, store: &str, name: &str, balance: Decimal) -> account::Model {
        let now = Utc::now();
        account::ActiveModel {
            id: Set(Uuid::new_v4()),
            store: Set(store.to_string()),
            name: Set(name.to_string()),
            kind: Set(AccountKind::Cash.to_string()),
            bank_name: Set(None),
            account_number: Set(None),
            is_default: Set(false),
            balance: Set(balance),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await
        .expect("seed account")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self._event_task.abort();
    }
}
