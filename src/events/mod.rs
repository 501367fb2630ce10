use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

/// Domain events emitted after a ledger mutation has committed.
///
/// Events are notifications, not part of the transaction boundary: a
/// failed send is logged by the caller and never rolls anything back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Trade events
    PurchaseRecorded {
        store: String,
        group_id: Uuid,
        total: Decimal,
        line_count: usize,
    },
    SaleRecorded {
        store: String,
        group_id: Uuid,
        total: Decimal,
        line_count: usize,
    },

    // Stock events
    StockAdjusted {
        store: String,
        product_id: Uuid,
        warehouse_id: Uuid,
        new_quantity: i64,
    },
    StockMigrated {
        store: String,
        product_id: Uuid,
        source_warehouse_id: Uuid,
        target_warehouse_id: Uuid,
        quantity: i64,
    },

    // Debt events
    DebtCreated {
        store: String,
        debt_id: Uuid,
        total_debt: Decimal,
    },
    DebtPaymentRecorded {
        debt_id: Uuid,
        payment_id: Uuid,
        amount: Decimal,
        remaining: Decimal,
    },
    DebtSettled(Uuid),

    // Account events
    AccountTransactionPosted {
        account_id: Uuid,
        amount: Decimal,
        balance_after: Decimal,
    },
    FundsTransferred {
        from_account_id: Uuid,
        to_account_id: Uuid,
        amount: Decimal,
    },

    // Return events
    ReturnRecorded {
        store: String,
        return_id: Uuid,
        kind: String,
        return_type: String,
        total: Decimal,
    },

    // Expense events
    ExpenseRecorded {
        store: String,
        expense_id: Uuid,
        expense_type: String,
        amount: Decimal,
    },

    // Generic event for custom messages
    Generic {
        message: String,
        timestamp: DateTime<Utc>,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Consumes events from the channel until all senders are dropped.
/// Currently events are logged; downstream consumers (sync, reporting)
/// hook in here.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    while let Some(event) = rx.recv().await {
        info!(?event, "Processing event");
    }
    info!("Event channel closed, stopping event processor");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_delivers_event() {
        let (tx, mut rx) = mpsc::channel(4);
        let sender = EventSender::new(tx);

        sender.send(Event::DebtSettled(Uuid::nil())).await.unwrap();

        match rx.recv().await {
            Some(Event::DebtSettled(id)) => assert_eq!(id, Uuid::nil()),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn send_fails_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sender = EventSender::new(tx);

        let result = sender.send(Event::DebtSettled(Uuid::nil())).await;
        assert!(result.is_err());
    }
}
