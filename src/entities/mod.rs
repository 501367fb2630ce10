//! Database entities for the ledger core.
//!
//! Every table is scoped by a `store` column (the tenant boundary).
//! Monetary columns are `Decimal(19, 4)`; stock quantities are integers.

pub mod account;
pub mod account_transaction;
pub mod debt;
pub mod operational_expense;
pub mod payment_history;
pub mod product;
pub mod purchase_line;
pub mod return_line;
pub mod return_record;
pub mod salary_payment;
pub mod sale_line;
pub mod stock_adjustment;
pub mod stock_level;
pub mod supplier;
pub mod warehouse;
