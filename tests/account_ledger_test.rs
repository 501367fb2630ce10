mod common;

use assert_matches::assert_matches;
use common::TestApp;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use storeledger_api::{
    entities::{
        account::{self, Entity as Account},
        account_transaction::{self, Entity as AccountTransaction},
    },
    errors::ServiceError,
};

const STORE: &str = "SuryaJaya";

#[tokio::test]
async fn postings_maintain_balance_and_journal_snapshot() {
    let app = TestApp::new().await;
    let kas = app.seed_account(STORE, "Kas", Decimal::ZERO).await;

    let accounts = &app.services.accounts;
    let date = app.date();

    let first = accounts
        .adjust_balance(STORE, kas.id, dec!(500_000), "Opening capital".into(), None, date)
        .await
        .unwrap();
    assert_eq!(first.balance_after, dec!(500_000));

    let second = accounts
        .adjust_balance(STORE, kas.id, dec!(-120_000), "Owner withdrawal".into(), None, date)
        .await
        .unwrap();
    assert_eq!(second.balance_after, dec!(380_000));

    let report = accounts.reconcile(STORE, kas.id).await.unwrap();
    assert!(report.consistent);
    assert_eq!(report.balance, dec!(380_000));
    assert_eq!(report.journal_sum, dec!(380_000));
}

#[tokio::test]
async fn transfer_moves_funds_atomically() {
    let app = TestApp::new().await;
    let kas = app.seed_account(STORE, "Kas", Decimal::ZERO).await;
    let bank = app.seed_account(STORE, "BCA Operasional", Decimal::ZERO).await;

    let accounts = &app.services.accounts;
    let date = app.date();

    accounts
        .adjust_balance(STORE, kas.id, dec!(1_000_000), "Opening capital".into(), None, date)
        .await
        .unwrap();

    accounts
        .transfer_funds(
            STORE,
            kas.id,
            bank.id,
            dec!(250_000),
            "Internal transfer".into(),
            None,
            date,
        )
        .await
        .unwrap();

    let kas_now = Account::find_by_id(kas.id).one(&*app.db).await.unwrap().unwrap();
    let bank_now = Account::find_by_id(bank.id).one(&*app.db).await.unwrap().unwrap();
    assert_eq!(kas_now.balance, dec!(750_000));
    assert_eq!(bank_now.balance, dec!(250_000));

    // Both legs landed in their journals with the new running balances.
    assert!(accounts.reconcile(STORE, kas.id).await.unwrap().consistent);
    assert!(accounts.reconcile(STORE, bank.id).await.unwrap().consistent);
}

#[tokio::test]
async fn overdrawing_transfer_is_rejected_with_no_side_effects() {
    let app = TestApp::new().await;
    let kas = app.seed_account(STORE, "Kas", Decimal::ZERO).await;
    let bank = app.seed_account(STORE, "BCA Operasional", Decimal::ZERO).await;

    let accounts = &app.services.accounts;
    let date = app.date();

    accounts
        .adjust_balance(STORE, kas.id, dec!(100_000), "Opening capital".into(), None, date)
        .await
        .unwrap();

    let err = accounts
        .transfer_funds(
            STORE,
            kas.id,
            bank.id,
            dec!(150_000),
            "Too much".into(),
            None,
            date,
        )
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ServiceError::InsufficientFunds {
            balance,
            requested,
            ..
        } if balance == dec!(100_000) && requested == dec!(150_000)
    );

    let kas_now = Account::find_by_id(kas.id).one(&*app.db).await.unwrap().unwrap();
    let bank_now = Account::find_by_id(bank.id).one(&*app.db).await.unwrap().unwrap();
    assert_eq!(kas_now.balance, dec!(100_000));
    assert_eq!(bank_now.balance, Decimal::ZERO);

    // No transfer legs were journalled.
    let legs = AccountTransaction::find()
        .filter(account_transaction::Column::AccountId.is_in([kas.id, bank.id]))
        .filter(account_transaction::Column::Kind.is_in(["transfer_in", "transfer_out"]))
        .all(&*app.db)
        .await
        .unwrap();
    assert!(legs.is_empty());
}

#[tokio::test]
async fn transfer_validation_rejects_bad_shapes() {
    let app = TestApp::new().await;
    let kas = app.seed_account(STORE, "Kas", dec!(100)).await;
    let bank = app.seed_account(STORE, "BCA", dec!(100)).await;

    let accounts = &app.services.accounts;
    let date = app.date();

    assert_matches!(
        accounts
            .transfer_funds(STORE, kas.id, bank.id, dec!(0), "x".into(), None, date)
            .await
            .unwrap_err(),
        ServiceError::ValidationError(_)
    );
    assert_matches!(
        accounts
            .transfer_funds(STORE, kas.id, kas.id, dec!(10), "x".into(), None, date)
            .await
            .unwrap_err(),
        ServiceError::ValidationError(_)
    );
}

#[tokio::test]
async fn history_is_store_scoped_and_ordered() {
    let app = TestApp::new().await;
    let kas = app.seed_account(STORE, "Kas", Decimal::ZERO).await;

    let accounts = &app.services.accounts;
    let early = app.date();
    let late = early + chrono::Duration::hours(2);

    accounts
        .adjust_balance(STORE, kas.id, dec!(100), "first".into(), None, early)
        .await
        .unwrap();
    accounts
        .adjust_balance(STORE, kas.id, dec!(200), "second".into(), None, late)
        .await
        .unwrap();

    let history = accounts.account_history(STORE, kas.id, None, None).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].description.as_deref(), Some("second"));

    let bounded = accounts
        .account_history(STORE, kas.id, None, Some(late))
        .await
        .unwrap();
    assert_eq!(bounded.len(), 1);
    assert_eq!(bounded[0].description.as_deref(), Some("first"));

    // Another store cannot read this account.
    let err = accounts
        .account_history("OtherStore", kas.id, None, None)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
}

#[tokio::test]
async fn reconcile_flags_a_drifted_projection() {
    let app = TestApp::new().await;
    let kas = app.seed_account(STORE, "Kas", Decimal::ZERO).await;

    app.services
        .accounts
        .adjust_balance(STORE, kas.id, dec!(300), "fund".into(), None, app.date())
        .await
        .unwrap();

    // Corrupt the cached balance behind the ledger's back.
    let model = Account::find_by_id(kas.id).one(&*app.db).await.unwrap().unwrap();
    let mut active: account::ActiveModel = model.into();
    active.balance = Set(dec!(999));
    active.update(&*app.db).await.unwrap();

    let report = app.services.accounts.reconcile(STORE, kas.id).await.unwrap();
    assert!(!report.consistent);
    assert_eq!(report.journal_sum, dec!(300));
    assert_eq!(report.balance, dec!(999));
}
