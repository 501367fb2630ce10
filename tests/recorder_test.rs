mod common;

use assert_matches::assert_matches;
use common::TestApp;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use storeledger_api::{
    entities::{
        account::Entity as Account,
        account_transaction::{self, Entity as AccountTransaction},
        debt::Entity as Debt,
        purchase_line::{self, Entity as PurchaseLine},
        sale_line::{self, Entity as SaleLine},
    },
    errors::ServiceError,
    services::recorder::{
        PaymentKind, RecordExpenseRequest, RecordPurchaseRequest, RecordSalaryPaymentRequest,
        RecordSaleMultiRequest, RecordSaleRequest, TradeItem,
    },
};

const STORE: &str = "SuryaJaya";

#[tokio::test]
async fn cash_purchase_moves_stock_and_money_together() {
    let app = TestApp::new().await;
    let product = app.seed_product(STORE, "Granit 60x60").await;
    let warehouse = app.seed_warehouse(STORE, "Gudang A").await;
    let supplier = app.seed_supplier(STORE, "S1").await;
    let kas = app.seed_account(STORE, "Kas", Decimal::ZERO).await;

    app.services
        .accounts
        .adjust_balance(STORE, kas.id, dec!(5_000_000), "Opening capital".into(), None, app.date())
        .await
        .unwrap();

    let group_id = app
        .services
        .recorder
        .record_purchase(RecordPurchaseRequest {
            store: STORE.to_string(),
            product_id: product.id,
            warehouse_id: warehouse.id,
            quantity: 40,
            unit_price: dec!(75_000),
            supplier_id: supplier.id,
            payment_kind: PaymentKind::Cash,
            account_id: Some(kas.id),
            due_date: None,
            invoice_number: Some("INV-001".to_string()),
            description: None,
            date: app.date(),
            created_by: Some("tester".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(
        app.services
            .stock
            .quantity_of(STORE, product.id, warehouse.id)
            .await
            .unwrap(),
        40
    );

    let kas_now = Account::find_by_id(kas.id).one(&*app.db).await.unwrap().unwrap();
    assert_eq!(kas_now.balance, dec!(2_000_000));

    let entry = AccountTransaction::find()
        .filter(account_transaction::Column::Kind.eq("purchase"))
        .one(&*app.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(entry.amount, dec!(-3_000_000));
    assert_eq!(entry.balance_after, dec!(2_000_000));

    let lines = PurchaseLine::find()
        .filter(purchase_line::Column::GroupId.eq(group_id))
        .all(&*app.db)
        .await
        .unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].total, dec!(3_000_000));
    assert_eq!(lines[0].invoice_number.as_deref(), Some("INV-001"));

    assert!(app.services.accounts.reconcile(STORE, kas.id).await.unwrap().consistent);
}

#[tokio::test]
async fn cash_sale_credits_account_with_exact_snapshot() {
    let app = TestApp::new().await;
    let product = app.seed_product(STORE, "Granit 60x60").await;
    let warehouse = app.seed_warehouse(STORE, "Gudang A").await;
    let kas = app.seed_account(STORE, "Kas", Decimal::ZERO).await;

    app.services
        .stock
        .adjust_stock(STORE, product.id, warehouse.id, 150)
        .await
        .unwrap();
    app.services
        .accounts
        .adjust_balance(STORE, kas.id, dec!(200_000), "Opening float".into(), None, app.date())
        .await
        .unwrap();

    app.services
        .recorder
        .record_sale(RecordSaleRequest {
            store: STORE.to_string(),
            product_id: product.id,
            warehouse_id: warehouse.id,
            quantity: 20,
            unit_price: dec!(90_000),
            customer_name: Some("Budi".to_string()),
            payment_kind: PaymentKind::Cash,
            account_id: Some(kas.id),
            due_date: None,
            invoice_number: None,
            description: None,
            date: app.date(),
            created_by: None,
        })
        .await
        .unwrap();

    assert_eq!(
        app.services
            .stock
            .quantity_of(STORE, product.id, warehouse.id)
            .await
            .unwrap(),
        130
    );

    let kas_now = Account::find_by_id(kas.id).one(&*app.db).await.unwrap().unwrap();
    assert_eq!(kas_now.balance, dec!(2_000_000));

    let sale_entries = AccountTransaction::find()
        .filter(account_transaction::Column::Kind.eq("sale"))
        .all(&*app.db)
        .await
        .unwrap();
    assert_eq!(sale_entries.len(), 1);
    assert_eq!(sale_entries[0].amount, dec!(1_800_000));
    assert_eq!(sale_entries[0].balance_after, kas_now.balance);
}

#[tokio::test]
async fn failing_item_rolls_back_the_whole_batch() {
    let app = TestApp::new().await;
    let p1 = app.seed_product(STORE, "Granit 60x60").await;
    let p2 = app.seed_product(STORE, "Keramik 40x40").await;
    let p3 = app.seed_product(STORE, "Plint 10x60").await;
    let warehouse = app.seed_warehouse(STORE, "Gudang A").await;
    let kas = app.seed_account(STORE, "Kas", dec!(500_000)).await;

    let stock = &app.services.stock;
    stock.adjust_stock(STORE, p1.id, warehouse.id, 50).await.unwrap();
    stock.adjust_stock(STORE, p2.id, warehouse.id, 50).await.unwrap();
    stock.adjust_stock(STORE, p3.id, warehouse.id, 2).await.unwrap();

    let err = app
        .services
        .recorder
        .record_sale_multi(RecordSaleMultiRequest {
            store: STORE.to_string(),
            warehouse_id: warehouse.id,
            items: vec![
                TradeItem { product_id: p1.id, quantity: 10, unit_price: dec!(10_000) },
                TradeItem { product_id: p2.id, quantity: 10, unit_price: dec!(20_000) },
                TradeItem { product_id: p3.id, quantity: 5, unit_price: dec!(30_000) },
            ],
            payment_kind: PaymentKind::Cash,
            account_id: Some(kas.id),
            due_date: None,
            customer_name: None,
            invoice_number: None,
            description: None,
            date: app.date(),
            created_by: None,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InsufficientStock { available: 2, requested: 5, .. });

    // Items 1 and 2 were inside the same transaction: untouched.
    assert_eq!(stock.quantity_of(STORE, p1.id, warehouse.id).await.unwrap(), 50);
    assert_eq!(stock.quantity_of(STORE, p2.id, warehouse.id).await.unwrap(), 50);
    assert_eq!(stock.quantity_of(STORE, p3.id, warehouse.id).await.unwrap(), 2);

    let kas_now = Account::find_by_id(kas.id).one(&*app.db).await.unwrap().unwrap();
    assert_eq!(kas_now.balance, dec!(500_000));
    assert!(SaleLine::find().all(&*app.db).await.unwrap().is_empty());
    assert!(Debt::find().all(&*app.db).await.unwrap().is_empty());
}

#[tokio::test]
async fn multi_item_credit_sale_creates_one_debt_for_the_batch() {
    let app = TestApp::new().await;
    let p1 = app.seed_product(STORE, "Granit 60x60").await;
    let p2 = app.seed_product(STORE, "Keramik 40x40").await;
    let warehouse = app.seed_warehouse(STORE, "Gudang A").await;

    let stock = &app.services.stock;
    stock.adjust_stock(STORE, p1.id, warehouse.id, 30).await.unwrap();
    stock.adjust_stock(STORE, p2.id, warehouse.id, 30).await.unwrap();

    let group_id = app
        .services
        .recorder
        .record_sale_multi(RecordSaleMultiRequest {
            store: STORE.to_string(),
            warehouse_id: warehouse.id,
            items: vec![
                TradeItem { product_id: p1.id, quantity: 5, unit_price: dec!(100_000) },
                TradeItem { product_id: p2.id, quantity: 2, unit_price: dec!(50_000) },
            ],
            payment_kind: PaymentKind::Credit,
            account_id: None,
            due_date: Some(app.date() + chrono::Duration::days(30)),
            customer_name: Some("Ibu Siti".to_string()),
            invoice_number: Some("INV-17".to_string()),
            description: None,
            date: app.date(),
            created_by: None,
        })
        .await
        .unwrap();

    let debts = Debt::find().all(&*app.db).await.unwrap();
    assert_eq!(debts.len(), 1);
    assert_eq!(debts[0].total_debt, dec!(600_000));
    assert_eq!(debts[0].group_id, Some(group_id));
    assert_eq!(debts[0].customer_name.as_deref(), Some("Ibu Siti"));
    assert!(debts[0].due_date.is_some());

    // Every line references the one debt.
    let lines = SaleLine::find()
        .filter(sale_line::Column::GroupId.eq(group_id))
        .all(&*app.db)
        .await
        .unwrap();
    assert_eq!(lines.len(), 2);
    for line in &lines {
        assert_eq!(line.debt_id, Some(debts[0].id));
        assert_eq!(line.payment_kind, "credit");
    }
}

#[tokio::test]
async fn validation_failures_touch_nothing() {
    let app = TestApp::new().await;
    let product = app.seed_product(STORE, "Granit 60x60").await;
    let warehouse = app.seed_warehouse(STORE, "Gudang A").await;
    let supplier = app.seed_supplier(STORE, "S1").await;

    let base = RecordPurchaseRequest {
        store: STORE.to_string(),
        product_id: product.id,
        warehouse_id: warehouse.id,
        quantity: 10,
        unit_price: dec!(1_000),
        supplier_id: supplier.id,
        payment_kind: PaymentKind::Cash,
        account_id: None,
        due_date: None,
        invoice_number: None,
        description: None,
        date: app.date(),
        created_by: None,
    };

    let zero_quantity = RecordPurchaseRequest { quantity: 0, ..base.clone() };
    assert_matches!(
        app.services.recorder.record_purchase(zero_quantity).await.unwrap_err(),
        ServiceError::ValidationError(_)
    );

    let negative_price = RecordPurchaseRequest { unit_price: dec!(-1), ..base.clone() };
    assert_matches!(
        app.services.recorder.record_purchase(negative_price).await.unwrap_err(),
        ServiceError::ValidationError(_)
    );

    assert_eq!(
        app.services
            .stock
            .quantity_of(STORE, product.id, warehouse.id)
            .await
            .unwrap(),
        0
    );
    assert!(PurchaseLine::find().all(&*app.db).await.unwrap().is_empty());
}

#[tokio::test]
async fn foreign_store_entities_are_invisible_and_abort_atomically() {
    let app = TestApp::new().await;
    let product = app.seed_product(STORE, "Granit 60x60").await;
    let warehouse = app.seed_warehouse(STORE, "Gudang A").await;
    let supplier = app.seed_supplier(STORE, "S1").await;
    let foreign_account = app.seed_account("OtherStore", "Kas", dec!(9_000_000)).await;

    // The stock credit happens before the account lookup fails; the
    // rollback must take it back out.
    let err = app
        .services
        .recorder
        .record_purchase(RecordPurchaseRequest {
            store: STORE.to_string(),
            product_id: product.id,
            warehouse_id: warehouse.id,
            quantity: 10,
            unit_price: dec!(1_000),
            supplier_id: supplier.id,
            payment_kind: PaymentKind::Cash,
            account_id: Some(foreign_account.id),
            due_date: None,
            invoice_number: None,
            description: None,
            date: app.date(),
            created_by: None,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));

    assert_eq!(
        app.services
            .stock
            .quantity_of(STORE, product.id, warehouse.id)
            .await
            .unwrap(),
        0
    );
    let foreign_now = Account::find_by_id(foreign_account.id)
        .one(&*app.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(foreign_now.balance, dec!(9_000_000));
}

#[tokio::test]
async fn average_acquisition_price_is_an_unweighted_mean() {
    let app = TestApp::new().await;
    let product = app.seed_product(STORE, "Granit 60x60").await;
    let warehouse = app.seed_warehouse(STORE, "Gudang A").await;
    let supplier = app.seed_supplier(STORE, "S1").await;

    assert_eq!(
        app.services
            .pricing
            .average_acquisition_price(STORE, product.id)
            .await
            .unwrap(),
        Decimal::ZERO
    );

    // One unit at 100,000 and nine units at 200,000: each purchase event
    // counts once, so the mean is 150,000 rather than 190,000.
    for (qty, price) in [(1_i64, dec!(100_000)), (9_i64, dec!(200_000))] {
        app.services
            .recorder
            .record_purchase(RecordPurchaseRequest {
                store: STORE.to_string(),
                product_id: product.id,
                warehouse_id: warehouse.id,
                quantity: qty,
                unit_price: price,
                supplier_id: supplier.id,
                payment_kind: PaymentKind::Credit,
                account_id: None,
                due_date: None,
                invoice_number: None,
                description: None,
                date: app.date(),
                created_by: None,
            })
            .await
            .unwrap();
    }

    assert_eq!(
        app.services
            .pricing
            .average_acquisition_price(STORE, product.id)
            .await
            .unwrap(),
        dec!(150_000)
    );

    let info = app
        .services
        .pricing
        .product_purchase_info(STORE, product.id)
        .await
        .unwrap();
    assert_eq!(info.average_price, dec!(150_000));
    assert_eq!(info.warehouse_stock.len(), 1);
    assert_eq!(info.warehouse_stock[0].quantity, 10);
    assert_eq!(info.warehouse_stock[0].warehouse_name, "Gudang A");
}

#[tokio::test]
async fn expense_debits_account_and_records_row_atomically() {
    let app = TestApp::new().await;
    let kas = app.seed_account(STORE, "Kas", Decimal::ZERO).await;

    app.services
        .accounts
        .adjust_balance(STORE, kas.id, dec!(400_000), "Opening".into(), None, app.date())
        .await
        .unwrap();

    app.services
        .recorder
        .record_expense(RecordExpenseRequest {
            store: STORE.to_string(),
            expense_type: "Electricity".to_string(),
            amount: dec!(150_000),
            description: Some("June bill".to_string()),
            account_id: Some(kas.id),
            reference_id: None,
            date: app.date(),
            created_by: Some("admin".to_string()),
        })
        .await
        .unwrap();

    let kas_now = Account::find_by_id(kas.id).one(&*app.db).await.unwrap().unwrap();
    assert_eq!(kas_now.balance, dec!(250_000));

    let entry = AccountTransaction::find()
        .filter(account_transaction::Column::Kind.eq("expense"))
        .one(&*app.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(entry.amount, dec!(-150_000));

    // An expense larger than the balance is rejected whole.
    let err = app
        .services
        .recorder
        .record_expense(RecordExpenseRequest {
            store: STORE.to_string(),
            expense_type: "rent".to_string(),
            amount: dec!(300_000),
            description: None,
            account_id: Some(kas.id),
            reference_id: None,
            date: app.date(),
            created_by: None,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InsufficientFunds { .. });

    let kas_now = Account::find_by_id(kas.id).one(&*app.db).await.unwrap().unwrap();
    assert_eq!(kas_now.balance, dec!(250_000));
}

#[tokio::test]
async fn salary_payment_writes_expense_then_payroll_row() {
    let app = TestApp::new().await;
    let kas = app.seed_account(STORE, "Kas", Decimal::ZERO).await;

    app.services
        .accounts
        .adjust_balance(STORE, kas.id, dec!(3_000_000), "Opening".into(), None, app.date())
        .await
        .unwrap();

    let expense_id = app
        .services
        .recorder
        .record_salary_payment(RecordSalaryPaymentRequest {
            store: STORE.to_string(),
            staff_name: "Andi".to_string(),
            period: chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            amount: dec!(2_000_000),
            note: Some("June payroll".to_string()),
            account_id: Some(kas.id),
            date: app.date(),
            created_by: Some("admin".to_string()),
        })
        .await
        .unwrap();

    let kas_now = Account::find_by_id(kas.id).one(&*app.db).await.unwrap().unwrap();
    assert_eq!(kas_now.balance, dec!(1_000_000));

    use storeledger_api::entities::{
        operational_expense::Entity as OperationalExpense,
        salary_payment::{self, Entity as SalaryPayment},
    };

    let expense = OperationalExpense::find_by_id(expense_id)
        .one(&*app.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(expense.expense_type, "salary");

    let payroll = SalaryPayment::find()
        .filter(salary_payment::Column::ExpenseId.eq(expense_id))
        .one(&*app.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(payroll.staff_name, "Andi");
    assert_eq!(payroll.amount, dec!(2_000_000));
}
