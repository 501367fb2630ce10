mod common;

use assert_matches::assert_matches;
use common::TestApp;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use storeledger_api::{
    entities::stock_adjustment::{self, AdjustmentDirection, Entity as StockAdjustment},
    errors::ServiceError,
    services::recorder::RecordStockAdjustmentRequest,
};

const STORE: &str = "SuryaJaya";

#[tokio::test]
async fn adjust_stock_accumulates_and_never_goes_negative() {
    let app = TestApp::new().await;
    let product = app.seed_product(STORE, "Granit 60x60").await;
    let warehouse = app.seed_warehouse(STORE, "Gudang A").await;

    let stock = &app.services.stock;

    assert_eq!(
        stock
            .adjust_stock(STORE, product.id, warehouse.id, 10)
            .await
            .unwrap(),
        10
    );
    assert_eq!(
        stock
            .adjust_stock(STORE, product.id, warehouse.id, 5)
            .await
            .unwrap(),
        15
    );
    assert_eq!(
        stock
            .adjust_stock(STORE, product.id, warehouse.id, -3)
            .await
            .unwrap(),
        12
    );

    let err = stock
        .adjust_stock(STORE, product.id, warehouse.id, -20)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ServiceError::InsufficientStock {
            available: 12,
            requested: 20,
            ..
        }
    );

    // The rejected adjustment left nothing behind.
    assert_eq!(
        stock.quantity_of(STORE, product.id, warehouse.id).await.unwrap(),
        12
    );
}

#[tokio::test]
async fn mixed_adjustment_sequence_keeps_quantity_non_negative() {
    let app = TestApp::new().await;
    let product = app.seed_product(STORE, "Keramik 40x40").await;
    let warehouse = app.seed_warehouse(STORE, "Gudang A").await;

    let stock = &app.services.stock;
    let deltas: [i64; 9] = [7, -2, -6, 10, -9, -1, 4, -5, -3];
    let mut expected: i64 = 0;

    for delta in deltas {
        let result = stock.adjust_stock(STORE, product.id, warehouse.id, delta).await;
        if expected + delta < 0 {
            assert_matches!(result.unwrap_err(), ServiceError::InsufficientStock { .. });
        } else {
            expected += delta;
            assert_eq!(result.unwrap(), expected);
        }
        assert!(expected >= 0);
        assert_eq!(
            stock.quantity_of(STORE, product.id, warehouse.id).await.unwrap(),
            expected
        );
    }
}

#[tokio::test]
async fn first_movement_cannot_be_negative() {
    let app = TestApp::new().await;
    let product = app.seed_product(STORE, "Granit 80x80").await;
    let warehouse = app.seed_warehouse(STORE, "Gudang B").await;

    let err = app
        .services
        .stock
        .adjust_stock(STORE, product.id, warehouse.id, -1)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ServiceError::InsufficientStock {
            available: 0,
            requested: 1,
            ..
        }
    );
}

#[tokio::test]
async fn migrate_stock_moves_exactly_between_warehouses() {
    let app = TestApp::new().await;
    let product = app.seed_product(STORE, "Granit 60x60").await;
    let wh_a = app.seed_warehouse(STORE, "Gudang A").await;
    let wh_b = app.seed_warehouse(STORE, "Gudang B").await;

    let stock = &app.services.stock;
    stock
        .adjust_stock(STORE, product.id, wh_a.id, 10)
        .await
        .unwrap();

    stock
        .migrate_stock(STORE, product.id, wh_a.id, wh_b.id, 10)
        .await
        .unwrap();

    assert_eq!(stock.quantity_of(STORE, product.id, wh_a.id).await.unwrap(), 0);
    assert_eq!(stock.quantity_of(STORE, product.id, wh_b.id).await.unwrap(), 10);
}

#[tokio::test]
async fn failed_migration_leaves_no_partial_move() {
    let app = TestApp::new().await;
    let product = app.seed_product(STORE, "Granit 60x60").await;
    let wh_a = app.seed_warehouse(STORE, "Gudang A").await;
    let wh_b = app.seed_warehouse(STORE, "Gudang B").await;

    let stock = &app.services.stock;
    stock
        .adjust_stock(STORE, product.id, wh_a.id, 5)
        .await
        .unwrap();

    // More than the source holds
    let err = stock
        .migrate_stock(STORE, product.id, wh_a.id, wh_b.id, 8)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InsufficientStock { available: 5, .. });

    // Target warehouse outside the store: the already-applied debit must
    // roll back with the rest of the transaction.
    let foreign_wh = app.seed_warehouse("OtherStore", "Gudang X").await;
    let err = stock
        .migrate_stock(STORE, product.id, wh_a.id, foreign_wh.id, 3)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));

    assert_eq!(stock.quantity_of(STORE, product.id, wh_a.id).await.unwrap(), 5);
    assert_eq!(stock.quantity_of(STORE, product.id, wh_b.id).await.unwrap(), 0);
}

#[tokio::test]
async fn migration_validates_quantity_and_distinct_warehouses() {
    let app = TestApp::new().await;
    let product = app.seed_product(STORE, "Granit 60x60").await;
    let wh_a = app.seed_warehouse(STORE, "Gudang A").await;
    let wh_b = app.seed_warehouse(STORE, "Gudang B").await;

    let stock = &app.services.stock;

    assert_matches!(
        stock
            .migrate_stock(STORE, product.id, wh_a.id, wh_b.id, 0)
            .await
            .unwrap_err(),
        ServiceError::ValidationError(_)
    );
    assert_matches!(
        stock
            .migrate_stock(STORE, product.id, wh_a.id, wh_a.id, 5)
            .await
            .unwrap_err(),
        ServiceError::ValidationError(_)
    );
}

#[tokio::test]
async fn recorded_adjustment_writes_audit_row() {
    let app = TestApp::new().await;
    let product = app.seed_product(STORE, "Granit 60x60").await;
    let warehouse = app.seed_warehouse(STORE, "Gudang A").await;

    app.services
        .stock
        .adjust_stock(STORE, product.id, warehouse.id, 10)
        .await
        .unwrap();

    let adjustment_id = app
        .services
        .recorder
        .record_stock_adjustment(RecordStockAdjustmentRequest {
            store: STORE.to_string(),
            product_id: product.id,
            warehouse_id: warehouse.id,
            direction: AdjustmentDirection::Reduce,
            quantity: 4,
            reason: "Broken tiles found during count".to_string(),
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
        6
    );

    let audit = StockAdjustment::find_by_id(adjustment_id)
        .one(&*app.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(audit.direction, "reduce");
    assert_eq!(audit.quantity, 4);
    assert_eq!(audit.reason, "Broken tiles found during count");
}

#[tokio::test]
async fn recorded_adjustment_rejects_overdraw_and_empty_reason() {
    let app = TestApp::new().await;
    let product = app.seed_product(STORE, "Granit 60x60").await;
    let warehouse = app.seed_warehouse(STORE, "Gudang A").await;

    app.services
        .stock
        .adjust_stock(STORE, product.id, warehouse.id, 3)
        .await
        .unwrap();

    let err = app
        .services
        .recorder
        .record_stock_adjustment(RecordStockAdjustmentRequest {
            store: STORE.to_string(),
            product_id: product.id,
            warehouse_id: warehouse.id,
            direction: AdjustmentDirection::Reduce,
            quantity: 5,
            reason: "count".to_string(),
            date: app.date(),
            created_by: None,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InsufficientStock { available: 3, .. });

    let err = app
        .services
        .recorder
        .record_stock_adjustment(RecordStockAdjustmentRequest {
            store: STORE.to_string(),
            product_id: product.id,
            warehouse_id: warehouse.id,
            direction: AdjustmentDirection::Add,
            quantity: 1,
            reason: "   ".to_string(),
            date: app.date(),
            created_by: None,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));

    // Rejected adjustments leave no audit rows behind.
    let rows = StockAdjustment::find()
        .filter(stock_adjustment::Column::Store.eq(STORE))
        .all(&*app.db)
        .await
        .unwrap();
    assert!(rows.is_empty());
}
