//! End-to-end order lifecycle: create, confirm, kitchen progress, cancellation

use comanda_server::db::DbService;
use comanda_server::db::models::{OrderCreate, OrderItemInput, OrderItemStatus, OrderStatus};
use comanda_server::message::MessageBus;
use comanda_server::orders::OrderEngine;
use shared::error::ErrorCode;
use sqlx::SqlitePool;
use tokio::sync::broadcast::error::TryRecvError;

async fn setup() -> (OrderEngine, MessageBus, SqlitePool) {
    let db = DbService::in_memory().await.unwrap();
    let bus = MessageBus::new();
    let engine = OrderEngine::new(db.pool.clone(), bus.clone());
    (engine, bus, db.pool)
}

async fn seed_table(pool: &SqlitePool, number: i64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO dining_table (number, capacity, qr_token) VALUES (?, 4, ?) RETURNING id",
    )
    .bind(number)
    .bind(format!("tok-{number}"))
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn seed_menu_item(pool: &SqlitePool, name: &str, price: f64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO menu_item (name, category, price) VALUES (?, 'mains', ?) RETURNING id",
    )
    .bind(name)
    .bind(price)
    .fetch_one(pool)
    .await
    .unwrap()
}

fn item(menu_item_id: i64, quantity: i64) -> OrderItemInput {
    OrderItemInput {
        menu_item_id,
        quantity,
        notes: None,
    }
}

#[tokio::test]
async fn test_full_lifecycle_to_order_ready() {
    let (engine, bus, pool) = setup().await;
    let mut rx = bus.subscribe();

    let table_id = seed_table(&pool, 1).await;
    let burger = seed_menu_item(&pool, "Burger", 10.00).await;
    let fries = seed_menu_item(&pool, "Fries", 5.00).await;

    let detail = engine
        .create_order(OrderCreate {
            table_id,
            items: vec![item(burger, 2), item(fries, 1)],
        })
        .await
        .unwrap();
    assert_eq!(detail.order.status, OrderStatus::Pending);
    assert_eq!(detail.order.total, 25.00);
    assert_eq!(detail.items.len(), 2);
    assert_eq!(rx.recv().await.unwrap().event, "order_created");

    let order = engine.confirm_order(detail.order.id).await.unwrap();
    assert_eq!(order.status, OrderStatus::Confirmed);
    assert_eq!(rx.recv().await.unwrap().event, "order_confirmed");

    // Kitchen progresses both items to ready
    engine
        .update_item_status(detail.items[0].id, OrderItemStatus::Preparing)
        .await
        .unwrap();
    assert_eq!(rx.recv().await.unwrap().event, "order_item_status_updated");

    engine
        .update_item_status(detail.items[0].id, OrderItemStatus::Ready)
        .await
        .unwrap();
    assert_eq!(rx.recv().await.unwrap().event, "order_item_status_updated");

    engine
        .update_item_status(detail.items[1].id, OrderItemStatus::Ready)
        .await
        .unwrap();
    assert_eq!(rx.recv().await.unwrap().event, "order_item_status_updated");

    // Last item going ready fires the pickup notification
    let ready = rx.recv().await.unwrap();
    assert_eq!(ready.event, "order_ready");
    assert_eq!(ready.data["id"], detail.order.id);
}

#[tokio::test]
async fn test_cancel_item_recomputes_total() {
    let (engine, bus, pool) = setup().await;

    let table_id = seed_table(&pool, 2).await;
    let burger = seed_menu_item(&pool, "Burger", 10.00).await;
    let fries = seed_menu_item(&pool, "Fries", 5.00).await;

    let detail = engine
        .create_order(OrderCreate {
            table_id,
            items: vec![item(burger, 2), item(fries, 1)],
        })
        .await
        .unwrap();
    assert_eq!(detail.order.total, 25.00);

    let fries_item = detail
        .items
        .iter()
        .find(|i| i.menu_item_id == fries)
        .unwrap();

    let mut rx = bus.subscribe();
    let updated = engine.cancel_item(fries_item.id).await.unwrap();
    assert_eq!(updated.order.total, 20.00);
    let cancelled = updated
        .items
        .iter()
        .find(|i| i.id == fries_item.id)
        .unwrap();
    assert_eq!(cancelled.status, OrderItemStatus::Cancelled);
    assert_eq!(rx.recv().await.unwrap().event, "order_item_cancelled");
}

#[tokio::test]
async fn test_cancel_rejected_once_preparing() {
    let (engine, bus, pool) = setup().await;

    let table_id = seed_table(&pool, 3).await;
    let burger = seed_menu_item(&pool, "Burger", 10.00).await;

    let detail = engine
        .create_order(OrderCreate {
            table_id,
            items: vec![item(burger, 1)],
        })
        .await
        .unwrap();

    engine
        .update_item_status(detail.items[0].id, OrderItemStatus::Preparing)
        .await
        .unwrap();

    let mut rx = bus.subscribe();
    let err = engine.cancel_item(detail.items[0].id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ItemNotCancellable);

    // Total unchanged, no notification for the rejected cancel
    let total: f64 = sqlx::query_scalar("SELECT total FROM orders WHERE id = ?")
        .bind(detail.order.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(total, 10.00);
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn test_unknown_menu_items_are_skipped() {
    let (engine, _bus, pool) = setup().await;

    let table_id = seed_table(&pool, 4).await;
    let burger = seed_menu_item(&pool, "Burger", 10.00).await;

    let detail = engine
        .create_order(OrderCreate {
            table_id,
            items: vec![item(burger, 1), item(9999, 1)],
        })
        .await
        .unwrap();
    assert_eq!(detail.items.len(), 1);
    assert_eq!(detail.order.total, 10.00);
}

#[tokio::test]
async fn test_order_with_only_unknown_items_is_rejected() {
    let (engine, _bus, pool) = setup().await;
    let table_id = seed_table(&pool, 5).await;

    let err = engine
        .create_order(OrderCreate {
            table_id,
            items: vec![item(9999, 1)],
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::EmptyOrder);

    // Nothing persisted, table stays free
    let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orders, 0);
    let status: String = sqlx::query_scalar("SELECT status FROM dining_table WHERE id = ?")
        .bind(table_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(status, "free");
}

#[tokio::test]
async fn test_create_order_occupies_table() {
    let (engine, _bus, pool) = setup().await;

    let table_id = seed_table(&pool, 6).await;
    let burger = seed_menu_item(&pool, "Burger", 10.00).await;

    engine
        .create_order(OrderCreate {
            table_id,
            items: vec![item(burger, 1)],
        })
        .await
        .unwrap();

    let status: String = sqlx::query_scalar("SELECT status FROM dining_table WHERE id = ?")
        .bind(table_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(status, "occupied");
}

#[tokio::test]
async fn test_price_snapshot_survives_menu_edit() {
    let (engine, _bus, pool) = setup().await;

    let table_id = seed_table(&pool, 7).await;
    let burger = seed_menu_item(&pool, "Burger", 10.00).await;

    let detail = engine
        .create_order(OrderCreate {
            table_id,
            items: vec![item(burger, 1)],
        })
        .await
        .unwrap();

    sqlx::query("UPDATE menu_item SET price = 99.00 WHERE id = ?")
        .bind(burger)
        .execute(&pool)
        .await
        .unwrap();

    let price: f64 = sqlx::query_scalar("SELECT price FROM order_item WHERE id = ?")
        .bind(detail.items[0].id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(price, 10.00);
}
