//! End-to-end split-bill settlement over a real order lifecycle

use comanda_server::billing::SettlementEngine;
use comanda_server::db::DbService;
use comanda_server::db::models::{
    BillShareInput, OrderCreate, OrderItemInput, OrderStatus, PaymentCreate, PaymentMethod,
    SplitBillCreate, TableStatus,
};
use comanda_server::message::MessageBus;
use comanda_server::orders::OrderEngine;
use shared::error::ErrorCode;
use sqlx::SqlitePool;
use tokio::sync::broadcast::error::TryRecvError;

struct Fixture {
    orders: OrderEngine,
    billing: SettlementEngine,
    bus: MessageBus,
    pool: SqlitePool,
}

async fn setup() -> Fixture {
    let db = DbService::in_memory().await.unwrap();
    let bus = MessageBus::new();
    Fixture {
        orders: OrderEngine::new(db.pool.clone(), bus.clone()),
        billing: SettlementEngine::new(db.pool.clone(), bus.clone()),
        bus,
        pool: db.pool,
    }
}

/// Seed a table and a 30.00 confirmed order through the real engine
async fn confirmed_order(fx: &Fixture) -> (i64, i64) {
    let table_id: i64 = sqlx::query_scalar(
        "INSERT INTO dining_table (number, capacity, qr_token) \
         VALUES ((SELECT COALESCE(MAX(number), 0) + 1 FROM dining_table), 4, \
                 lower(hex(randomblob(8)))) RETURNING id",
    )
    .fetch_one(&fx.pool)
    .await
    .unwrap();
    let menu_id: i64 = sqlx::query_scalar(
        "INSERT INTO menu_item (name, category, price) \
         VALUES ('Steak', 'mains', 30.00) RETURNING id",
    )
    .fetch_one(&fx.pool)
    .await
    .unwrap();

    let detail = fx
        .orders
        .create_order(OrderCreate {
            table_id,
            items: vec![OrderItemInput {
                menu_item_id: menu_id,
                quantity: 1,
                notes: None,
            }],
        })
        .await
        .unwrap();
    fx.orders.confirm_order(detail.order.id).await.unwrap();
    (detail.order.id, table_id)
}

fn share(name: &str, amount: f64) -> BillShareInput {
    BillShareInput {
        customer_name: name.to_string(),
        amount,
    }
}

async fn order_status(pool: &SqlitePool, order_id: i64) -> OrderStatus {
    sqlx::query_scalar("SELECT status FROM orders WHERE id = ?")
        .bind(order_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn table_status(pool: &SqlitePool, table_id: i64) -> TableStatus {
    sqlx::query_scalar("SELECT status FROM dining_table WHERE id = ?")
        .bind(table_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_split_bill_full_settlement() {
    let fx = setup().await;
    let (order_id, table_id) = confirmed_order(&fx).await;

    let result = fx
        .billing
        .create_split_bill(SplitBillCreate {
            order_id,
            table_id,
            method: PaymentMethod::Card,
            shares: vec![share("Alice", 15.00), share("Bob", 15.00)],
        })
        .await
        .unwrap();
    assert_eq!(result.payment.amount, 30.00);

    let mut rx = fx.bus.subscribe();

    // Alice pays: nothing settles yet
    let first = fx.billing.mark_share_paid(result.shares[0].id).await.unwrap();
    assert!(!first.all_paid);
    assert_eq!(order_status(&fx.pool, order_id).await, OrderStatus::Confirmed);
    assert_eq!(table_status(&fx.pool, table_id).await, TableStatus::Occupied);

    // Bob pays: order completes, table frees, terminals notified
    let second = fx.billing.mark_share_paid(result.shares[1].id).await.unwrap();
    assert!(second.all_paid);
    assert_eq!(order_status(&fx.pool, order_id).await, OrderStatus::Completed);
    assert_eq!(table_status(&fx.pool, table_id).await, TableStatus::Free);

    let msg = rx.recv().await.unwrap();
    assert_eq!(msg.event, "split_bill_completed");
    assert_eq!(msg.data["order_id"], order_id);
    assert_eq!(msg.data["payment_id"], result.payment.id);
}

#[tokio::test]
async fn test_concurrent_share_payments_settle_exactly_once() {
    let fx = setup().await;
    let (order_id, table_id) = confirmed_order(&fx).await;

    let result = fx
        .billing
        .create_split_bill(SplitBillCreate {
            order_id,
            table_id,
            method: PaymentMethod::Card,
            shares: vec![share("Alice", 15.00), share("Bob", 15.00)],
        })
        .await
        .unwrap();

    let mut rx = fx.bus.subscribe();

    // Both payers race; the flag flip and the all-paid check share one
    // transaction, so exactly one call may close the bill
    let (first, second) = tokio::join!(
        fx.billing.mark_share_paid(result.shares[0].id),
        fx.billing.mark_share_paid(result.shares[1].id),
    );
    let first = first.unwrap();
    let second = second.unwrap();
    assert_ne!(first.all_paid, second.all_paid);

    assert_eq!(order_status(&fx.pool, order_id).await, OrderStatus::Completed);
    assert_eq!(table_status(&fx.pool, table_id).await, TableStatus::Free);

    // One settlement, one notification
    let msg = rx.try_recv().unwrap();
    assert_eq!(msg.event, "split_bill_completed");
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn test_split_bill_mismatch_leaves_order_untouched() {
    let fx = setup().await;
    let (order_id, table_id) = confirmed_order(&fx).await;

    let mut rx = fx.bus.subscribe();
    let err = fx
        .billing
        .create_split_bill(SplitBillCreate {
            order_id,
            table_id,
            method: PaymentMethod::Cash,
            shares: vec![share("Alice", 10.00), share("Bob", 15.00)],
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ShareAmountMismatch);

    assert_eq!(order_status(&fx.pool, order_id).await, OrderStatus::Confirmed);
    let payments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payment")
        .fetch_one(&fx.pool)
        .await
        .unwrap();
    assert_eq!(payments, 0);

    // Failed creation must not notify terminals
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn test_split_bill_rejected_before_confirmation() {
    let fx = setup().await;
    let (order_id, table_id) = confirmed_order(&fx).await;
    sqlx::query("UPDATE orders SET status = 'pending' WHERE id = ?")
        .bind(order_id)
        .execute(&fx.pool)
        .await
        .unwrap();

    let err = fx
        .billing
        .create_split_bill(SplitBillCreate {
            order_id,
            table_id,
            method: PaymentMethod::Cash,
            shares: vec![share("Alice", 30.00)],
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidOrderState);
}

#[tokio::test]
async fn test_second_payment_rejected() {
    let fx = setup().await;
    let (order_id, table_id) = confirmed_order(&fx).await;

    fx.billing
        .create_split_bill(SplitBillCreate {
            order_id,
            table_id,
            method: PaymentMethod::Card,
            shares: vec![share("Alice", 30.00)],
        })
        .await
        .unwrap();

    let err = fx
        .billing
        .create_split_bill(SplitBillCreate {
            order_id,
            table_id,
            method: PaymentMethod::Card,
            shares: vec![share("Bob", 30.00)],
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PaymentAlreadyExists);
}

#[tokio::test]
async fn test_plain_payment_settles_and_broadcasts() {
    let fx = setup().await;
    let (order_id, table_id) = confirmed_order(&fx).await;

    let mut rx = fx.bus.subscribe();
    let payment = fx
        .billing
        .record_payment(PaymentCreate {
            order_id,
            table_id,
            amount: 30.00,
            method: PaymentMethod::Cash,
        })
        .await
        .unwrap();
    assert_eq!(payment.amount, 30.00);

    assert_eq!(order_status(&fx.pool, order_id).await, OrderStatus::Completed);
    assert_eq!(table_status(&fx.pool, table_id).await, TableStatus::Free);

    let msg = rx.recv().await.unwrap();
    assert_eq!(msg.event, "payment_processed");
    assert_eq!(msg.data["order_id"], order_id);
    assert_eq!(msg.data["is_split_bill"], false);
}

#[tokio::test]
async fn test_one_cent_tolerance_accepted() {
    let fx = setup().await;
    let (order_id, table_id) = confirmed_order(&fx).await;

    fx.billing
        .create_split_bill(SplitBillCreate {
            order_id,
            table_id,
            method: PaymentMethod::Cash,
            shares: vec![share("Alice", 10.00), share("Bob", 10.00), share("Cara", 10.01)],
        })
        .await
        .unwrap();
}
