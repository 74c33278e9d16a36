//! Typed database rows and request payloads

pub mod bill_share;
pub mod dining_table;
pub mod menu_item;
pub mod order;
pub mod payment;
pub mod plan;
pub mod reservation;
pub mod review;
pub mod waiter_call;

pub use bill_share::{BillShare, BillShareInput};
pub use dining_table::{DiningTable, DiningTableCreate, DiningTableUpdate, TableStatus};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use order::{
    Order, OrderCreate, OrderDetail, OrderItem, OrderItemInput, OrderItemStatus, OrderStatus,
};
pub use payment::{Payment, PaymentCreate, PaymentMethod, SplitBillCreate, SplitBillResult};
pub use plan::{SubscriptionPlan, SubscriptionPlanCreate, SubscriptionPlanUpdate};
pub use reservation::{Reservation, ReservationCreate, ReservationStatus, ReservationUpdate};
pub use review::{DishReview, DishReviewCreate};
pub use waiter_call::{WaiterCall, WaiterCallCreate};
