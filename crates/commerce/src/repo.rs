// crates/commerce/src/repo.rs

use crate::model::{NewOrder, Order, OrderItem, OrderStatus, OrderUpdate};
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::RwLock;

#[cfg_attr(test, mockall::automock)]
pub trait OrderRepository: Send + Sync {
    fn list(&self) -> Vec<Order>;

    fn get(&self, id: &str) -> Option<Order>;

    fn create(&self, new: NewOrder) -> Order;

    /// `None` when no order has that id.
    fn update(&self, id: &str, update: OrderUpdate) -> Option<Order>;

    /// `false` when no order has that id.
    fn delete(&self, id: &str) -> bool;
}

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryOrders {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            orders: RwLock::new(orders),
        }
    }

    /// Two demo orders with ids "1" and "2".
    pub fn seeded() -> Self {
        let at = Utc
            .with_ymd_and_hms(2024, 1, 15, 10, 30, 0)
            .single()
            .unwrap_or_default();

        Self::with_orders(vec![
            seed_order(
                "1",
                "John Doe",
                "john@example.com",
                vec![item("P001", 2, 29.99), item("P002", 1, 49.99)],
                OrderStatus::Pending,
                at,
            ),
            seed_order(
                "2",
                "Jane Smith",
                "jane@example.com",
                vec![item("P003", 1, 99.99)],
                OrderStatus::Shipped,
                at,
            ),
        ])
    }

    /// Order ids are creation time in milliseconds. Two orders created in the
    /// same millisecond get the same id.
    fn next_id(now: DateTime<Utc>) -> String {
        now.timestamp_millis().to_string()
    }
}

fn item(product_id: &str, quantity: u32, price: f64) -> OrderItem {
    OrderItem {
        product_id: product_id.to_string(),
        quantity,
        price,
    }
}

fn seed_order(
    id: &str,
    customer: &str,
    email: &str,
    items: Vec<OrderItem>,
    status: OrderStatus,
    at: DateTime<Utc>,
) -> Order {
    let mut order = Order::create(
        id.to_string(),
        NewOrder {
            customer_name: customer.to_string(),
            customer_email: Some(email.to_string()),
            items,
        },
        at,
    );
    order.status = status;
    order
}

impl OrderRepository for InMemoryOrders {
    fn list(&self) -> Vec<Order> {
        self.orders.read().clone()
    }

    fn get(&self, id: &str) -> Option<Order> {
        self.orders.read().iter().find(|o| o.id == id).cloned()
    }

    fn create(&self, new: NewOrder) -> Order {
        let now = Utc::now();
        let order = Order::create(Self::next_id(now), new, now);
        self.orders.write().push(order.clone());
        order
    }

    fn update(&self, id: &str, update: OrderUpdate) -> Option<Order> {
        let mut orders = self.orders.write();
        let order = orders.iter_mut().find(|o| o.id == id)?;
        order.apply(update, Utc::now());
        Some(order.clone())
    }

    fn delete(&self, id: &str) -> bool {
        let mut orders = self.orders.write();
        let before = orders.len();
        orders.retain(|o| o.id != id);
        orders.len() != before
    }
}
