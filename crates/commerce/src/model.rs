// crates/commerce/src/model.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[validate(custom(function = "not_blank", message = "productId is required"))]
    pub product_id: String,

    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: u32,

    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /commerce/v1/orders`. Missing fields deserialize to empty
/// values so that they surface as validation failures, not parse failures.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "customerName is required"))]
    pub customer_name: String,

    #[validate(email(message = "customerEmail must be a valid email address"))]
    pub customer_email: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "at least one item is required"), nested)]
    pub items: Vec<OrderItem>,
}

/// Body of `PUT /commerce/v1/orders/{id}`. Absent fields are left as they are.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    #[validate(custom(function = "not_blank", message = "customerName must not be blank"))]
    pub customer_name: Option<String>,

    #[validate(email(message = "customerEmail must be a valid email address"))]
    pub customer_email: Option<String>,

    #[validate(length(min = 1, message = "at least one item is required"), nested)]
    pub items: Option<Vec<OrderItem>>,

    pub status: Option<OrderStatus>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Σ quantity × price, in item order.
pub fn total_amount(items: &[OrderItem]) -> f64 {
    items
        .iter()
        .map(|item| f64::from(item.quantity) * item.price)
        .sum()
}

impl Order {
    pub fn create(id: String, new: NewOrder, now: DateTime<Utc>) -> Self {
        Self {
            id,
            total_amount: total_amount(&new.items),
            customer_name: new.customer_name,
            customer_email: new.customer_email,
            items: new.items,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a validated update. New items recompute the total.
    pub fn apply(&mut self, update: OrderUpdate, now: DateTime<Utc>) {
        if let Some(name) = update.customer_name {
            self.customer_name = name;
        }
        if let Some(email) = update.customer_email {
            self.customer_email = Some(email);
        }
        if let Some(items) = update.items {
            self.total_amount = total_amount(&items);
            self.items = items;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(product_id: &str, quantity: u32, price: f64) -> OrderItem {
        OrderItem {
            product_id: product_id.into(),
            quantity,
            price,
        }
    }

    #[test]
    fn total_is_quantity_times_price() {
        assert_eq!(total_amount(&[item("P001", 5, 20.0)]), 100.0);
        assert_eq!(total_amount(&[]), 0.0);

        let total = total_amount(&[item("P001", 2, 29.99), item("P002", 1, 49.99)]);
        assert!((total - 109.97).abs() < 1e-9, "{total}");
    }

    #[test]
    fn missing_fields_fail_validation_not_parsing() {
        let new: NewOrder = serde_json::from_value(json!({})).expect("parses");
        let errors = new.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("customer_name"));
        assert!(fields.contains_key("items"));
    }

    #[test]
    fn nested_item_errors_are_reported() {
        let new: NewOrder = serde_json::from_value(json!({
            "customerName": "Ada",
            "items": [ { "productId": " ", "quantity": 0, "price": 1.0 } ]
        }))
        .unwrap();
        assert!(new.validate().is_err());
    }

    #[test]
    fn valid_order_passes() {
        let new: NewOrder = serde_json::from_value(json!({
            "customerName": "Ada",
            "customerEmail": "ada@example.com",
            "items": [ { "productId": "P001", "quantity": 1, "price": 9.5 } ]
        }))
        .unwrap();
        assert!(new.validate().is_ok());
    }

    #[test]
    fn update_recomputes_total_only_when_items_change() {
        let now = Utc::now();
        let mut order = Order::create(
            "1".into(),
            NewOrder {
                customer_name: "Ada".into(),
                customer_email: None,
                items: vec![item("P001", 1, 10.0)],
            },
            now,
        );

        order.apply(
            OrderUpdate {
                status: Some(OrderStatus::Shipped),
                ..Default::default()
            },
            now,
        );
        assert_eq!(order.total_amount, 10.0);
        assert_eq!(order.status, OrderStatus::Shipped);

        order.apply(
            OrderUpdate {
                items: Some(vec![item("P002", 5, 20.0)]),
                ..Default::default()
            },
            now,
        );
        assert_eq!(order.total_amount, 100.0);
    }

    #[test]
    fn order_serializes_camel_case() {
        let order = Order::create("7".into(), NewOrder::default(), Utc::now());
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["totalAmount"], json!(0.0));
        assert_eq!(value["status"], json!("pending"));
        assert!(value.get("customerEmail").is_none());
    }
}
