// crates/commerce/src/routes.rs

use crate::catalog::{self, PRODUCTS};
use crate::error::CommerceError;
use crate::model::{NewOrder, Order, OrderUpdate};
use crate::repo::OrderRepository;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

#[derive(Clone)]
pub struct CommerceState {
    pub orders: Arc<dyn OrderRepository>,
}

impl CommerceState {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }
}

pub fn router(state: CommerceState) -> Router {
    Router::new()
        .route("/commerce/v1/orders", get(list_orders).post(create_order))
        .route(
            "/commerce/v1/orders/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
        .route("/pim/v1/products", get(list_products))
        .route("/pim/v1/products/{id}", get(get_product))
        .with_state(state)
}

#[tracing::instrument(skip_all)]
async fn list_orders(State(state): State<CommerceState>) -> Json<Value> {
    let orders = state.orders.list();
    Json(json!({ "total": orders.len(), "orders": orders }))
}

#[tracing::instrument(skip_all)]
async fn create_order(
    State(state): State<CommerceState>,
    payload: Result<Json<NewOrder>, JsonRejection>,
) -> Result<Json<Order>, CommerceError> {
    let Json(new) = payload?;
    new.validate()?;

    let order = state.orders.create(new);
    info!(id = %order.id, total = order.total_amount, "order created");
    Ok(Json(order))
}

#[tracing::instrument(skip_all)]
async fn get_order(
    State(state): State<CommerceState>,
    Path(id): Path<String>,
) -> Result<Json<Order>, CommerceError> {
    state
        .orders
        .get(&id)
        .map(Json)
        .ok_or(CommerceError::OrderNotFound)
}

#[tracing::instrument(skip_all)]
async fn update_order(
    State(state): State<CommerceState>,
    Path(id): Path<String>,
    payload: Result<Json<OrderUpdate>, JsonRejection>,
) -> Result<Json<Order>, CommerceError> {
    let Json(update) = payload?;
    update.validate()?;

    state
        .orders
        .update(&id, update)
        .map(Json)
        .ok_or(CommerceError::OrderNotFound)
}

#[tracing::instrument(skip_all)]
async fn delete_order(
    State(state): State<CommerceState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, CommerceError> {
    if !state.orders.delete(&id) {
        return Err(CommerceError::OrderNotFound);
    }

    info!("order deleted");
    Ok(Json(json!({
        "success": true,
        "message": format!("Order {id} deleted successfully"),
    })))
}

async fn list_products() -> Json<Value> {
    Json(json!({ "total": PRODUCTS.len(), "products": PRODUCTS }))
}

async fn get_product(Path(id): Path<String>) -> Result<Json<Value>, CommerceError> {
    let product = catalog::find(&id).ok_or(CommerceError::ProductNotFound)?;
    Ok(Json(json!(product)))
}
