// crates/commerce/src/lib.rs

//! Mock commerce REST API: orders CRUD over an injectable repository and a
//! static product catalog.

pub mod catalog;
pub mod error;
pub mod model;
pub mod repo;
pub mod routes;

pub use error::CommerceError;
pub use repo::{InMemoryOrders, OrderRepository};
pub use routes::{router, CommerceState};
