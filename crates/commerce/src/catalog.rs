// crates/commerce/src/catalog.rs

//! Static product catalog served under `/pim/v1/products`.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: f64,
    pub category: &'static str,
    pub in_stock: bool,
}

pub const PRODUCTS: &[CatalogProduct] = &[
    CatalogProduct {
        id: "P001",
        name: "Wireless Mouse",
        description: "Ergonomic wireless mouse with adjustable DPI",
        price: 29.99,
        category: "Electronics",
        in_stock: true,
    },
    CatalogProduct {
        id: "P002",
        name: "Mechanical Keyboard",
        description: "Tenkeyless keyboard with hot-swappable switches",
        price: 49.99,
        category: "Electronics",
        in_stock: true,
    },
    CatalogProduct {
        id: "P003",
        name: "27\" Monitor",
        description: "QHD IPS monitor with height-adjustable stand",
        price: 99.99,
        category: "Electronics",
        in_stock: false,
    },
    CatalogProduct {
        id: "P004",
        name: "Desk Lamp",
        description: "LED desk lamp with three colour temperatures",
        price: 19.99,
        category: "Home Office",
        in_stock: true,
    },
];

pub fn find(id: &str) -> Option<&'static CatalogProduct> {
    PRODUCTS.iter().find(|p| p.id == id)
}
