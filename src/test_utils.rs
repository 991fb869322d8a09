//! Shared test utilities for the inventory core.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    config,
    core::{product, supplier},
    entities::{self, Category},
    errors::Result,
};
use sea_orm::{ConnectOptions, DatabaseConnection};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
///
/// The pool is capped at one connection: each in-memory `SQLite` connection
/// is its own database, so a second pooled connection would see empty tables.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = sea_orm::Database::connect(options).await?;
    config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test supplier with just a name (no NIT).
pub async fn create_test_supplier(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::supplier::Model> {
    supplier::create_supplier(
        db,
        supplier::SupplierInput {
            name: name.to_string(),
            ..Default::default()
        },
    )
    .await
}

/// Creates a test supplier with a specific NIT.
pub async fn create_custom_supplier(
    db: &DatabaseConnection,
    name: &str,
    nit: Option<&str>,
) -> Result<entities::supplier::Model> {
    supplier::create_supplier(
        db,
        supplier::SupplierInput {
            name: name.to_string(),
            nit: nit.map(ToString::to_string),
            ..Default::default()
        },
    )
    .await
}

/// A baseline product input for validation tests.
///
/// # Defaults
/// * `category`: Finished good
/// * `quantity`: 0
/// * `min_stock`: 10
/// * `unit_cost`: 1.0
#[must_use]
pub fn new_product_input(code: &str, name: &str) -> product::NewProduct {
    product::NewProduct {
        code: code.to_string(),
        name: name.to_string(),
        category: Category::FinishedGood,
        shoe_type: None,
        size: None,
        color: None,
        quantity: 0,
        min_stock: 10,
        location: None,
        supplier_id: None,
        unit_cost: 1.0,
    }
}

/// A baseline full-record update for a product.
#[must_use]
pub fn product_update_input(code: &str, name: &str) -> product::ProductUpdate {
    product::ProductUpdate {
        code: code.to_string(),
        name: name.to_string(),
        category: Category::FinishedGood,
        shoe_type: None,
        size: None,
        color: None,
        min_stock: 10,
        location: None,
        supplier_id: None,
        unit_cost: 1.0,
    }
}

/// Creates a test product with defaults (quantity 0).
pub async fn create_test_product(
    db: &DatabaseConnection,
    code: &str,
    name: &str,
) -> Result<entities::product::Model> {
    product::create_product(db, new_product_input(code, name)).await
}

/// Creates a test product with a specific initial quantity.
pub async fn create_test_product_with_qty(
    db: &DatabaseConnection,
    code: &str,
    name: &str,
    quantity: i64,
) -> Result<entities::product::Model> {
    let mut input = new_product_input(code, name);
    input.quantity = quantity;
    product::create_product(db, input).await
}

/// Creates a test product with a specific category, quantity and unit cost.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    code: &str,
    name: &str,
    category: Category,
    quantity: i64,
    unit_cost: f64,
) -> Result<entities::product::Model> {
    let mut input = new_product_input(code, name);
    input.category = category;
    input.quantity = quantity;
    input.unit_cost = unit_cost;
    product::create_product(db, input).await
}

/// Creates a test product referencing a supplier.
pub async fn create_product_for_supplier(
    db: &DatabaseConnection,
    code: &str,
    supplier_id: i64,
) -> Result<entities::product::Model> {
    let mut input = new_product_input(code, &format!("Producto {code}"));
    input.supplier_id = Some(supplier_id);
    product::create_product(db, input).await
}
