//! Database configuration module for the VADAF inventory core.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary tables
//! based on the entity definitions. The module uses `SeaORM`'s `Schema::create_table_from_entity`
//! method to automatically generate SQL statements from the entity models, ensuring that the
//! database schema matches the Rust struct definitions without requiring manual SQL.

use crate::entities::{Movement, Product, Supplier};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Default on-disk database location, created on first run.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://vadaf_inventory.db?mode=rwc";

/// Establishes a connection to the `SQLite` database at the given URL.
///
/// # Errors
/// Returns an error if the connection cannot be established.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation
/// from the entity definitions. Safe to call on every startup: existing
/// tables are left untouched.
///
/// # Errors
/// Returns an error if any of the table creation statements fail.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    // Suppliers before products: products carry the supplier foreign key
    let mut supplier_table = schema.create_table_from_entity(Supplier);
    let mut product_table = schema.create_table_from_entity(Product);
    let mut movement_table = schema.create_table_from_entity(Movement);

    db.execute(builder.build(supplier_table.if_not_exists()))
        .await?;
    db.execute(builder.build(product_table.if_not_exists()))
        .await?;
    db.execute(builder.build(movement_table.if_not_exists()))
        .await?;

    Ok(())
}
