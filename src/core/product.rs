//! Product business logic - Handles all catalog operations on products.
//!
//! Provides functions for creating, retrieving, updating, deleting and
//! listing products. Code uniqueness and supplier references are checked
//! structurally before any write. The on-hand quantity is deliberately
//! absent from [`ProductUpdate`]: every stock change goes through the
//! ledger so each one leaves a movement row behind.

use crate::{
    entities::{Category, Movement, Product, Supplier, movement, product},
    errors::{Error, Result},
};
use sea_orm::{ActiveValue::NotSet, PaginatorTrait, QueryOrder, Set, prelude::*};

/// Fields accepted when creating a product. The initial quantity is the only
/// direct quantity write in the system; afterwards the ledger owns it.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Unique SKU code (required)
    pub code: String,
    /// Product name (required)
    pub name: String,
    /// Inventory category
    pub category: Category,
    /// Type of shoe
    pub shoe_type: Option<String>,
    /// Size
    pub size: Option<String>,
    /// Color
    pub color: Option<String>,
    /// Initial on-hand quantity
    pub quantity: i64,
    /// Low-stock alerting threshold
    pub min_stock: i64,
    /// Warehouse location
    pub location: Option<String>,
    /// Optional supplier reference; must resolve when set
    pub supplier_id: Option<i64>,
    /// Unit cost / production cost
    pub unit_cost: f64,
}

/// Mutable product fields for a full-record update. Quantity is not here:
/// use [`crate::core::ledger::record_movement`] or
/// [`crate::core::ledger::record_adjustment`] instead.
#[derive(Debug, Clone)]
pub struct ProductUpdate {
    /// Unique SKU code (required)
    pub code: String,
    /// Product name (required)
    pub name: String,
    /// Inventory category
    pub category: Category,
    /// Type of shoe
    pub shoe_type: Option<String>,
    /// Size
    pub size: Option<String>,
    /// Color
    pub color: Option<String>,
    /// Low-stock alerting threshold
    pub min_stock: i64,
    /// Warehouse location
    pub location: Option<String>,
    /// Optional supplier reference; must resolve when set
    pub supplier_id: Option<i64>,
    /// Unit cost / production cost
    pub unit_cost: f64,
}

/// Filter for [`list_products`]. Defaults select the whole catalog.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive (Unicode-aware) substring match against name OR
    /// code; `%` and `_` are ordinary characters
    pub search: Option<String>,
    /// Restrict to these categories; None means all
    pub categories: Option<Vec<Category>>,
}

/// A product snapshot joined with its supplier's name, as the listing and
/// report screens display it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    /// The product record
    pub product: product::Model,
    /// Name of the referenced supplier, when one is set
    pub supplier_name: Option<String>,
}

fn validate_fields(code: &str, name: &str, min_stock: i64, unit_cost: f64) -> Result<()> {
    if code.trim().is_empty() {
        return Err(Error::Validation {
            message: "Product code cannot be empty".to_string(),
        });
    }
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Product name cannot be empty".to_string(),
        });
    }
    if min_stock < 0 {
        return Err(Error::Validation {
            message: format!("min_stock cannot be negative, got {min_stock}"),
        });
    }
    if unit_cost < 0.0 || !unit_cost.is_finite() {
        return Err(Error::Validation {
            message: format!("unit_cost must be a finite value >= 0, got {unit_cost}"),
        });
    }
    Ok(())
}

/// Fails with `NotFound` if a supplier reference does not resolve.
async fn check_supplier_exists(db: &DatabaseConnection, supplier_id: i64) -> Result<()> {
    Supplier::find_by_id(supplier_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "supplier",
            id: supplier_id.to_string(),
        })?;
    Ok(())
}

/// Fails with `ConstraintViolation` if another product already carries the
/// code. `exclude_id` skips the record being updated.
async fn check_code_unique(db: &DatabaseConnection, code: &str, exclude_id: Option<i64>) -> Result<()> {
    let mut query = Product::find().filter(product::Column::Code.eq(code));
    if let Some(id) = exclude_id {
        query = query.filter(product::Column::Id.ne(id));
    }

    if query.one(db).await?.is_some() {
        return Err(Error::ConstraintViolation {
            field: "code",
            value: code.to_string(),
        });
    }
    Ok(())
}

/// Creates a new product, performing input validation.
///
/// # Errors
/// Returns `Validation` on empty code/name or negative quantity, threshold
/// or cost; `ConstraintViolation` if the code already exists; `NotFound` if
/// the supplier reference does not resolve.
pub async fn create_product(db: &DatabaseConnection, input: NewProduct) -> Result<product::Model> {
    validate_fields(&input.code, &input.name, input.min_stock, input.unit_cost)?;
    if input.quantity < 0 {
        return Err(Error::Validation {
            message: format!("quantity cannot be negative, got {}", input.quantity),
        });
    }

    let code = input.code.trim().to_string();
    check_code_unique(db, &code, None).await?;

    if let Some(supplier_id) = input.supplier_id {
        check_supplier_exists(db, supplier_id).await?;
    }

    let product = product::ActiveModel {
        code: Set(code),
        name: Set(input.name.trim().to_string()),
        category: Set(input.category),
        shoe_type: Set(input.shoe_type),
        size: Set(input.size),
        color: Set(input.color),
        quantity: Set(input.quantity),
        min_stock: Set(input.min_stock),
        location: Set(input.location),
        supplier_id: Set(input.supplier_id),
        unit_cost: Set(input.unit_cost),
        ..Default::default()
    };

    product.insert(db).await.map_err(Into::into)
}

/// Replaces all mutable fields of an existing product. The on-hand quantity
/// column is never part of the UPDATE, so a movement committing concurrently
/// cannot be overwritten with a stale value.
///
/// # Errors
/// Returns `NotFound` if the id does not resolve; otherwise the same
/// failures as [`create_product`], with the code uniqueness check excluding
/// the record itself.
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    input: ProductUpdate,
) -> Result<product::Model> {
    validate_fields(&input.code, &input.name, input.min_stock, input.unit_cost)?;

    Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "product",
            id: product_id.to_string(),
        })?;

    let code = input.code.trim().to_string();
    check_code_unique(db, &code, Some(product_id)).await?;

    if let Some(supplier_id) = input.supplier_id {
        check_supplier_exists(db, supplier_id).await?;
    }

    let product = product::ActiveModel {
        id: Set(product_id),
        code: Set(code),
        name: Set(input.name.trim().to_string()),
        category: Set(input.category),
        shoe_type: Set(input.shoe_type),
        size: Set(input.size),
        color: Set(input.color),
        // Quantity belongs to the ledger; leaving it NotSet keeps the
        // column out of the generated UPDATE
        quantity: NotSet,
        min_stock: Set(input.min_stock),
        location: Set(input.location),
        supplier_id: Set(input.supplier_id),
        unit_cost: Set(input.unit_cost),
    };

    product.update(db).await.map_err(Into::into)
}

/// Deletes a product, refusing while movement history exists so the ledger
/// never holds orphaned rows.
///
/// # Errors
/// Returns `NotFound` if the id does not resolve and `ReferentialConflict`
/// if any movement references the product.
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<()> {
    let product = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "product",
            id: product_id.to_string(),
        })?;

    let history = Movement::find()
        .filter(movement::Column::ProductId.eq(product_id))
        .count(db)
        .await?;
    if history > 0 {
        return Err(Error::ReferentialConflict {
            message: format!(
                "product '{}' has {history} recorded movement(s)",
                product.code
            ),
        });
    }

    product.delete(db).await?;
    Ok(())
}

/// Lists products matching the filter, ordered by name and joined with the
/// supplier name. The text search is a case-insensitive substring match
/// against name OR code.
///
/// The substring match runs in Rust rather than as SQL `LIKE`: SQLite's
/// `LIKE` only folds ASCII case (`café` would miss `CAFÉ`) and treats `%`
/// and `_` as wildcards. The catalog is small, so fetching the
/// category-filtered rows and matching here is fine.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_products(
    db: &DatabaseConnection,
    filter: &ProductFilter,
) -> Result<Vec<ProductRow>> {
    let mut query = Product::find().find_also_related(Supplier);

    if let Some(categories) = &filter.categories {
        query = query.filter(product::Column::Category.is_in(categories.iter().copied()));
    }

    let rows = query
        .order_by_asc(product::Column::Name)
        .all(db)
        .await?;

    let term = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase);

    Ok(rows
        .into_iter()
        .filter(|(product, _)| match &term {
            Some(term) => {
                product.name.to_lowercase().contains(term)
                    || product.code.to_lowercase().contains(term)
            }
            None => true,
        })
        .map(|(product, supplier)| ProductRow {
            product,
            supplier_name: supplier.map(|s| s.name),
        })
        .collect())
}

/// Retrieves a specific product by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its unique SKU code.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_code(
    db: &DatabaseConnection,
    code: &str,
) -> Result<Option<product::Model>> {
    Product::find()
        .filter(product::Column::Code.eq(code))
        .one(db)
        .await
        .map_err(Into::into)
}
