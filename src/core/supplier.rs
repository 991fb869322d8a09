//! Supplier business logic - Handles all supplier-related operations.
//!
//! Provides functions for creating, retrieving, updating and deleting
//! suppliers. The NIT (tax identifier) uniqueness constraint is checked
//! structurally before any write so callers get a classified
//! `ConstraintViolation` instead of raw database error text. Deletion is
//! blocked while any product still references the supplier.

use crate::{
    entities::{Product, Supplier, product, supplier},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};

/// Mutable supplier fields, shared by create and full-record update.
#[derive(Debug, Clone, Default)]
pub struct SupplierInput {
    /// Legal name / business name (required)
    pub name: String,
    /// Tax identifier; empty strings are normalized to None
    pub nit: Option<String>,
    /// Contact person name
    pub contact_person: Option<String>,
    /// Contact email address
    pub email: Option<String>,
    /// Average delivery lead time in days
    pub avg_delivery_time_days: Option<i32>,
}

/// Trims the name and normalizes an empty NIT to None so blank form fields
/// can never collide on the unique index.
fn normalize(input: SupplierInput) -> Result<SupplierInput> {
    let SupplierInput {
        name,
        nit,
        contact_person,
        email,
        avg_delivery_time_days,
    } = input;

    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Supplier name cannot be empty".to_string(),
        });
    }

    let nit = nit.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());

    Ok(SupplierInput {
        name,
        nit,
        contact_person,
        email,
        avg_delivery_time_days,
    })
}

/// Fails with `ConstraintViolation` if another supplier already carries the
/// NIT. `exclude_id` skips the record being updated.
async fn check_nit_unique(
    db: &DatabaseConnection,
    nit: &str,
    exclude_id: Option<i64>,
) -> Result<()> {
    let mut query = Supplier::find().filter(supplier::Column::Nit.eq(nit));
    if let Some(id) = exclude_id {
        query = query.filter(supplier::Column::Id.ne(id));
    }

    if query.one(db).await?.is_some() {
        return Err(Error::ConstraintViolation {
            field: "nit",
            value: nit.to_string(),
        });
    }
    Ok(())
}

/// Creates a new supplier, performing input validation.
///
/// # Errors
/// Returns `Validation` if the name is empty, `ConstraintViolation` if the
/// NIT collides with an existing supplier, or a database error.
pub async fn create_supplier(
    db: &DatabaseConnection,
    input: SupplierInput,
) -> Result<supplier::Model> {
    let input = normalize(input)?;

    if let Some(nit) = &input.nit {
        check_nit_unique(db, nit, None).await?;
    }

    let supplier = supplier::ActiveModel {
        name: Set(input.name),
        nit: Set(input.nit),
        contact_person: Set(input.contact_person),
        email: Set(input.email),
        avg_delivery_time_days: Set(input.avg_delivery_time_days),
        ..Default::default()
    };

    supplier.insert(db).await.map_err(Into::into)
}

/// Replaces all mutable fields of an existing supplier.
///
/// # Errors
/// Returns `NotFound` if the id does not resolve; otherwise the same
/// failures as [`create_supplier`], with the NIT uniqueness check excluding
/// the record itself.
pub async fn update_supplier(
    db: &DatabaseConnection,
    supplier_id: i64,
    input: SupplierInput,
) -> Result<supplier::Model> {
    let input = normalize(input)?;

    Supplier::find_by_id(supplier_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "supplier",
            id: supplier_id.to_string(),
        })?;

    if let Some(nit) = &input.nit {
        check_nit_unique(db, nit, Some(supplier_id)).await?;
    }

    let supplier = supplier::ActiveModel {
        id: Set(supplier_id),
        name: Set(input.name),
        nit: Set(input.nit),
        contact_person: Set(input.contact_person),
        email: Set(input.email),
        avg_delivery_time_days: Set(input.avg_delivery_time_days),
    };

    supplier.update(db).await.map_err(Into::into)
}

/// Deletes a supplier, refusing while any product still references it.
///
/// # Errors
/// Returns `NotFound` if the id does not resolve and `ReferentialConflict`
/// if one or more products reference the supplier.
pub async fn delete_supplier(db: &DatabaseConnection, supplier_id: i64) -> Result<()> {
    let supplier = Supplier::find_by_id(supplier_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "supplier",
            id: supplier_id.to_string(),
        })?;

    let referencing = Product::find()
        .filter(product::Column::SupplierId.eq(supplier_id))
        .count(db)
        .await?;
    if referencing > 0 {
        return Err(Error::ReferentialConflict {
            message: format!(
                "supplier '{}' is referenced by {referencing} product(s)",
                supplier.name
            ),
        });
    }

    supplier.delete(db).await?;
    Ok(())
}

/// Retrieves all suppliers, ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_suppliers(db: &DatabaseConnection) -> Result<Vec<supplier::Model>> {
    Supplier::find()
        .order_by_asc(supplier::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific supplier by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_supplier_by_id(
    db: &DatabaseConnection,
    supplier_id: i64,
) -> Result<Option<supplier::Model>> {
    Supplier::find_by_id(supplier_id)
        .one(db)
        .await
        .map_err(Into::into)
}
