//! Ledger business logic - records stock movements and keeps quantities consistent.
//!
//! This module holds the only write authority over `Product::quantity`.
//! Recording a movement validates the input, inserts the immutable movement
//! row and applies the quantity change inside a single database transaction.
//! The quantity write is a guarded atomic SQL expression
//! (`quantity = quantity + delta` filtered on `quantity + delta >= 0`), so
//! two concurrent withdrawals can never drive stock negative: the guard
//! makes the later one fail even if both passed the preliminary check.

use crate::{
    entities::{Movement, MovementType, Product, movement, product},
    errors::{Error, Result},
};
use sea_orm::{
    QueryOrder, QuerySelect, Set, TransactionTrait,
    prelude::*,
    sea_query::{Expr, ExprTrait},
};

/// Outcome of a successful movement: the persisted row and the quantity it
/// left on hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementReceipt {
    /// The immutable movement row as written
    pub movement: movement::Model,
    /// On-hand quantity after the movement was applied
    pub new_quantity: i64,
}

/// Filter for [`movement_history`]. Defaults select everything, unbounded.
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    /// Restrict to one product
    pub product_id: Option<i64>,
    /// Inclusive lower bound on the movement date
    pub from: Option<DateTimeUtc>,
    /// Exclusive upper bound on the movement date
    pub to: Option<DateTimeUtc>,
    /// Maximum number of rows, most recent first
    pub limit: Option<u64>,
}

/// A movement joined with the product it applies to, as the history screen
/// and the monthly report display it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementRecord {
    /// The movement row
    pub movement: movement::Model,
    /// Name of the referenced product
    pub product_name: String,
    /// SKU code of the referenced product
    pub product_code: String,
}

/// Records a stock movement and applies it to the product's on-hand
/// quantity as one atomic unit.
///
/// A `Salida` that exceeds the current stock is refused before anything is
/// written. Both writes run in one transaction; the quantity update carries
/// a non-negativity guard in SQL, so a concurrent withdrawal that slips in
/// between the check and the write makes this call fail cleanly with
/// `InsufficientStock` instead of overdrawing.
///
/// # Errors
/// - `Validation` if `quantity <= 0`
/// - `NotFound` if the product does not resolve
/// - `InsufficientStock` if a `Salida` exceeds the on-hand quantity
/// - `PartialCommit` if the stock write failed after the movement insert and
///   the rollback also failed
pub async fn record_movement(
    db: &DatabaseConnection,
    product_id: i64,
    movement_type: MovementType,
    quantity: i64,
    notes: Option<String>,
) -> Result<MovementReceipt> {
    if quantity <= 0 {
        return Err(Error::Validation {
            message: format!("Movement quantity must be positive, got {quantity}"),
        });
    }

    // One transaction around check, insert and update; dropping it rolls back.
    let txn = db.begin().await?;

    let current = Product::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "product",
            id: product_id.to_string(),
        })?;

    let delta = match movement_type {
        MovementType::Entrada => quantity,
        MovementType::Salida => -quantity,
    };

    if movement_type == MovementType::Salida && quantity > current.quantity {
        return Err(Error::InsufficientStock {
            current: current.quantity,
            requested: quantity,
        });
    }

    let movement = movement::ActiveModel {
        product_id: Set(product_id),
        movement_type: Set(movement_type),
        quantity: Set(quantity),
        date: Set(chrono::Utc::now()),
        notes: Set(notes),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    // Guarded atomic update: quantity = quantity + delta, refused at the SQL
    // level if the result would be negative.
    let update = Product::update_many()
        .col_expr(
            product::Column::Quantity,
            Expr::col(product::Column::Quantity).add(delta),
        )
        .filter(product::Column::Id.eq(product_id))
        .filter(Expr::col(product::Column::Quantity).add(delta).gte(0))
        .exec(&txn)
        .await;

    let update = match update {
        Ok(res) => res,
        Err(e) => {
            // The movement row is already in this transaction; if the
            // rollback fails too, the ledger and the stock may disagree.
            if let Err(rollback_err) = txn.rollback().await {
                return Err(Error::PartialCommit {
                    message: format!(
                        "stock update for product {product_id} failed ({e}) and rollback failed ({rollback_err})"
                    ),
                });
            }
            return Err(e.into());
        }
    };

    if update.rows_affected == 0 {
        // A concurrent withdrawal consumed the stock between our read and
        // the guarded write.
        txn.rollback().await?;
        return Err(Error::InsufficientStock {
            current: current.quantity,
            requested: quantity,
        });
    }

    let updated = Product::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "product",
            id: product_id.to_string(),
        })?;

    txn.commit().await?;

    Ok(MovementReceipt {
        movement,
        new_quantity: updated.quantity,
    })
}

/// Overrides a product's on-hand quantity by synthesizing a compensating
/// movement for the difference, so even a direct stock correction leaves a
/// ledger row behind. Returns `None` when the quantity already matches.
///
/// # Errors
/// Returns `Validation` if `new_quantity` is negative, `NotFound` if the
/// product does not resolve, plus any [`record_movement`] failure.
pub async fn record_adjustment(
    db: &DatabaseConnection,
    product_id: i64,
    new_quantity: i64,
    notes: Option<String>,
) -> Result<Option<MovementReceipt>> {
    if new_quantity < 0 {
        return Err(Error::Validation {
            message: format!("Adjusted quantity cannot be negative, got {new_quantity}"),
        });
    }

    let current = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "product",
            id: product_id.to_string(),
        })?;

    let delta = new_quantity - current.quantity;
    if delta == 0 {
        return Ok(None);
    }

    let (movement_type, quantity) = if delta > 0 {
        (MovementType::Entrada, delta)
    } else {
        (MovementType::Salida, -delta)
    };

    let notes = notes.or_else(|| Some("Ajuste de inventario".to_string()));
    record_movement(db, product_id, movement_type, quantity, notes)
        .await
        .map(Some)
}

/// Retrieves movement history joined with product name/code, most recent
/// first, optionally bounded by product, date interval and row count.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn movement_history(
    db: &DatabaseConnection,
    filter: &HistoryFilter,
) -> Result<Vec<MovementRecord>> {
    let mut query = Movement::find().find_also_related(Product);

    if let Some(product_id) = filter.product_id {
        query = query.filter(movement::Column::ProductId.eq(product_id));
    }
    if let Some(from) = filter.from {
        query = query.filter(movement::Column::Date.gte(from));
    }
    if let Some(to) = filter.to {
        query = query.filter(movement::Column::Date.lt(to));
    }

    let rows = query
        .order_by_desc(movement::Column::Date)
        .order_by_desc(movement::Column::Id)
        .limit(filter.limit)
        .all(db)
        .await?;

    rows.into_iter()
        .map(|(movement, product)| {
            let product = product.ok_or_else(|| Error::NotFound {
                entity: "product",
                id: movement.product_id.to_string(),
            })?;
            Ok(MovementRecord {
                movement,
                product_name: product.name,
                product_code: product.code,
            })
        })
        .collect()
}
