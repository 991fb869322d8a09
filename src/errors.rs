//! Unified error types for the inventory core.
//!
//! Every operation reports failures through this enum so the presentation
//! layer can branch on the error kind instead of matching database error
//! text. Constraint breaches are classified before they ever reach a caller.

use thiserror::Error;

/// All failure conditions surfaced by the catalog, ledger and report layers.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or missing input (empty required field, non-positive quantity).
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A uniqueness constraint would be breached (duplicate product code or supplier NIT).
    #[error("{field} '{value}' already exists")]
    ConstraintViolation { field: &'static str, value: String },

    /// A delete is blocked by dependent rows.
    #[error("Referential conflict: {message}")]
    ReferentialConflict { message: String },

    /// An identifier did not resolve to a record.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// A withdrawal would drive the on-hand quantity below zero.
    #[error("Insufficient stock: requested {requested}, only {current} on hand")]
    InsufficientStock { current: i64, requested: i64 },

    /// A movement row was written but the stock update could not be undone.
    /// Surfaced distinctly so the inconsistency is never silently swallowed.
    #[error("Partial commit: {message}")]
    PartialCommit { message: String },

    /// Configuration loading or parsing failure.
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
