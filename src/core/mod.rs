//! Core business logic - framework-agnostic catalog, ledger and reporting operations.
//!
//! The catalog modules ([`supplier`], [`product`]) own the Supplier and
//! Product records and enforce the schema invariants. The [`ledger`] module
//! is the only writer of `Product::quantity`: every stock change produces an
//! immutable movement row. The [`report`] module provides read-only
//! projections for dashboards and exports.

pub mod ledger;
pub mod product;
pub mod report;
pub mod supplier;
