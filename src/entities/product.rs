//! Product entity - Represents a catalog item (SKU) of the footwear inventory.
//!
//! Each product carries a unique `code`, a category, footwear attributes
//! (`shoe_type`, `size`, `color`), the on-hand `quantity`, a `min_stock`
//! alerting threshold, a storage `location`, an optional supplier reference
//! and a unit cost. The on-hand quantity is only ever mutated by the ledger.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Product category. The string values are the persisted column values and
/// match the original VADAF schema exactly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Category {
    /// Raw material (leather, soles, laces)
    #[sea_orm(string_value = "Materia Prima")]
    RawMaterial,
    /// Work in process
    #[sea_orm(string_value = "Producto en Proceso")]
    InProcess,
    /// Finished good ready for sale
    #[sea_orm(string_value = "Producto Terminado")]
    FinishedGood,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::RawMaterial => "Materia Prima",
            Self::InProcess => "Producto en Proceso",
            Self::FinishedGood => "Producto Terminado",
        };
        write!(f, "{label}")
    }
}

/// Derived stock-health classification. Never persisted; computed from the
/// on-hand quantity against the `min_stock` threshold.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StockStatus {
    /// Quantity fell below the minimum threshold
    Critical,
    /// Quantity is within the low band above the threshold
    Low,
    /// Quantity is comfortably above the threshold
    Optimal,
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Critical => "Crítico",
            Self::Low => "Bajo",
            Self::Optimal => "Óptimo",
        };
        write!(f, "{label}")
    }
}

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique SKU code (e.g., "BOT-038-NEG")
    #[sea_orm(unique)]
    pub code: String,
    /// Human-readable product name
    pub name: String,
    /// Inventory category
    pub category: Category,
    /// Type of shoe (e.g., "Bota", "Sneaker")
    pub shoe_type: Option<String>,
    /// Size (e.g., "38", "M")
    pub size: Option<String>,
    /// Color (e.g., "Negro")
    pub color: Option<String>,
    /// On-hand quantity; mutated only through the ledger
    #[sea_orm(default_value = 0)]
    pub quantity: i64,
    /// Alerting threshold for low stock
    #[sea_orm(default_value = 10)]
    pub min_stock: i64,
    /// Warehouse location (e.g., "Zona A, Estante 3")
    pub location: Option<String>,
    /// Supplier reference; must resolve when set
    pub supplier_id: Option<i64>,
    /// Unit cost / production cost
    #[sea_orm(default_value = 0.0)]
    pub unit_cost: f64,
}

impl Model {
    /// Classifies the on-hand quantity against the minimum threshold.
    ///
    /// `low_stock_factor` widens the band above `min_stock` that still counts
    /// as low (1.2 by default, see [`crate::config::settings`]).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stock_status(&self, low_stock_factor: f64) -> StockStatus {
        let low_band = self.min_stock as f64 * low_stock_factor;
        if self.quantity < self.min_stock {
            StockStatus::Critical
        } else if (self.quantity as f64) <= low_band {
            StockStatus::Low
        } else {
            StockStatus::Optimal
        }
    }

    /// Total value of the on-hand stock for this product.
    #[must_use]
    pub fn stock_value(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let quantity = self.quantity as f64;
        quantity * self.unit_cost
    }
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product optionally belongs to one supplier
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id"
    )]
    Supplier,
    /// One product has many stock movements
    #[sea_orm(has_many = "super::movement::Entity")]
    Movements,
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Related<super::movement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
