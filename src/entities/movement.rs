//! Movement entity - Represents the append-only stock movement ledger.
//!
//! Each movement references a product, carries a direction (`Entrada` for
//! inbound, `Salida` for outbound), a positive quantity, a server-assigned
//! timestamp and free-text notes. Movements are never updated or deleted;
//! corrections are made by recording a compensating movement.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a stock movement. The string values are the persisted column
/// values and match the original VADAF schema exactly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum MovementType {
    /// Inbound movement; increases on-hand quantity
    #[sea_orm(string_value = "Entrada")]
    Entrada,
    /// Outbound movement; decreases on-hand quantity
    #[sea_orm(string_value = "Salida")]
    Salida,
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Entrada => "Entrada",
            Self::Salida => "Salida",
        };
        write!(f, "{label}")
    }
}

/// Movement database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "movements")]
pub struct Model {
    /// Unique identifier for the movement
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the product this movement applies to
    pub product_id: i64,
    /// Inbound (`Entrada`) or outbound (`Salida`)
    #[sea_orm(column_name = "type")]
    pub movement_type: MovementType,
    /// Number of units moved; always positive
    pub quantity: i64,
    /// When the movement was recorded (server-assigned, not user-editable)
    pub date: DateTimeUtc,
    /// Free-text notes (e.g., "Venta #123", "Compra a Proveedor X")
    pub notes: Option<String>,
}

/// Defines relationships between Movement and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each movement belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
