//! Supplier entity - Represents the supplier registry.
//!
//! Each supplier has a legal name, an optional tax identifier (NIT) that must
//! be unique when present, contact details and an average delivery lead time.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Supplier database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
    /// Unique identifier for the supplier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Legal name / business name (required)
    pub name: String,
    /// Tax identifier (NIT); unique across all suppliers when present
    #[sea_orm(unique)]
    pub nit: Option<String>,
    /// Contact person name
    pub contact_person: Option<String>,
    /// Contact email address
    pub email: Option<String>,
    /// Average delivery lead time in days
    pub avg_delivery_time_days: Option<i32>,
}

/// Defines relationships between Supplier and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One supplier provides many products
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
