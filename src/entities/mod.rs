//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod movement;
pub mod product;
pub mod supplier;

// Re-export specific types to avoid conflicts
pub use movement::{
    Column as MovementColumn, Entity as Movement, Model as MovementModel, MovementType,
};
pub use product::{
    Category, Column as ProductColumn, Entity as Product, Model as ProductModel, StockStatus,
};
pub use supplier::{Column as SupplierColumn, Entity as Supplier, Model as SupplierModel};
