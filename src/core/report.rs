//! Report generation business logic.
//!
//! Read-only projections over the catalog and the ledger: the dashboard KPI
//! summary, low-stock alerts, per-category aggregates and the three tabular
//! reports the original screens offered (current stock, inventory value,
//! monthly movements). All functions return structured data that the
//! presentation layer formats; none of them ever writes.

use crate::{
    core::{
        ledger::{self, HistoryFilter, MovementRecord},
        product::{self, ProductFilter, ProductRow},
    },
    entities::{Category, StockStatus, product as product_entity},
    errors::{Error, Result},
};
use chrono::{NaiveDate, NaiveTime};
use sea_orm::{DatabaseConnection, prelude::*};
use std::collections::BTreeMap;

/// Dashboard KPI summary across the whole catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct InventorySummary {
    /// Total inventory value: Σ quantity × unit cost
    pub total_value: f64,
    /// Total on-hand units across all products
    pub total_items: i64,
    /// Number of distinct SKUs in the catalog
    pub total_skus: usize,
    /// Number of SKUs currently at Crítico or Bajo
    pub low_stock_skus: usize,
}

/// A product whose stock health warrants attention.
#[derive(Debug, Clone, PartialEq)]
pub struct LowStockAlert {
    /// The affected product
    pub product: product_entity::Model,
    /// Crítico or Bajo
    pub status: StockStatus,
}

/// Per-category stock totals for the dashboard charts.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    /// Inventory category
    pub category: Category,
    /// Σ quantity within the category
    pub total_quantity: i64,
    /// Σ quantity × unit cost within the category
    pub total_value: f64,
}

/// One row of the current-stock report.
#[derive(Debug, Clone, PartialEq)]
pub struct StockReportRow {
    /// SKU code
    pub code: String,
    /// Product name
    pub name: String,
    /// Inventory category
    pub category: Category,
    /// On-hand quantity
    pub quantity: i64,
    /// Low-stock threshold
    pub min_stock: i64,
    /// Warehouse location
    pub location: Option<String>,
    /// Supplier name, when one is referenced
    pub supplier_name: Option<String>,
}

/// One row of the inventory-value report.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueReportRow {
    /// SKU code
    pub code: String,
    /// Product name
    pub name: String,
    /// Inventory category
    pub category: Category,
    /// On-hand quantity
    pub quantity: i64,
    /// Unit cost
    pub unit_cost: f64,
    /// quantity × unit cost
    pub total_value: f64,
}

/// The inventory-value report: rows ordered by value descending plus the
/// grand total across the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueReport {
    /// Per-product rows, highest value first
    pub rows: Vec<ValueReportRow>,
    /// Σ of all row values
    pub grand_total: f64,
}

/// Entrada/Salida totals for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyMovements {
    /// The calendar day (UTC)
    pub day: NaiveDate,
    /// Units received that day
    pub entradas: i64,
    /// Units withdrawn that day
    pub salidas: i64,
}

/// Computes the dashboard KPI summary.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn inventory_summary(
    db: &DatabaseConnection,
    low_stock_factor: f64,
) -> Result<InventorySummary> {
    let products = crate::entities::Product::find().all(db).await?;

    let total_value = products.iter().map(product_entity::Model::stock_value).sum();
    let total_items = products.iter().map(|p| p.quantity).sum();
    let total_skus = products.len();
    let low_stock_skus = products
        .iter()
        .filter(|p| p.stock_status(low_stock_factor) != StockStatus::Optimal)
        .count();

    Ok(InventorySummary {
        total_value,
        total_items,
        total_skus,
        low_stock_skus,
    })
}

/// Lists products at Crítico or Bajo, worst (lowest quantity) first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn low_stock_alerts(
    db: &DatabaseConnection,
    low_stock_factor: f64,
) -> Result<Vec<LowStockAlert>> {
    let products = crate::entities::Product::find().all(db).await?;

    let mut alerts: Vec<LowStockAlert> = products
        .into_iter()
        .filter_map(|p| {
            let status = p.stock_status(low_stock_factor);
            (status != StockStatus::Optimal).then_some(LowStockAlert { product: p, status })
        })
        .collect();
    alerts.sort_by_key(|a| a.product.quantity);

    Ok(alerts)
}

/// Aggregates quantity and value per category for the dashboard charts.
/// Categories with no products are omitted.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn stock_by_category(db: &DatabaseConnection) -> Result<Vec<CategoryBreakdown>> {
    let products = crate::entities::Product::find().all(db).await?;

    let mut totals: BTreeMap<String, CategoryBreakdown> = BTreeMap::new();
    for p in products {
        let entry = totals
            .entry(p.category.to_string())
            .or_insert_with(|| CategoryBreakdown {
                category: p.category,
                total_quantity: 0,
                total_value: 0.0,
            });
        entry.total_quantity += p.quantity;
        entry.total_value += p.stock_value();
    }

    Ok(totals.into_values().collect())
}

/// Produces the current-stock report: every product ordered by name, joined
/// with its supplier's name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn current_stock_report(db: &DatabaseConnection) -> Result<Vec<StockReportRow>> {
    let rows = product::list_products(db, &ProductFilter::default()).await?;

    Ok(rows
        .into_iter()
        .map(|ProductRow { product, supplier_name }| StockReportRow {
            code: product.code,
            name: product.name,
            category: product.category,
            quantity: product.quantity,
            min_stock: product.min_stock,
            location: product.location,
            supplier_name,
        })
        .collect())
}

/// Produces the inventory-value report, rows ordered by total value
/// descending, with the grand total appended.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn inventory_value_report(db: &DatabaseConnection) -> Result<ValueReport> {
    let products = crate::entities::Product::find().all(db).await?;

    let mut rows: Vec<ValueReportRow> = products
        .into_iter()
        .map(|p| {
            let total_value = p.stock_value();
            ValueReportRow {
                code: p.code,
                name: p.name,
                category: p.category,
                quantity: p.quantity,
                unit_cost: p.unit_cost,
                total_value,
            }
        })
        .collect();
    rows.sort_by(|a, b| b.total_value.total_cmp(&a.total_value));

    let grand_total = rows.iter().map(|r| r.total_value).sum();

    Ok(ValueReport { rows, grand_total })
}

/// Produces the monthly-movements report: every movement within the given
/// calendar month (UTC), most recent first, joined with product name/code.
///
/// # Errors
/// Returns `Validation` if year/month do not form a valid date, or a
/// database error.
pub async fn monthly_movements_report(
    db: &DatabaseConnection,
    year: i32,
    month: u32,
) -> Result<Vec<MovementRecord>> {
    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| Error::Validation {
        message: format!("Invalid report month: {year}-{month}"),
    })?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| Error::Validation {
        message: format!("Invalid report month: {year}-{month}"),
    })?;

    let filter = HistoryFilter {
        from: Some(start.and_time(NaiveTime::MIN).and_utc()),
        to: Some(end.and_time(NaiveTime::MIN).and_utc()),
        ..Default::default()
    };

    ledger::movement_history(db, &filter).await
}

/// Groups movements within `[from, to)` by calendar day (UTC), summing
/// Entrada and Salida units separately. Days without movements are omitted.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn movements_by_day(
    db: &DatabaseConnection,
    from: DateTimeUtc,
    to: DateTimeUtc,
) -> Result<Vec<DailyMovements>> {
    let records = ledger::movement_history(
        db,
        &HistoryFilter {
            from: Some(from),
            to: Some(to),
            ..Default::default()
        },
    )
    .await?;

    let mut days: BTreeMap<NaiveDate, DailyMovements> = BTreeMap::new();
    for record in records {
        let day = record.movement.date.date_naive();
        let entry = days.entry(day).or_insert_with(|| DailyMovements {
            day,
            entradas: 0,
            salidas: 0,
        });
        match record.movement.movement_type {
            crate::entities::MovementType::Entrada => entry.entradas += record.movement.quantity,
            crate::entities::MovementType::Salida => entry.salidas += record.movement.quantity,
        }
    }

    Ok(days.into_values().collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::ledger::record_movement;
    use crate::entities::MovementType;
    use crate::test_utils::*;
    use chrono::{Datelike, Utc};

    #[tokio::test]
    async fn test_inventory_summary() -> Result<()> {
        let db = setup_test_db().await?;

        // 20 units at 2.0 and 5 units at 10.0; min_stock defaults to 10 so
        // the second product sits below its threshold.
        create_custom_product(&db, "BOT-001", "Bota Negra", Category::FinishedGood, 20, 2.0)
            .await?;
        create_custom_product(&db, "CUE-001", "Cuero", Category::RawMaterial, 5, 10.0).await?;

        let summary = inventory_summary(&db, 1.2).await?;
        assert_eq!(summary.total_value, 90.0);
        assert_eq!(summary.total_items, 25);
        assert_eq!(summary.total_skus, 2);
        assert_eq!(summary.low_stock_skus, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_inventory_summary_empty_catalog() -> Result<()> {
        let db = setup_test_db().await?;

        let summary = inventory_summary(&db, 1.2).await?;
        assert_eq!(summary.total_value, 0.0);
        assert_eq!(summary.total_items, 0);
        assert_eq!(summary.total_skus, 0);
        assert_eq!(summary.low_stock_skus, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_low_stock_alerts_ordered_worst_first() -> Result<()> {
        let db = setup_test_db().await?;

        // min_stock 10: 3 → Crítico, 11 → Bajo, 30 → Óptimo
        create_test_product_with_qty(&db, "A-001", "Crítico", 3).await?;
        create_test_product_with_qty(&db, "B-001", "Bajo", 11).await?;
        create_test_product_with_qty(&db, "C-001", "Óptimo", 30).await?;

        let alerts = low_stock_alerts(&db, 1.2).await?;
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].product.code, "A-001");
        assert_eq!(alerts[0].status, StockStatus::Critical);
        assert_eq!(alerts[1].product.code, "B-001");
        assert_eq!(alerts[1].status, StockStatus::Low);

        Ok(())
    }

    #[tokio::test]
    async fn test_stock_by_category() -> Result<()> {
        let db = setup_test_db().await?;

        create_custom_product(&db, "BOT-001", "Bota", Category::FinishedGood, 10, 5.0).await?;
        create_custom_product(&db, "BOT-002", "Sneaker", Category::FinishedGood, 5, 8.0).await?;
        create_custom_product(&db, "CUE-001", "Cuero", Category::RawMaterial, 100, 1.5).await?;

        let breakdown = stock_by_category(&db).await?;
        assert_eq!(breakdown.len(), 2);

        let raw = breakdown
            .iter()
            .find(|b| b.category == Category::RawMaterial)
            .unwrap();
        assert_eq!(raw.total_quantity, 100);
        assert_eq!(raw.total_value, 150.0);

        let finished = breakdown
            .iter()
            .find(|b| b.category == Category::FinishedGood)
            .unwrap();
        assert_eq!(finished.total_quantity, 15);
        assert_eq!(finished.total_value, 90.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_current_stock_report_includes_supplier() -> Result<()> {
        let db = setup_test_db().await?;

        let supplier = create_test_supplier(&db, "Cueros del Valle").await?;
        create_product_for_supplier(&db, "CUE-001", supplier.id).await?;

        let rows = current_stock_report(&db).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].code, "CUE-001");
        assert_eq!(rows[0].supplier_name, Some("Cueros del Valle".to_string()));

        Ok(())
    }

    #[tokio::test]
    async fn test_inventory_value_report_order_and_total() -> Result<()> {
        let db = setup_test_db().await?;

        create_custom_product(&db, "A-001", "Barato", Category::FinishedGood, 10, 1.0).await?;
        create_custom_product(&db, "B-001", "Caro", Category::FinishedGood, 10, 9.0).await?;

        let report = inventory_value_report(&db).await?;
        assert_eq!(report.rows.len(), 2);
        // Highest value first
        assert_eq!(report.rows[0].code, "B-001");
        assert_eq!(report.rows[0].total_value, 90.0);
        assert_eq!(report.rows[1].total_value, 10.0);
        assert_eq!(report.grand_total, 100.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_monthly_movements_report_bounds() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_test_product_with_qty(&db, "BOT-001", "Bota Negra", 10).await?;

        record_movement(&db, product.id, MovementType::Entrada, 5, None).await?;

        let now = Utc::now();
        let this_month = monthly_movements_report(&db, now.year(), now.month()).await?;
        assert_eq!(this_month.len(), 1);
        assert_eq!(this_month[0].product_code, "BOT-001");

        // A different month sees nothing
        let (prev_year, prev_month) = if now.month() == 1 {
            (now.year() - 1, 12)
        } else {
            (now.year(), now.month() - 1)
        };
        let previous = monthly_movements_report(&db, prev_year, prev_month).await?;
        assert!(previous.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_monthly_movements_report_invalid_month() -> Result<()> {
        let db = setup_test_db().await?;

        let result = monthly_movements_report(&db, 2024, 13).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_movements_by_day_groups_directions() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_test_product_with_qty(&db, "BOT-001", "Bota Negra", 50).await?;

        let from = Utc::now() - chrono::Duration::hours(1);
        record_movement(&db, product.id, MovementType::Entrada, 5, None).await?;
        record_movement(&db, product.id, MovementType::Entrada, 3, None).await?;
        record_movement(&db, product.id, MovementType::Salida, 2, None).await?;
        let to = Utc::now() + chrono::Duration::hours(1);

        let days = movements_by_day(&db, from, to).await?;
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].entradas, 8);
        assert_eq!(days[0].salidas, 2);
        assert_eq!(days[0].day, Utc::now().date_naive());

        Ok(())
    }
}
