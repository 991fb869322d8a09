//! Tabular export of report rows.
//!
//! Serializes the exact row sequences the report functions produce into CSV,
//! with the same column headers the original screens used. The writers take
//! any `io::Write` so callers decide whether the destination is a file or an
//! in-memory buffer handed to a download.

use crate::core::ledger::MovementRecord;
use crate::core::report::{StockReportRow, ValueReport};
use crate::errors::Result;
use std::io::Write;

/// Writes the current-stock report as CSV.
///
/// # Errors
/// Returns an error if serialization or the underlying writer fails.
pub fn write_stock_report<W: Write>(writer: W, rows: &[StockReportRow]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "Código",
        "Nombre",
        "Categoría",
        "Cantidad",
        "Stock Mínimo",
        "Ubicación",
        "Proveedor",
    ])?;

    for row in rows {
        csv.write_record([
            row.code.as_str(),
            row.name.as_str(),
            &row.category.to_string(),
            &row.quantity.to_string(),
            &row.min_stock.to_string(),
            row.location.as_deref().unwrap_or(""),
            row.supplier_name.as_deref().unwrap_or(""),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Writes the inventory-value report as CSV, with a trailing TOTAL row like
/// the original spreadsheet.
///
/// # Errors
/// Returns an error if serialization or the underlying writer fails.
pub fn write_value_report<W: Write>(writer: W, report: &ValueReport) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "Código",
        "Nombre",
        "Categoría",
        "Cantidad",
        "Costo Unitario",
        "Valor Total",
    ])?;

    for row in &report.rows {
        csv.write_record([
            row.code.as_str(),
            row.name.as_str(),
            &row.category.to_string(),
            &row.quantity.to_string(),
            &format!("{:.2}", row.unit_cost),
            &format!("{:.2}", row.total_value),
        ])?;
    }

    csv.write_record([
        "---",
        "---",
        "---",
        "---",
        "TOTAL",
        &format!("{:.2}", report.grand_total),
    ])?;

    csv.flush()?;
    Ok(())
}

/// Writes a movement sequence (history or monthly report) as CSV.
///
/// # Errors
/// Returns an error if serialization or the underlying writer fails.
pub fn write_movement_report<W: Write>(writer: W, records: &[MovementRecord]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "Fecha",
        "Producto",
        "Código",
        "Tipo",
        "Cantidad",
        "Observaciones",
    ])?;

    for record in records {
        csv.write_record([
            &record.movement.date.format("%Y-%m-%d %H:%M").to_string(),
            record.product_name.as_str(),
            record.product_code.as_str(),
            &record.movement.movement_type.to_string(),
            &record.movement.quantity.to_string(),
            record.movement.notes.as_deref().unwrap_or(""),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::ledger::record_movement;
    use crate::core::report;
    use crate::entities::MovementType;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_stock_report_csv() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_product_with_qty(&db, "BOT-001", "Bota Negra", 25).await?;

        let rows = report::current_stock_report(&db).await?;
        let mut buffer = Vec::new();
        write_stock_report(&mut buffer, &rows)?;

        let csv = String::from_utf8(buffer).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Código,Nombre,Categoría,Cantidad,Stock Mínimo,Ubicación,Proveedor"
        );
        assert_eq!(
            lines.next().unwrap(),
            "BOT-001,Bota Negra,Producto Terminado,25,10,,"
        );
        assert!(lines.next().is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_value_report_csv_has_total_row() -> Result<()> {
        let db = setup_test_db().await?;
        create_custom_product(
            &db,
            "BOT-001",
            "Bota Negra",
            crate::entities::Category::FinishedGood,
            4,
            12.5,
        )
        .await?;

        let value_report = report::inventory_value_report(&db).await?;
        let mut buffer = Vec::new();
        write_value_report(&mut buffer, &value_report)?;

        let csv = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "BOT-001,Bota Negra,Producto Terminado,4,12.50,50.00");
        assert_eq!(lines[2], "---,---,---,---,TOTAL,50.00");

        Ok(())
    }

    #[tokio::test]
    async fn test_movement_report_csv() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_test_product_with_qty(&db, "BOT-001", "Bota Negra", 10).await?;
        record_movement(
            &db,
            product.id,
            MovementType::Salida,
            2,
            Some("Venta #123".to_string()),
        )
        .await?;

        let records =
            crate::core::ledger::movement_history(&db, &Default::default()).await?;
        let mut buffer = Vec::new();
        write_movement_report(&mut buffer, &records)?;

        let csv = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Fecha,Producto,Código,Tipo,Cantidad,Observaciones"
        );
        assert!(lines[1].ends_with(",Bota Negra,BOT-001,Salida,2,Venta #123"));

        Ok(())
    }
}
