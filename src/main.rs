use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vadaf_inventory::config::{database, settings};
use vadaf_inventory::core::report;
use vadaf_inventory::errors::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load settings (inventory.toml + DATABASE_URL override)
    let settings = settings::load_default_settings()?;
    info!(database_url = %settings.database_url, "Loaded settings");

    // 4. Initialize database and ensure the schema exists
    let db = database::create_connection(&settings.database_url).await?;
    database::create_tables(&db).await?;
    info!("Database initialized");

    // 5. Log a dashboard snapshot so a bare startup is still useful
    let summary = report::inventory_summary(&db, settings.low_stock_factor).await?;
    info!(
        total_value = summary.total_value,
        total_items = summary.total_items,
        total_skus = summary.total_skus,
        low_stock_skus = summary.low_stock_skus,
        "Inventory summary"
    );

    for alert in report::low_stock_alerts(&db, settings.low_stock_factor).await? {
        warn!(
            code = %alert.product.code,
            name = %alert.product.name,
            quantity = alert.product.quantity,
            min_stock = alert.product.min_stock,
            status = %alert.status,
            "Low stock"
        );
    }

    Ok(())
}
