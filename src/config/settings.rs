//! Application settings loaded from inventory.toml
//!
//! This module provides the runtime configuration for the inventory core:
//! the database URL and the low-stock classification factor. Settings come
//! from an optional `inventory.toml` file; `DATABASE_URL` in the environment
//! overrides the file. Missing file and missing keys fall back to defaults.

use crate::config::database::DEFAULT_DATABASE_URL;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Factor applied to `min_stock` to delimit the "Bajo" band above the
/// threshold. Inherited from the original system; configurable rather than
/// hard-coded because the 1.2 constant was never confirmed as a business rule.
pub const DEFAULT_LOW_STOCK_FACTOR: f64 = 1.2;

/// Runtime configuration for the inventory core.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Connection URL for the embedded SQLite database
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Multiplier on `min_stock` delimiting the low-stock band
    #[serde(default = "default_low_stock_factor")]
    pub low_stock_factor: f64,
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

const fn default_low_stock_factor() -> f64 {
    DEFAULT_LOW_STOCK_FACTOR
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            low_stock_factor: default_low_stock_factor(),
        }
    }
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read settings file: {e}"),
    })?;

    let mut settings: Settings = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse inventory.toml: {e}"),
    })?;

    if settings.low_stock_factor < 1.0 || !settings.low_stock_factor.is_finite() {
        return Err(Error::Config {
            message: format!(
                "low_stock_factor must be a finite value >= 1.0, got {}",
                settings.low_stock_factor
            ),
        });
    }

    if let Ok(url) = std::env::var("DATABASE_URL") {
        settings.database_url = url;
    }

    Ok(settings)
}

/// Loads settings from the default location (./inventory.toml), falling back
/// to defaults when the file does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be parsed.
pub fn load_default_settings() -> Result<Settings> {
    let path = Path::new("inventory.toml");
    if path.exists() {
        load_settings(path)
    } else {
        let mut settings = Settings::default();
        if let Ok(url) = std::env::var("DATABASE_URL") {
            settings.database_url = url;
        }
        Ok(settings)
    }
}
