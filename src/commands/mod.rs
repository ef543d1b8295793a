//! Command implementations for the CLI
//!
//! This module contains the implementation of all CLI commands:
//! - start: Start the pricing API server
//! - test: Test configuration validity
//! - config: Configuration display and validation
//! - estimate: Compare the three support models for a customer
//! - quote: Price a selection of catalog services
//! - catalog: List the service catalog

pub mod catalog;
pub mod config;
pub mod estimate;
pub mod quote;
pub mod start;

use anyhow::Result;
use msp_pricing::{
    config::load_config,
    pricing::{PriceTable, ServiceCatalog},
};
use std::path::Path;
use tracing::info;

/// Price table and catalog for the offline commands.
///
/// Uses the configuration file when it exists and the built-in prices
/// otherwise, so `estimate` works without any setup.
pub fn load_pricing(config_path: &Path) -> Result<(PriceTable, ServiceCatalog)> {
    if config_path.exists() {
        let cfg = load_config(config_path)?;
        return Ok((cfg.pricing, cfg.catalog));
    }

    info!(
        "{} not found, using built-in prices",
        config_path.display()
    );
    Ok((PriceTable::default(), ServiceCatalog::default()))
}

/// Euro amount with two decimals
pub fn format_eur(amount: f64) -> String {
    format!("€{:.2}", amount)
}
