use anyhow::Result;
use colored::Colorize;
use msp_pricing::config::{self, Config};
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Prints the effective configuration (file plus environment overrides)
pub fn show(config_path: &Path) -> Result<()> {
    println!("{}", "Loading configuration...".yellow());
    info!("Loading configuration for display");

    let cfg = config::load_config(config_path)?;

    println!("{}", "Current Configuration:".green().bold());
    println!();
    println!("{}", render(&cfg)?);

    info!("Configuration displayed successfully");
    Ok(())
}

/// Execute the config validate command
pub fn validate(config_path: &Path) -> Result<()> {
    println!("{}", "Validating configuration...".yellow());
    info!("Validating configuration file");

    let cfg = config::load_config(config_path)?;

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  Volume Brackets: {}", cfg.pricing.volume_brackets.len());
    println!("  Catalog Services: {}", cfg.catalog.len());
    println!(
        "  Yearly Commitment Discount: {:.0}%",
        cfg.pricing.managed.yearly_commitment_discount * 100.0
    );

    info!("Configuration validation successful");
    Ok(())
}

fn render(cfg: &Config) -> Result<String> {
    Ok(toml::to_string_pretty(cfg)?)
}
