use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use msp_pricing::pricing::ServiceCatalog;
use std::path::Path;

use crate::commands::{format_eur, load_pricing};

/// Execute the catalog command
pub fn execute(config_path: &Path, locale: &str) -> Result<()> {
    let (_, catalog) = load_pricing(config_path)?;

    println!("{} ({})", "Service catalog".bold(), locale);
    println!("{}", catalog_table(&catalog, locale));

    Ok(())
}

fn catalog_table(catalog: &ServiceCatalog, locale: &str) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("NAME").fg(Color::Cyan),
        Cell::new("UNIT").fg(Color::Cyan),
        Cell::new("QUANTITY").fg(Color::Cyan),
        Cell::new("BASE").fg(Color::Cyan),
        Cell::new("PER UNIT").fg(Color::Cyan),
        Cell::new("YEARLY DISCOUNT").fg(Color::Cyan),
    ]);

    for service in catalog.services() {
        table.add_row(vec![
            Cell::new(&service.id),
            Cell::new(service.display_name(locale)),
            Cell::new(&service.unit),
            Cell::new(format!("{}-{}", service.min_quantity, service.max_quantity)),
            Cell::new(format_eur(service.base_price)),
            Cell::new(format_eur(service.price_per_unit)),
            Cell::new(format!("{:.0}%", service.yearly_discount)),
        ]);
    }

    table
}
