use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use msp_pricing::pricing::{generate_quote, PricingQuote, QuoteSelection};
use std::path::Path;

use crate::commands::{format_eur, load_pricing};

/// Execute the quote command
pub fn execute(config_path: &Path, selections: &[QuoteSelection]) -> Result<()> {
    let (_, catalog) = load_pricing(config_path)?;
    let quote = generate_quote(&catalog, selections, Utc::now())?;

    println!("{} {}", "Quote".bold(), quote.id.dimmed());
    println!(
        "  Valid until {}",
        quote.expires_at.format("%Y-%m-%d").to_string().yellow()
    );
    println!();
    println!("{}", quote_table(&quote));
    println!();
    println!("  {}: {}", "Total per month".cyan(), format_eur(quote.total_monthly));
    println!("  {}: {}", "Total per year".cyan(), format_eur(quote.total_yearly));
    if quote.discount_amount > 0.0 {
        println!(
            "  {}: {}",
            "Yearly billing discount".cyan(),
            format_eur(quote.discount_amount).green()
        );
    }

    Ok(())
}

fn quote_table(quote: &PricingQuote) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("SERVICE").fg(Color::Cyan),
        Cell::new("QUANTITY").fg(Color::Cyan),
        Cell::new("MONTHLY").fg(Color::Cyan),
        Cell::new("YEARLY").fg(Color::Cyan),
        Cell::new("DISCOUNT").fg(Color::Cyan),
    ]);

    for line in &quote.lines {
        table.add_row(vec![
            Cell::new(&line.name),
            Cell::new(line.quantity),
            Cell::new(format_eur(line.monthly_price)),
            Cell::new(format_eur(line.yearly_price)),
            Cell::new(format!("{:.0}%", line.yearly_discount_percentage)),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use msp_pricing::pricing::ServiceCatalog;

    #[test]
    fn test_quote_table_rows() {
        let quote = generate_quote(
            &ServiceCatalog::default(),
            &[
                QuoteSelection::new("server-management", 2),
                QuoteSelection::new("network-management", 1),
            ],
            Utc::now(),
        )
        .unwrap();
        let rendered = quote_table(&quote).to_string();

        assert!(rendered.contains("Serverbeheer"));
        assert!(rendered.contains("€240.00"));
        assert!(rendered.contains("€2592.00"));
        assert!(rendered.contains("Netwerkbeheer"));
    }
}
