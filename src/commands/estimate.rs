use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use msp_pricing::pricing::{compare_tiers, CustomerProfile, PricingResult, SavingsComparison, TierComparison};
use std::path::Path;
use tracing::info;

use crate::commands::{format_eur, load_pricing};

/// Execute the estimate command
pub fn execute(config_path: &Path, profile: CustomerProfile) -> Result<()> {
    let (table, _) = load_pricing(config_path)?;
    let comparison = compare_tiers(&table, &profile)?;

    info!(
        employees = profile.employees,
        servers = profile.servers,
        "Estimated pricing tiers"
    );

    println!(
        "{}",
        format!(
            "Estimate for {} employees, {} servers ({} security, {} SLA, {} support, {} billing)",
            profile.employees,
            profile.servers,
            profile.security_level,
            profile.sla_level,
            profile.support_type,
            profile.commitment
        )
        .bold()
    );
    println!();
    println!("{}", tiers_table(&comparison));
    println!();

    println!("{}", "Managed breakdown:".cyan());
    println!("{}", breakdown_table(&comparison.managed));
    println!();

    match &comparison.roi {
        Some(roi) => {
            let payback = match roi.payback_months {
                Some(months) => format!("{} months", months),
                None => "never".to_string(),
            };
            println!("  {}: {}", "Payback".cyan(), payback);
            println!("  {}: {}", "3-year savings".cyan(), format_eur(roi.three_year_savings));
            println!("  {}: {}", "5-year savings".cyan(), format_eur(roi.five_year_savings));
        }
        None => println!("  {}", "No ad-hoc baseline to compare against".dimmed()),
    }

    Ok(())
}

fn tiers_table(comparison: &TierComparison) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("MODEL").fg(Color::Cyan),
        Cell::new("MONTHLY").fg(Color::Cyan),
        Cell::new("YEARLY").fg(Color::Cyan),
        Cell::new("VS AD-HOC").fg(Color::Cyan),
    ]);

    let rows = [
        (&comparison.adhoc, None),
        (&comparison.prepaid, comparison.prepaid_savings.as_ref()),
        (&comparison.managed, comparison.managed_savings.as_ref()),
    ];
    for (result, savings) in rows {
        table.add_row(vec![
            Cell::new(result.model),
            Cell::new(format_eur(result.monthly_total)),
            Cell::new(format_eur(result.yearly_total)),
            savings_cell(savings),
        ]);
    }

    table
}

fn savings_cell(savings: Option<&SavingsComparison>) -> Cell {
    match savings {
        Some(s) if s.monthly_savings >= 0.0 => Cell::new(format!(
            "-{} ({:.0}%)",
            format_eur(s.monthly_savings),
            s.percentage_savings
        ))
        .fg(Color::Green),
        Some(s) => Cell::new(format!(
            "+{} ({:.0}%)",
            format_eur(-s.monthly_savings),
            s.percentage_savings
        ))
        .fg(Color::Red),
        None => Cell::new("-"),
    }
}

fn breakdown_table(result: &PricingResult) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ITEM").fg(Color::Cyan),
        Cell::new("AMOUNT").fg(Color::Cyan),
    ]);
    for (key, amount) in &result.breakdown {
        table.add_row(vec![Cell::new(key), Cell::new(format_eur(*amount))]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use msp_pricing::pricing::PriceTable;

    #[test]
    fn test_tiers_table_lists_all_models() {
        let comparison =
            compare_tiers(&PriceTable::default(), &CustomerProfile::new(20, 2)).unwrap();
        let rendered = tiers_table(&comparison).to_string();

        assert!(rendered.contains("adhoc"));
        assert!(rendered.contains("prepaid"));
        assert!(rendered.contains("managed"));
        assert!(rendered.contains(&format_eur(comparison.managed.monthly_total)));
    }

    #[test]
    fn test_breakdown_table_contains_pipeline_steps() {
        let comparison =
            compare_tiers(&PriceTable::default(), &CustomerProfile::new(30, 0)).unwrap();
        let rendered = breakdown_table(&comparison.managed).to_string();

        assert!(rendered.contains("volume_discount"));
        assert!(rendered.contains("security_cost"));
    }
}
