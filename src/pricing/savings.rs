use serde::{Deserialize, Serialize};

use crate::pricing::calculator::{calculate_adhoc, calculate_managed, calculate_prepaid};
use crate::pricing::models::{round_cents, CustomerProfile, PricingResult};
use crate::pricing::table::PriceTable;
use crate::pricing::PricingError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsComparison {
    pub monthly_savings: f64,
    pub yearly_savings: f64,
    /// Whole percent, may be negative when the primary option is dearer
    pub percentage_savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiProjection {
    /// `None` when the savings never recover the setup fee
    pub payback_months: Option<u32>,
    pub three_year_savings: f64,
    pub five_year_savings: f64,
}

/// Side-by-side pricing of all three models for one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierComparison {
    pub adhoc: PricingResult,
    pub prepaid: PricingResult,
    pub managed: PricingResult,
    /// Managed vs ad-hoc; absent when the ad-hoc baseline is zero
    pub managed_savings: Option<SavingsComparison>,
    /// Prepaid vs ad-hoc; absent when the ad-hoc baseline is zero
    pub prepaid_savings: Option<SavingsComparison>,
    pub roi: Option<RoiProjection>,
}

/// Savings of `primary_monthly` relative to `baseline_monthly`.
///
/// A zero baseline is reported as [`PricingError::DivisionByZero`]; callers
/// are expected to avoid it.
pub fn compare_savings(
    primary_monthly: f64,
    baseline_monthly: f64,
) -> Result<SavingsComparison, PricingError> {
    if baseline_monthly == 0.0 {
        return Err(PricingError::DivisionByZero(
            "baseline monthly total is zero".to_string(),
        ));
    }

    let monthly_savings = baseline_monthly - primary_monthly;
    Ok(SavingsComparison {
        monthly_savings: round_cents(monthly_savings),
        yearly_savings: round_cents(monthly_savings * 12.0),
        percentage_savings: (monthly_savings / baseline_monthly * 100.0).round(),
    })
}

pub fn project_roi(savings: &SavingsComparison, setup_fee: f64) -> RoiProjection {
    let payback_months = if setup_fee <= 0.0 {
        Some(0)
    } else if savings.monthly_savings > 0.0 {
        Some((setup_fee / savings.monthly_savings).ceil() as u32)
    } else {
        None
    };

    RoiProjection {
        payback_months,
        three_year_savings: round_cents(savings.yearly_savings * 3.0),
        five_year_savings: round_cents(savings.yearly_savings * 5.0),
    }
}

/// Price all three models and compare managed and prepaid against ad-hoc
pub fn compare_tiers(
    table: &PriceTable,
    profile: &CustomerProfile,
) -> Result<TierComparison, PricingError> {
    profile.validate()?;

    let adhoc = calculate_adhoc(table, profile.employees, profile.servers);
    let prepaid = calculate_prepaid(table, profile.employees, profile.servers);
    let managed = calculate_managed(table, profile);

    let (managed_savings, prepaid_savings) = if adhoc.monthly_total > 0.0 {
        (
            Some(compare_savings(managed.monthly_total, adhoc.monthly_total)?),
            Some(compare_savings(prepaid.monthly_total, adhoc.monthly_total)?),
        )
    } else {
        (None, None)
    };
    let roi = managed_savings
        .as_ref()
        .map(|savings| project_roi(savings, table.setup_fee));

    Ok(TierComparison {
        adhoc,
        prepaid,
        managed,
        managed_savings,
        prepaid_savings,
        roi,
    })
}
