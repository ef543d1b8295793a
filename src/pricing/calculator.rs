//! Tier calculators for the three support models.
//!
//! Ad-hoc is the baseline the other two are compared against. Managed
//! pricing runs through [`MANAGED_PIPELINE`]; the order of its steps is a
//! business rule and changing it changes every managed price.

use std::collections::BTreeMap;
use tracing::debug;

use crate::pricing::models::{
    round_cents, Commitment, CustomerProfile, PricingModel, PricingResult, SecurityLevel, SlaLevel,
};
use crate::pricing::table::PriceTable;
use crate::pricing::volume::resolve_volume_discount;

const MANAGED_INCLUDED_SERVICES: &[&str] = &[
    "Unlimited remote support",
    "Proactive 24/7 monitoring",
    "Patch and update management",
    "Microsoft 365 administration",
    "Daily cloud backup",
    "Hardware and software inventory",
    "Quarterly IT roadmap review",
];

const ADHOC_FEATURES: &[&str] = &[
    "Pay per hour",
    "No contract",
    "Remote and onsite support on request",
];

const ADHOC_BENEFITS: &[&str] = &[
    "No commitment or upfront payment",
    "Risk: unpredictable monthly costs",
    "Risk: no guaranteed response time",
    "Risk: after-hours work billed at a premium",
    "Risk: problems are only fixed after they occur",
];

const PREPAID_FEATURES: &[&str] = &[
    "Prepaid hour packages",
    "Lower effective hourly rate than ad-hoc",
    "Hours registered per ticket",
];

const PREPAID_BENEFITS: &[&str] = &[
    "Predictable budget per package",
    "Priority over ad-hoc requests",
    "Risk: unused hours expire at the end of the validity window",
    "Risk: no proactive monitoring or maintenance",
];

const MANAGED_BENEFITS: &[&str] = &[
    "Fixed monthly price per employee",
    "Guaranteed response times",
    "Problems are prevented instead of repaired",
    "One partner for all IT questions",
];

/// Shared input of the managed pipeline steps
pub struct ManagedContext<'a> {
    pub table: &'a PriceTable,
    pub profile: &'a CustomerProfile,
}

/// One named stage of managed pricing, applied to the running total
pub struct PricingStep {
    pub name: &'static str,
    pub apply: fn(&ManagedContext<'_>, f64) -> f64,
}

/// SLA multiplier -> security add-on -> volume discount -> yearly discount.
///
/// The SLA multiplier only ever sees the base support cost because it runs
/// first; the security add-on is added after it and is therefore not scaled.
pub const MANAGED_PIPELINE: [PricingStep; 4] = [
    PricingStep {
        name: "sla_surcharge",
        apply: apply_sla_multiplier,
    },
    PricingStep {
        name: "security_cost",
        apply: add_security,
    },
    PricingStep {
        name: "volume_discount",
        apply: apply_volume_discount,
    },
    PricingStep {
        name: "yearly_discount",
        apply: apply_yearly_commitment,
    },
];

pub fn apply_sla_multiplier(ctx: &ManagedContext<'_>, total: f64) -> f64 {
    total * ctx.table.managed.sla.for_level(ctx.profile.sla_level)
}

pub fn add_security(ctx: &ManagedContext<'_>, total: f64) -> f64 {
    let per_employee = ctx
        .table
        .managed
        .security
        .for_level(ctx.profile.security_level);
    total + ctx.profile.employees as f64 * per_employee
}

pub fn apply_volume_discount(ctx: &ManagedContext<'_>, total: f64) -> f64 {
    let discount = resolve_volume_discount(&ctx.table.volume_brackets, ctx.profile.employees);
    total * (1.0 - discount)
}

pub fn apply_yearly_commitment(ctx: &ManagedContext<'_>, total: f64) -> f64 {
    match ctx.profile.commitment {
        Commitment::Yearly => total * (1.0 - ctx.table.managed.yearly_commitment_discount),
        Commitment::Monthly => total,
    }
}

/// Estimated support hours per month for the hourly models
pub fn estimate_monthly_hours(table: &PriceTable, employees: u32, servers: u32) -> f64 {
    employees as f64 * table.adhoc.hours_per_employee + servers as f64 * table.adhoc.hours_per_server
}

/// Pay-per-hour support, no commitment and no discounts
pub fn calculate_adhoc(table: &PriceTable, employees: u32, servers: u32) -> PricingResult {
    let rates = &table.adhoc;
    let estimated_hours = estimate_monthly_hours(table, employees, servers);
    let base_cost = estimated_hours * rates.hourly_rate;
    let after_hours_surcharge = base_cost * rates.after_hours_share * rates.after_hours_multiplier;
    let monthly_total = round_cents((base_cost + after_hours_surcharge).max(0.0));

    debug!(
        employees,
        servers, estimated_hours, monthly_total, "Calculated ad-hoc pricing"
    );

    let mut breakdown = BTreeMap::new();
    breakdown.insert("estimated_hours".to_string(), round_cents(estimated_hours));
    breakdown.insert("base_cost".to_string(), round_cents(base_cost));
    breakdown.insert(
        "after_hours_surcharge".to_string(),
        round_cents(after_hours_surcharge),
    );

    PricingResult {
        model: PricingModel::Adhoc,
        monthly_total,
        yearly_total: round_cents(monthly_total * 12.0),
        breakdown,
        features: to_strings(ADHOC_FEATURES),
        benefits: to_strings(ADHOC_BENEFITS),
    }
}

/// Tolerance for float noise when hours land exactly on a package boundary
const PACKAGE_EPSILON: f64 = 1e-9;

/// Whole packages covering `hours`, taken on the unrounded hour total
pub fn packages_for(hours: f64, package_hours: f64) -> f64 {
    ((hours / package_hours) - PACKAGE_EPSILON).ceil().max(0.0)
}

/// Prepaid hour packages. Packages are never split: any fraction of a
/// package needed within the validity window is billed as a full one.
pub fn calculate_prepaid(table: &PriceTable, employees: u32, servers: u32) -> PricingResult {
    let rates = &table.prepaid;
    let months = rates.validity_months as f64;
    let estimated_hours = estimate_monthly_hours(table, employees, servers);
    let hours_needed = estimated_hours * months;
    let packages_needed = packages_for(hours_needed, rates.package_hours);
    let total_package_cost = packages_needed * rates.package_price;
    let monthly_total = round_cents(total_package_cost / months);

    debug!(
        employees,
        servers, hours_needed, packages_needed, monthly_total, "Calculated prepaid pricing"
    );

    let mut breakdown = BTreeMap::new();
    breakdown.insert("estimated_hours".to_string(), round_cents(estimated_hours));
    breakdown.insert("hours_needed".to_string(), round_cents(hours_needed));
    breakdown.insert("packages_needed".to_string(), packages_needed);
    breakdown.insert("package_price".to_string(), rates.package_price);
    breakdown.insert("total_package_cost".to_string(), round_cents(total_package_cost));

    let mut features = to_strings(PREPAID_FEATURES);
    features.push(format!(
        "{} hours per package, valid for {} months",
        rates.package_hours, rates.validity_months
    ));

    PricingResult {
        model: PricingModel::Prepaid,
        monthly_total,
        yearly_total: round_cents(monthly_total * 12.0),
        breakdown,
        features,
        benefits: to_strings(PREPAID_BENEFITS),
    }
}

/// Fixed-fee managed support
pub fn calculate_managed(table: &PriceTable, profile: &CustomerProfile) -> PricingResult {
    let rates = table.managed.unit_rates(profile.support_type);
    let employee_cost = profile.employees as f64 * rates.employee;
    let workstation_cost = profile.workstation_count() as f64 * rates.workstation;
    let server_cost = profile.servers as f64 * rates.server;

    let mut base_support_cost = employee_cost + server_cost;
    if table.managed.include_workstations {
        base_support_cost += workstation_cost;
    }

    let mut breakdown = BTreeMap::new();
    breakdown.insert("employee_cost".to_string(), round_cents(employee_cost));
    breakdown.insert("workstation_cost".to_string(), round_cents(workstation_cost));
    breakdown.insert("server_cost".to_string(), round_cents(server_cost));
    breakdown.insert("base_support_cost".to_string(), round_cents(base_support_cost));

    let ctx = ManagedContext { table, profile };
    let mut total = base_support_cost;
    for step in MANAGED_PIPELINE.iter() {
        let next = (step.apply)(&ctx, total);
        breakdown.insert(step.name.to_string(), round_cents((next - total).abs()));
        if step.name == "security_cost" {
            breakdown.insert("pre_discount_total".to_string(), round_cents(next));
        }
        total = next;
    }

    let monthly_total = round_cents(total.max(0.0));

    debug!(
        employees = profile.employees,
        servers = profile.servers,
        sla = %profile.sla_level,
        security = %profile.security_level,
        monthly_total,
        "Calculated managed pricing"
    );

    PricingResult {
        model: PricingModel::Managed,
        monthly_total,
        yearly_total: round_cents(monthly_total * 12.0),
        breakdown,
        features: managed_features(profile.sla_level, profile.security_level),
        benefits: to_strings(MANAGED_BENEFITS),
    }
}

/// Included services followed by the SLA and security tier features
pub fn managed_features(sla: SlaLevel, security: SecurityLevel) -> Vec<String> {
    let mut features = to_strings(MANAGED_INCLUDED_SERVICES);
    features.extend(sla_features(sla));
    features.extend(security_features(security));
    features
}

fn sla_features(sla: SlaLevel) -> Vec<String> {
    let (response, availability) = match sla {
        SlaLevel::FourHours => ("4 hours", "99.5%"),
        SlaLevel::TwoHours => ("2 hours", "99.8%"),
        SlaLevel::OneHour => ("1 hour", "99.9%"),
    };
    vec![
        format!("Response time within {}", response),
        format!("{} availability guarantee", availability),
    ]
}

fn security_features(security: SecurityLevel) -> Vec<String> {
    let mut features = vec![
        "Managed antivirus".to_string(),
        "Firewall management".to_string(),
    ];
    if matches!(security, SecurityLevel::Medium | SecurityLevel::High) {
        features.push("Endpoint detection and response".to_string());
        features.push("Email filtering and anti-phishing".to_string());
        features.push("Multi-factor authentication rollout".to_string());
    }
    if security == SecurityLevel::High {
        features.push("24/7 security operations monitoring".to_string());
        features.push("Security awareness training".to_string());
        features.push("Quarterly vulnerability scans".to_string());
    }
    features
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
