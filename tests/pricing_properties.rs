/// Integration tests for the pricing library against the published price list
use chrono::{FixedOffset, TimeZone, Utc};
use msp_pricing::pricing::{
    calculate_adhoc, calculate_managed, calculate_prepaid, generate_quote,
    resolve_volume_discount, Commitment, CustomerProfile, PriceTable, QuoteSelection,
    SecurityLevel, ServiceCatalog, SlaLevel, SupportType,
};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.01,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_volume_discount_is_monotonic_and_bounded() {
    let table = PriceTable::default();
    let mut previous = 0.0;

    for employees in 0..=500 {
        let discount = resolve_volume_discount(&table.volume_brackets, employees);
        assert!((0.0..=0.25).contains(&discount), "{} → {}", employees, discount);
        assert!(discount >= previous, "discount dropped at {}", employees);
        previous = discount;
    }
}

#[test]
fn test_managed_total_never_negative() {
    let table = PriceTable::default();
    let securities = [SecurityLevel::Low, SecurityLevel::Medium, SecurityLevel::High];
    let slas = [SlaLevel::FourHours, SlaLevel::TwoHours, SlaLevel::OneHour];
    let supports = [SupportType::Remote, SupportType::Onsite];

    for employees in [1, 4, 9, 24, 49, 99, 250] {
        for servers in [0, 1, 10] {
            for security_level in securities {
                for sla_level in slas {
                    for support_type in supports {
                        let profile = CustomerProfile {
                            security_level,
                            sla_level,
                            support_type,
                            ..CustomerProfile::new(employees, servers)
                        };
                        let result = calculate_managed(&table, &profile);
                        assert!(result.monthly_total >= 0.0);
                        assert_close(result.yearly_total, result.monthly_total * 12.0);
                    }
                }
            }
        }
    }
}

#[test]
fn test_prepaid_packages_scenario() {
    let result = calculate_prepaid(&PriceTable::default(), 5, 1);

    assert_close(result.breakdown["estimated_hours"], 10.75);
    assert_close(result.breakdown["hours_needed"], 32.25);
    assert_eq!(result.breakdown["packages_needed"], 2.0);
}

fn expected_packages(table: &PriceTable, employees: u32, servers: u32) -> f64 {
    let monthly = employees as f64 * table.adhoc.hours_per_employee
        + servers as f64 * table.adhoc.hours_per_server;
    let total = monthly * table.prepaid.validity_months as f64;
    (total / table.prepaid.package_hours - 1e-9).ceil()
}

#[test]
fn test_prepaid_packages_always_cover_validity_window() {
    let mut custom = PriceTable::default();
    custom.adhoc.hours_per_employee = 1.3333;
    custom.adhoc.hours_per_server = 0.0;

    for table in [PriceTable::default(), custom] {
        for employees in 0..60 {
            for servers in 0..5 {
                let result = calculate_prepaid(&table, employees, servers);
                assert_eq!(
                    result.breakdown["packages_needed"],
                    expected_packages(&table, employees, servers),
                    "{} employees, {} servers",
                    employees,
                    servers
                );
            }
        }
    }
}

#[test]
fn test_prepaid_hours_just_below_package_boundary() {
    let mut table = PriceTable::default();
    table.adhoc.hours_per_employee = 1.3333;
    table.adhoc.hours_per_server = 0.0;

    // 19.9995h in the validity window
    let result = calculate_prepaid(&table, 5, 0);
    assert_eq!(result.breakdown["packages_needed"], 1.0);
    assert_close(result.monthly_total, 600.0);
}

#[test]
fn test_prepaid_hours_just_above_package_boundary() {
    let mut table = PriceTable::default();
    table.adhoc.hours_per_employee = 0.0;
    table.adhoc.hours_per_server = 6.7;

    // 1 server * 6.7h * 3 months = 20.1h
    let result = calculate_prepaid(&table, 0, 1);
    assert_close(result.breakdown["hours_needed"], 20.1);
    assert_eq!(result.breakdown["packages_needed"], 2.0);
}

#[test]
fn test_adhoc_scenario() {
    let result = calculate_adhoc(&PriceTable::default(), 10, 2);

    assert_close(result.breakdown["estimated_hours"], 21.5);
    assert_close(result.breakdown["base_cost"], 2365.0);
    assert_close(result.breakdown["after_hours_surcharge"], 354.75);
    assert_close(result.monthly_total, 2719.75);
}

#[test]
fn test_yearly_commitment_never_costs_more() {
    let table = PriceTable::default();
    for employees in [1, 7, 20, 60, 150] {
        let monthly = CustomerProfile::new(employees, 3);
        let yearly = CustomerProfile {
            commitment: Commitment::Yearly,
            ..monthly.clone()
        };

        let monthly_total = calculate_managed(&table, &monthly).monthly_total;
        let yearly_total = calculate_managed(&table, &yearly).monthly_total;
        assert!(yearly_total <= monthly_total);
    }
}

#[test]
fn test_managed_scenario() {
    let profile = CustomerProfile {
        security_level: SecurityLevel::Medium,
        sla_level: SlaLevel::TwoHours,
        support_type: SupportType::Remote,
        commitment: Commitment::Monthly,
        ..CustomerProfile::new(20, 2)
    };
    let result = calculate_managed(&PriceTable::default(), &profile);

    assert_close(result.breakdown["employee_cost"], 1200.0);
    assert_close(result.breakdown["server_cost"], 120.0);
    assert_close(result.breakdown["base_support_cost"], 1320.0);
    assert_close(result.breakdown["pre_discount_total"], 1818.0);
    assert_close(result.monthly_total, 1636.20);
}

#[test]
fn test_quote_totals_and_expiry() {
    let catalog = ServiceCatalog::default();
    let selections: Vec<QuoteSelection> = catalog
        .services()
        .iter()
        .map(|s| QuoteSelection::new(s.id.clone(), s.min_quantity + 3))
        .collect();

    // 00:30 in Amsterdam is still the previous day in UTC
    let amsterdam = FixedOffset::east_opt(2 * 3600).unwrap();
    let now = amsterdam
        .with_ymd_and_hms(2026, 10, 24, 0, 30, 0)
        .unwrap()
        .with_timezone(&Utc);
    let quote = generate_quote(&catalog, &selections, now).unwrap();

    let monthly_sum: f64 = quote.lines.iter().map(|l| l.monthly_price).sum();
    assert_close(monthly_sum, quote.total_monthly);
    assert_eq!(quote.lines.len(), catalog.len());
    assert_eq!((quote.expires_at - quote.generated_at).num_days(), 30);
    assert_eq!(quote.expires_at - quote.generated_at, chrono::Duration::days(30));
}
