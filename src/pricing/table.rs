use serde::{Deserialize, Serialize};

use crate::pricing::models::{SecurityLevel, SlaLevel, SupportType};
use crate::pricing::volume::{default_brackets, validate_brackets, VolumeBracket};
use crate::pricing::PricingError;

/// Every constant the tier calculators use.
///
/// Loaded once at deploy time (the `[pricing]` config section) and shared
/// read-only between requests. All fields fall back to the published prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceTable {
    pub adhoc: AdhocRates,
    pub prepaid: PrepaidRates,
    pub managed: ManagedRates,
    pub volume_brackets: Vec<VolumeBracket>,
    /// One-off onboarding fee used for ROI payback; currently none
    pub setup_fee: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdhocRates {
    pub hourly_rate: f64,
    pub hours_per_employee: f64,
    pub hours_per_server: f64,
    /// Share of the base cost expected to fall outside office hours
    pub after_hours_share: f64,
    pub after_hours_multiplier: f64,
}

/// Prepaid hour packages ("strippenkaart")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepaidRates {
    pub package_hours: f64,
    pub package_price: f64,
    pub validity_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagedRates {
    pub remote: UnitRates,
    pub onsite: UnitRates,
    pub sla: SlaMultipliers,
    pub security: SecurityPrices,
    pub yearly_commitment_discount: f64,
    /// Workstation cost is computed but left out of the base support cost
    /// unless this is set.
    pub include_workstations: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRates {
    pub employee: f64,
    pub workstation: f64,
    pub server: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlaMultipliers {
    #[serde(rename = "4h")]
    pub four_hours: f64,
    #[serde(rename = "2h")]
    pub two_hours: f64,
    #[serde(rename = "1h")]
    pub one_hour: f64,
}

/// Monthly security add-on per employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityPrices {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            adhoc: AdhocRates::default(),
            prepaid: PrepaidRates::default(),
            managed: ManagedRates::default(),
            volume_brackets: default_brackets(),
            setup_fee: 0.0,
        }
    }
}

impl Default for AdhocRates {
    fn default() -> Self {
        Self {
            hourly_rate: 110.0,
            hours_per_employee: 1.15,
            hours_per_server: 5.0,
            after_hours_share: 0.10,
            after_hours_multiplier: 1.5,
        }
    }
}

impl Default for PrepaidRates {
    fn default() -> Self {
        Self {
            package_hours: 20.0,
            package_price: 1800.0,
            validity_months: 3,
        }
    }
}

impl Default for ManagedRates {
    fn default() -> Self {
        Self {
            remote: UnitRates {
                employee: 60.0,
                workstation: 25.0,
                server: 60.0,
            },
            onsite: UnitRates {
                employee: 90.0,
                workstation: 35.0,
                server: 90.0,
            },
            sla: SlaMultipliers {
                four_hours: 1.0,
                two_hours: 1.15,
                one_hour: 1.30,
            },
            security: SecurityPrices {
                low: 0.0,
                medium: 15.0,
                high: 30.0,
            },
            yearly_commitment_discount: 0.10,
            include_workstations: false,
        }
    }
}

impl ManagedRates {
    pub fn unit_rates(&self, support_type: SupportType) -> &UnitRates {
        match support_type {
            SupportType::Remote => &self.remote,
            SupportType::Onsite => &self.onsite,
        }
    }
}

impl SlaMultipliers {
    pub fn for_level(&self, level: SlaLevel) -> f64 {
        match level {
            SlaLevel::FourHours => self.four_hours,
            SlaLevel::TwoHours => self.two_hours,
            SlaLevel::OneHour => self.one_hour,
        }
    }
}

impl SecurityPrices {
    pub fn for_level(&self, level: SecurityLevel) -> f64 {
        match level {
            SecurityLevel::Low => self.low,
            SecurityLevel::Medium => self.medium,
            SecurityLevel::High => self.high,
        }
    }
}

impl PriceTable {
    pub fn validate(&self) -> Result<(), PricingError> {
        require_positive("adhoc.hourly_rate", self.adhoc.hourly_rate)?;
        require_non_negative("adhoc.hours_per_employee", self.adhoc.hours_per_employee)?;
        require_non_negative("adhoc.hours_per_server", self.adhoc.hours_per_server)?;
        require_non_negative("adhoc.after_hours_share", self.adhoc.after_hours_share)?;
        require_non_negative("adhoc.after_hours_multiplier", self.adhoc.after_hours_multiplier)?;

        require_positive("prepaid.package_hours", self.prepaid.package_hours)?;
        require_positive("prepaid.package_price", self.prepaid.package_price)?;
        if self.prepaid.validity_months == 0 {
            return Err(PricingError::InvalidPriceTable(
                "prepaid.validity_months must be at least 1".to_string(),
            ));
        }

        for (name, rates) in [("remote", &self.managed.remote), ("onsite", &self.managed.onsite)] {
            require_non_negative(&format!("managed.{}.employee", name), rates.employee)?;
            require_non_negative(&format!("managed.{}.workstation", name), rates.workstation)?;
            require_non_negative(&format!("managed.{}.server", name), rates.server)?;
        }

        let sla = &self.managed.sla;
        for (name, multiplier) in [("4h", sla.four_hours), ("2h", sla.two_hours), ("1h", sla.one_hour)] {
            if !multiplier.is_finite() || multiplier < 1.0 {
                return Err(PricingError::InvalidPriceTable(format!(
                    "managed.sla.{} multiplier must be >= 1.0, got {}",
                    name, multiplier
                )));
            }
        }

        let security = &self.managed.security;
        require_non_negative("managed.security.low", security.low)?;
        require_non_negative("managed.security.medium", security.medium)?;
        require_non_negative("managed.security.high", security.high)?;

        require_fraction(
            "managed.yearly_commitment_discount",
            self.managed.yearly_commitment_discount,
        )?;
        require_non_negative("setup_fee", self.setup_fee)?;

        validate_brackets(&self.volume_brackets)
    }
}

fn require_positive(name: &str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::InvalidPriceTable(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

fn require_non_negative(name: &str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PricingError::InvalidPriceTable(format!(
            "{} must not be negative, got {}",
            name, value
        )))
    }
}

fn require_fraction(name: &str, value: f64) -> Result<(), PricingError> {
    if (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(PricingError::InvalidPriceTable(format!(
            "{} must be in [0, 1), got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        assert!(PriceTable::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let table: PriceTable = toml::from_str(
            r#"
            setup_fee = 250.0

            [adhoc]
            hourly_rate = 120.0

            [managed.sla]
            "4h" = 1.0
            "2h" = 1.2
            "1h" = 1.4
            "#,
        )
        .unwrap();

        assert_eq!(table.adhoc.hourly_rate, 120.0);
        assert_eq!(table.adhoc.hours_per_employee, 1.15);
        assert_eq!(table.managed.sla.for_level(SlaLevel::TwoHours), 1.2);
        assert_eq!(table.managed.security.for_level(SecurityLevel::High), 30.0);
        assert_eq!(table.prepaid.package_price, 1800.0);
        assert_eq!(table.volume_brackets.len(), 6);
        assert_eq!(table.setup_fee, 250.0);
    }

    #[test]
    fn test_validate_rejects_sla_below_one() {
        let mut table = PriceTable::default();
        table.managed.sla.two_hours = 0.9;
        let err = table.validate().unwrap_err();
        assert!(err.to_string().contains("managed.sla.2h"));
    }

    #[test]
    fn test_validate_rejects_zero_package() {
        let mut table = PriceTable::default();
        table.prepaid.package_hours = 0.0;
        assert!(table.validate().is_err());

        let mut table = PriceTable::default();
        table.prepaid.validity_months = 0;
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_full_yearly_discount() {
        let mut table = PriceTable::default();
        table.managed.yearly_commitment_discount = 1.0;
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_unit_rates_by_support_type() {
        let rates = ManagedRates::default();
        assert_eq!(rates.unit_rates(SupportType::Remote).employee, 60.0);
        assert_eq!(rates.unit_rates(SupportType::Onsite).server, 90.0);
    }
}
