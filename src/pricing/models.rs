use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::pricing::PricingError;

/// Upper bound for any headcount or device count accepted from callers
pub const MAX_COUNT: u32 = 100_000;

/// Desired security tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    Low,
    #[default]
    Medium,
    High,
}

/// Guaranteed response time of the support desk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SlaLevel {
    #[default]
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "2h")]
    TwoHours,
    #[serde(rename = "1h")]
    OneHour,
}

/// How support is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportType {
    #[default]
    Remote,
    Onsite,
}

/// Billing commitment chosen by the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    #[default]
    Monthly,
    Yearly,
}

/// The three support models offered on the pricing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingModel {
    Adhoc,
    Prepaid,
    Managed,
}

impl PricingModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adhoc => "adhoc",
            Self::Prepaid => "prepaid",
            Self::Managed => "managed",
        }
    }
}

impl fmt::Display for PricingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => f.write_str("low"),
            Self::Medium => f.write_str("medium"),
            Self::High => f.write_str("high"),
        }
    }
}

impl fmt::Display for SlaLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FourHours => f.write_str("4h"),
            Self::TwoHours => f.write_str("2h"),
            Self::OneHour => f.write_str("1h"),
        }
    }
}

impl fmt::Display for SupportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => f.write_str("remote"),
            Self::Onsite => f.write_str("onsite"),
        }
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => f.write_str("monthly"),
            Self::Yearly => f.write_str("yearly"),
        }
    }
}

impl std::str::FromStr for SecurityLevel {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(PricingError::InvalidInput(format!(
                "unknown security level '{}'",
                other
            ))),
        }
    }
}

impl std::str::FromStr for SlaLevel {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "4h" => Ok(Self::FourHours),
            "2h" => Ok(Self::TwoHours),
            "1h" => Ok(Self::OneHour),
            other => Err(PricingError::InvalidInput(format!("unknown SLA level '{}'", other))),
        }
    }
}

impl std::str::FromStr for SupportType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "remote" => Ok(Self::Remote),
            "onsite" => Ok(Self::Onsite),
            other => Err(PricingError::InvalidInput(format!("unknown support type '{}'", other))),
        }
    }
}

impl std::str::FromStr for Commitment {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(PricingError::InvalidInput(format!("unknown commitment '{}'", other))),
        }
    }
}

/// Per-calculation description of a prospect
///
/// Counts are unsigned, so negative and fractional values are rejected at
/// deserialization time. `workstations` falls back to `employees` when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub employees: u32,
    #[serde(default)]
    pub workstations: Option<u32>,
    #[serde(default)]
    pub servers: u32,
    #[serde(default)]
    pub remote_workers: u32,
    #[serde(default)]
    pub security_level: SecurityLevel,
    #[serde(default)]
    pub sla_level: SlaLevel,
    #[serde(default)]
    pub support_type: SupportType,
    #[serde(default)]
    pub commitment: Commitment,
}

impl CustomerProfile {
    /// Profile with the default tiers (medium security, 4h SLA, remote, monthly)
    pub fn new(employees: u32, servers: u32) -> Self {
        Self {
            employees,
            workstations: None,
            servers,
            remote_workers: 0,
            security_level: SecurityLevel::default(),
            sla_level: SlaLevel::default(),
            support_type: SupportType::default(),
            commitment: Commitment::default(),
        }
    }

    pub fn workstation_count(&self) -> u32 {
        self.workstations.unwrap_or(self.employees)
    }

    pub fn validate(&self) -> Result<(), PricingError> {
        if self.employees == 0 {
            return Err(PricingError::InvalidInput(
                "employees must be at least 1".to_string(),
            ));
        }

        let counts = [
            ("employees", self.employees),
            ("workstations", self.workstation_count()),
            ("servers", self.servers),
            ("remote_workers", self.remote_workers),
        ];
        for (name, value) in counts {
            if value > MAX_COUNT {
                return Err(PricingError::InvalidInput(format!(
                    "{} must not exceed {}",
                    name, MAX_COUNT
                )));
            }
        }

        if self.remote_workers > self.employees {
            return Err(PricingError::InvalidInput(
                "remote_workers cannot exceed employees".to_string(),
            ));
        }

        Ok(())
    }
}

/// Output of a tier calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub model: PricingModel,
    pub monthly_total: f64,
    pub yearly_total: f64,
    pub breakdown: BTreeMap<String, f64>,
    pub features: Vec<String>,
    pub benefits: Vec<String>,
}

/// One requested catalog line for a quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSelection {
    pub service_id: String,
    pub quantity: u32,
}

impl QuoteSelection {
    pub fn new(service_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            service_id: service_id.into(),
            quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteLine {
    pub service_id: String,
    pub name: String,
    pub quantity: u32,
    pub monthly_price: f64,
    pub yearly_price: f64,
    pub yearly_discount_percentage: f64,
}

/// A generated quote. Never updated; a new quote is generated instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingQuote {
    pub id: String,
    pub lines: Vec<QuoteLine>,
    pub total_monthly: f64,
    pub total_yearly: f64,
    pub discount_amount: f64,
    pub generated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Round a currency amount to whole cents
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
