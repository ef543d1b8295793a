//! Pricing and quote calculation for the managed IT support packages.
//!
//! Every function here is pure: it reads an immutable [`PriceTable`] or
//! [`ServiceCatalog`] passed in by the caller and returns a fresh value.

pub mod calculator;
pub mod catalog;
pub mod models;
pub mod quote;
pub mod savings;
pub mod table;
pub mod volume;

pub use calculator::{calculate_adhoc, calculate_managed, calculate_prepaid, MANAGED_PIPELINE};
pub use catalog::{ServiceCatalog, ServiceCategory};
pub use models::{
    round_cents, Commitment, CustomerProfile, PricingModel, PricingQuote, PricingResult,
    QuoteLine, QuoteSelection, SecurityLevel, SlaLevel, SupportType,
};
pub use quote::generate_quote;
pub use savings::{compare_savings, compare_tiers, project_roi, RoiProjection, SavingsComparison, TierComparison};
pub use table::PriceTable;
pub use volume::{resolve_volume_discount, VolumeBracket};

use thiserror::Error;

/// Errors raised by the pricing library
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// Counts or selections the calculators refuse to price
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A quote referenced a service id that is not in the catalog
    #[error("Service not found: {0}")]
    ServiceNotFound(String),

    /// Savings were compared against a zero baseline
    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    /// The configured price table or catalog is inconsistent
    #[error("Invalid price table: {0}")]
    InvalidPriceTable(String),
}

impl PricingError {
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::ServiceNotFound(_) => "service_not_found",
            Self::DivisionByZero(_) => "division_by_zero",
            Self::InvalidPriceTable(_) => "invalid_price_table",
        }
    }
}
