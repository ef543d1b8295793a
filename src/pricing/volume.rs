use serde::{Deserialize, Serialize};

use crate::pricing::PricingError;

/// Inclusive employee-count range mapped to a discount fraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeBracket {
    pub min: u32,
    /// `None` means unbounded
    #[serde(default)]
    pub max: Option<u32>,
    pub discount: f64,
}

impl VolumeBracket {
    pub fn new(min: u32, max: Option<u32>, discount: f64) -> Self {
        Self { min, max, discount }
    }

    pub fn contains(&self, employees: u32) -> bool {
        employees >= self.min && self.max.map_or(true, |max| employees <= max)
    }
}

/// Brackets used on the public pricing page
pub fn default_brackets() -> Vec<VolumeBracket> {
    vec![
        VolumeBracket::new(1, Some(4), 0.0),
        VolumeBracket::new(5, Some(9), 0.05),
        VolumeBracket::new(10, Some(24), 0.10),
        VolumeBracket::new(25, Some(49), 0.15),
        VolumeBracket::new(50, Some(99), 0.20),
        VolumeBracket::new(100, None, 0.25),
    ]
}

/// Discount fraction for a headcount: the first bracket containing it, else 0
pub fn resolve_volume_discount(brackets: &[VolumeBracket], employees: u32) -> f64 {
    brackets
        .iter()
        .find(|bracket| bracket.contains(employees))
        .map_or(0.0, |bracket| bracket.discount)
}

/// Brackets must start at 1, be ascending and contiguous, and only the last
/// one may be open-ended. Discounts must lie in [0, 1) and never decrease.
pub fn validate_brackets(brackets: &[VolumeBracket]) -> Result<(), PricingError> {
    let first = brackets
        .first()
        .ok_or_else(|| PricingError::InvalidPriceTable("volume brackets are empty".to_string()))?;

    if first.min != 1 {
        return Err(PricingError::InvalidPriceTable(format!(
            "first volume bracket must start at 1, got {}",
            first.min
        )));
    }

    let mut previous_discount = 0.0;
    for (idx, bracket) in brackets.iter().enumerate() {
        if !(0.0..1.0).contains(&bracket.discount) {
            return Err(PricingError::InvalidPriceTable(format!(
                "volume bracket {} has discount {} outside [0, 1)",
                idx, bracket.discount
            )));
        }
        if bracket.discount < previous_discount {
            return Err(PricingError::InvalidPriceTable(format!(
                "volume bracket {} lowers the discount",
                idx
            )));
        }
        previous_discount = bracket.discount;

        let is_last = idx + 1 == brackets.len();
        match bracket.max {
            Some(max) if max < bracket.min => {
                return Err(PricingError::InvalidPriceTable(format!(
                    "volume bracket {} has max {} below min {}",
                    idx, max, bracket.min
                )));
            }
            Some(max) => {
                if let Some(next) = brackets.get(idx + 1) {
                    if next.min != max.saturating_add(1) {
                        return Err(PricingError::InvalidPriceTable(format!(
                            "volume brackets {} and {} are not contiguous ({} -> {})",
                            idx,
                            idx + 1,
                            max,
                            next.min
                        )));
                    }
                }
            }
            None if !is_last => {
                return Err(PricingError::InvalidPriceTable(format!(
                    "only the last volume bracket may be open-ended (bracket {})",
                    idx
                )));
            }
            None => {}
        }
    }

    Ok(())
}
