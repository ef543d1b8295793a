use chrono::{DateTime, Duration, Utc};
use tracing::info;
use uuid::Uuid;

use crate::pricing::catalog::{ServiceCatalog, ServiceCategory};
use crate::pricing::models::{round_cents, PricingQuote, QuoteLine, QuoteSelection};
use crate::pricing::PricingError;

/// Days a quote stays valid after generation
pub const QUOTE_VALIDITY_DAYS: i64 = 30;

/// Monthly and yearly price of a single catalog line
pub fn price_line(service: &ServiceCategory, quantity: u32) -> (f64, f64) {
    let monthly = service.base_price + service.price_per_unit * quantity as f64;
    let yearly = monthly * 12.0 * (1.0 - service.yearly_discount / 100.0);
    (round_cents(monthly), round_cents(yearly))
}

/// Build a quote from catalog selections.
///
/// Any unknown service id fails the whole quote. `now` is passed in so the
/// expiry is always exactly [`QUOTE_VALIDITY_DAYS`] after `generated_at`.
pub fn generate_quote(
    catalog: &ServiceCatalog,
    selections: &[QuoteSelection],
    now: DateTime<Utc>,
) -> Result<PricingQuote, PricingError> {
    if selections.is_empty() {
        return Err(PricingError::InvalidInput(
            "at least one service must be selected".to_string(),
        ));
    }

    let mut lines = Vec::with_capacity(selections.len());
    for selection in selections {
        let service = catalog
            .get(&selection.service_id)
            .ok_or_else(|| PricingError::ServiceNotFound(selection.service_id.clone()))?;

        if selection.quantity < service.min_quantity || selection.quantity > service.max_quantity {
            return Err(PricingError::InvalidInput(format!(
                "quantity {} for '{}' must be between {} and {}",
                selection.quantity, service.id, service.min_quantity, service.max_quantity
            )));
        }

        let (monthly_price, yearly_price) = price_line(service, selection.quantity);
        lines.push(QuoteLine {
            service_id: service.id.clone(),
            name: service.name_nl.clone(),
            quantity: selection.quantity,
            monthly_price,
            yearly_price,
            yearly_discount_percentage: service.yearly_discount,
        });
    }

    let total_monthly = round_cents(lines.iter().map(|l| l.monthly_price).sum());
    let total_yearly = round_cents(lines.iter().map(|l| l.yearly_price).sum());
    let discount_amount = round_cents(total_monthly * 12.0 - total_yearly);

    let quote = PricingQuote {
        id: Uuid::new_v4().to_string(),
        lines,
        total_monthly,
        total_yearly,
        discount_amount,
        generated_at: now,
        expires_at: now + Duration::days(QUOTE_VALIDITY_DAYS),
    };

    info!(
        quote_id = %quote.id,
        lines = quote.lines.len(),
        total_monthly = quote.total_monthly,
        "Generated quote"
    );

    Ok(quote)
}
