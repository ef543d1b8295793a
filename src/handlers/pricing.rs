use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    handlers::AppState,
    metrics,
    pricing::{
        calculate_adhoc, calculate_managed, calculate_prepaid, compare_savings, compare_tiers,
        models::MAX_COUNT, project_roi, resolve_volume_discount, CustomerProfile, PricingError,
        PricingModel, PricingResult, RoiProjection, SavingsComparison, TierComparison,
    },
};

#[derive(Debug, Deserialize)]
pub struct VolumeDiscountQuery {
    pub employees: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VolumeDiscountResponse {
    pub employees: u32,
    pub discount: f64,
}

/// Input of the hourly models (ad-hoc and prepaid)
#[derive(Debug, Deserialize)]
pub struct HourlyEstimateRequest {
    pub employees: u32,
    #[serde(default)]
    pub servers: u32,
}

impl HourlyEstimateRequest {
    fn validate(&self) -> Result<(), PricingError> {
        if self.employees > MAX_COUNT || self.servers > MAX_COUNT {
            return Err(PricingError::InvalidInput(format!(
                "employees and servers must not exceed {}",
                MAX_COUNT
            )));
        }
        if self.employees == 0 && self.servers == 0 {
            return Err(PricingError::InvalidInput(
                "at least one employee or server is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct SavingsRequest {
    pub primary_monthly: f64,
    pub baseline_monthly: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SavingsResponse {
    #[serde(flatten)]
    pub savings: SavingsComparison,
    pub roi: RoiProjection,
}

/// GET /api/pricing/volume-discount?employees=N
pub async fn volume_discount(
    State(state): State<AppState>,
    query: Result<Query<VolumeDiscountQuery>, QueryRejection>,
) -> Result<Json<VolumeDiscountResponse>, AppError> {
    let Query(query) = query?;
    let config = state.config.load();
    let discount = resolve_volume_discount(&config.pricing.volume_brackets, query.employees);

    Ok(Json(VolumeDiscountResponse {
        employees: query.employees,
        discount,
    }))
}

/// POST /api/pricing/adhoc
pub async fn adhoc(
    State(state): State<AppState>,
    payload: Result<Json<HourlyEstimateRequest>, JsonRejection>,
) -> Result<Json<PricingResult>, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    let config = state.config.load();
    let result = calculate_adhoc(&config.pricing, request.employees, request.servers);
    metrics::record_calculation(PricingModel::Adhoc);

    Ok(Json(result))
}

/// POST /api/pricing/prepaid
pub async fn prepaid(
    State(state): State<AppState>,
    payload: Result<Json<HourlyEstimateRequest>, JsonRejection>,
) -> Result<Json<PricingResult>, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    let config = state.config.load();
    let result = calculate_prepaid(&config.pricing, request.employees, request.servers);
    metrics::record_calculation(PricingModel::Prepaid);

    Ok(Json(result))
}

/// POST /api/pricing/managed
pub async fn managed(
    State(state): State<AppState>,
    payload: Result<Json<CustomerProfile>, JsonRejection>,
) -> Result<Json<PricingResult>, AppError> {
    let Json(profile) = payload?;
    profile.validate()?;

    let config = state.config.load();
    let result = calculate_managed(&config.pricing, &profile);
    metrics::record_calculation(PricingModel::Managed);

    Ok(Json(result))
}

/// POST /api/pricing/compare
///
/// Backs the pricing calculator page: all three models side by side.
pub async fn compare(
    State(state): State<AppState>,
    payload: Result<Json<CustomerProfile>, JsonRejection>,
) -> Result<Json<TierComparison>, AppError> {
    let Json(profile) = payload?;

    let config = state.config.load();
    let comparison = compare_tiers(&config.pricing, &profile)?;
    for model in [PricingModel::Adhoc, PricingModel::Prepaid, PricingModel::Managed] {
        metrics::record_calculation(model);
    }

    tracing::info!(
        employees = profile.employees,
        managed_monthly = comparison.managed.monthly_total,
        adhoc_monthly = comparison.adhoc.monthly_total,
        "Compared pricing tiers"
    );

    Ok(Json(comparison))
}

/// POST /api/pricing/savings
pub async fn savings(
    State(state): State<AppState>,
    payload: Result<Json<SavingsRequest>, JsonRejection>,
) -> Result<Json<SavingsResponse>, AppError> {
    let Json(request) = payload?;
    for (name, value) in [
        ("primary_monthly", request.primary_monthly),
        ("baseline_monthly", request.baseline_monthly),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(PricingError::InvalidInput(format!(
                "{} must be a non-negative amount",
                name
            ))
            .into());
        }
    }

    let savings = compare_savings(request.primary_monthly, request.baseline_monthly)?;
    let roi = project_roi(&savings, state.config.load().pricing.setup_fee);

    Ok(Json(SavingsResponse { savings, roi }))
}
