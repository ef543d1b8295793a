use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::handlers::AppState;

/// Health check endpoint
/// Returns 200 OK if the service is running
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({
        "status": "healthy",
        "service": "msp-pricing",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

/// Readiness check endpoint
/// Returns 200 OK once a validated price table and catalog are loaded
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let config = state.config.load();
    let ready = config.pricing.validate().is_ok() && !config.catalog.is_empty();

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(json!({
        "status": if ready { "ready" } else { "not_ready" },
        "service": "msp-pricing",
        "catalog_services": config.catalog.len(),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, MetricsConfig, ServerConfig};
    use crate::pricing::{PriceTable, ServiceCatalog};

    fn test_state(catalog: ServiceCatalog) -> AppState {
        AppState::new(Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                log_level: "info".to_string(),
                log_format: "text".to_string(),
                cors_origins: vec![],
            },
            metrics: MetricsConfig::default(),
            pricing: PriceTable::default(),
            catalog,
        })
    }

    #[tokio::test]
    async fn test_health_check_returns_ok() {
        let response = health_check().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_check_returns_ok() {
        let response = readiness_check(State(test_state(ServiceCatalog::default())))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_check_without_catalog() {
        let catalog = ServiceCatalog::new(vec![]).unwrap();
        let response = readiness_check(State(test_state(catalog))).await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
