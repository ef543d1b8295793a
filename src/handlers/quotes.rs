use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    error::AppError,
    handlers::AppState,
    metrics,
    pricing::{generate_quote, PricingQuote, QuoteSelection},
};

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub selections: Vec<QuoteSelection>,
}

/// POST /api/quotes
pub async fn create_quote(
    State(state): State<AppState>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<PricingQuote>, AppError> {
    let Json(request) = payload?;
    let config = state.config.load();

    let quote = generate_quote(&config.catalog, &request.selections, Utc::now())?;
    metrics::record_quote(quote.lines.len());

    Ok(Json(quote))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, MetricsConfig, ServerConfig};
    use crate::pricing::{PriceTable, ServiceCatalog};
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    async fn post_quote(body: &str) -> (StatusCode, Value) {
        let state = AppState::new(Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                log_level: "info".to_string(),
                log_format: "text".to_string(),
                cors_origins: vec![],
            },
            metrics: MetricsConfig::default(),
            pricing: PriceTable::default(),
            catalog: ServiceCatalog::default(),
        });
        let app = crate::server::create_router(state, None);

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/quotes")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_create_quote() {
        let (status, body) = post_quote(
            r#"{"selections": [{"service_id": "server-management", "quantity": 2}]}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["lines"][0]["monthly_price"], 240.0);
        assert_eq!(body["total_yearly"], 2592.0);
        assert_eq!(body["discount_amount"], 288.0);
        assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
    }

    #[tokio::test]
    async fn test_unknown_service_returns_not_found() {
        let (status, body) = post_quote(
            r#"{"selections": [{"service_id": "espresso-service", "quantity": 1}]}"#,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["type"], "service_not_found");
    }

    #[tokio::test]
    async fn test_empty_selection_is_rejected() {
        let (status, body) = post_quote(r#"{"selections": []}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "invalid_input");
    }
}
