use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::{
    config::Config,
    handlers::{self, AppState},
    metrics,
    signals::setup_signal_handlers,
};

/// Request bodies are small JSON documents; anything larger is rejected
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Start the pricing API server
///
/// This function:
/// 1. Initializes metrics (when enabled)
/// 2. Sets up signal handlers for graceful shutdown and config reload
/// 3. Creates the Axum application
/// 4. Binds to the configured address
/// 5. Serves requests with graceful shutdown support
pub async fn start_server(config: Config, config_path: PathBuf) -> Result<()> {
    let metrics_handle = if config.metrics.enabled {
        info!("Initializing Prometheus metrics...");
        Some(Arc::new(metrics::init_metrics()?))
    } else {
        None
    };

    let state = AppState::new(config.clone());

    // SIGTERM/SIGINT for shutdown; SIGHUP reloads prices and catalog
    let (shutdown_tx, signal_handle) = setup_signal_handlers(state.config.clone(), config_path)?;
    let mut shutdown_rx = shutdown_tx.subscribe();

    let app = create_router(state, metrics_handle);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting pricing API on {}", addr);
    info!(
        "Configuration: {} catalog services, {} volume brackets, metrics {}",
        config.catalog.len(),
        config.pricing.volume_brackets.len(),
        if config.metrics.enabled { "enabled" } else { "disabled" }
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
///
/// CORS origins, the metrics endpoint and the listen address are read once
/// here; prices and catalog are read per request from the state snapshot.
pub fn create_router(state: AppState, metrics_handle: Option<Arc<PrometheusHandle>>) -> Router {
    let config = state.config.load_full();

    let api_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route(
            "/api/pricing/volume-discount",
            get(handlers::pricing::volume_discount),
        )
        .route("/api/pricing/adhoc", post(handlers::pricing::adhoc))
        .route("/api/pricing/prepaid", post(handlers::pricing::prepaid))
        .route("/api/pricing/managed", post(handlers::pricing::managed))
        .route("/api/pricing/compare", post(handlers::pricing::compare))
        .route("/api/pricing/savings", post(handlers::pricing::savings))
        .route("/api/catalog", get(handlers::catalog::list_services))
        .route("/api/quotes", post(handlers::quotes::create_quote))
        .with_state(state);

    let app = match metrics_handle {
        Some(handle) => Router::new()
            .route(
                &config.metrics.endpoint,
                get(handlers::metrics_handler::metrics),
            )
            .with_state(handle)
            .merge(api_routes),
        None => api_routes,
    };

    app.layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors_layer(&config.server.cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Empty origin list allows any origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(allowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MetricsConfig, ServerConfig};
    use crate::pricing::{PriceTable, ServiceCatalog};
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use metrics_exporter_prometheus::PrometheusBuilder;
    use tower::ServiceExt;

    fn test_config(cors_origins: Vec<String>) -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                log_level: "info".to_string(),
                log_format: "text".to_string(),
                cors_origins,
            },
            metrics: MetricsConfig::default(),
            pricing: PriceTable::default(),
            catalog: ServiceCatalog::default(),
        }
    }

    #[tokio::test]
    async fn test_health_route() {
        let app = create_router(AppState::new(test_config(vec![])), None);
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_metrics_route_only_when_enabled() {
        let app = create_router(AppState::new(test_config(vec![])), None);
        let response = app
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let handle = PrometheusBuilder::new().build_recorder().handle();
        let app = create_router(AppState::new(test_config(vec![])), Some(Arc::new(handle)));
        let response = app
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let app = create_router(AppState::new(test_config(vec![])), None);
        let body = format!(
            r#"{{"selections": [], "padding": "{}"}}"#,
            "x".repeat(MAX_BODY_BYTES)
        );
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/quotes")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.status().is_client_error());
        assert_ne!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let app = create_router(
            AppState::new(test_config(vec!["https://www.example.nl".to_string()])),
            None,
        );
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "https://www.example.nl")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://www.example.nl"
        );
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = create_router(AppState::new(test_config(vec![])), None);
        let response = app
            .oneshot(Request::builder().uri("/api/unknown").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
