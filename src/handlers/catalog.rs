use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, handlers::AppState, pricing::ServiceCategory};

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_locale() -> String {
    "nl".to_string()
}

/// Catalog entry with the name resolved for the requested locale
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub min_quantity: u32,
    pub max_quantity: u32,
    pub base_price: f64,
    pub price_per_unit: f64,
    pub yearly_discount: f64,
    pub features: Vec<String>,
}

impl CatalogEntry {
    fn localized(service: &ServiceCategory, locale: &str) -> Self {
        Self {
            id: service.id.clone(),
            name: service.display_name(locale).to_string(),
            unit: service.unit.clone(),
            min_quantity: service.min_quantity,
            max_quantity: service.max_quantity,
            base_price: service.base_price,
            price_per_unit: service.price_per_unit,
            yearly_discount: service.yearly_discount,
            features: service.features.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub locale: String,
    pub services: Vec<CatalogEntry>,
}

/// GET /api/catalog?locale=nl|en
pub async fn list_services(
    State(state): State<AppState>,
    query: Result<Query<CatalogQuery>, QueryRejection>,
) -> Result<Json<CatalogResponse>, AppError> {
    let Query(query) = query?;
    let config = state.config.load();

    let services = config
        .catalog
        .services()
        .iter()
        .map(|service| CatalogEntry::localized(service, &query.locale))
        .collect();

    Ok(Json(CatalogResponse {
        locale: query.locale,
        services,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, MetricsConfig, ServerConfig};
    use crate::pricing::{PriceTable, ServiceCatalog};

    fn test_state() -> AppState {
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
            catalog: ServiceCatalog::default(),
        })
    }

    #[tokio::test]
    async fn test_catalog_defaults_to_dutch() {
        let query = CatalogQuery {
            locale: default_locale(),
        };
        let Json(response) = list_services(State(test_state()), Ok(Query(query)))
            .await
            .unwrap();

        assert_eq!(response.locale, "nl");
        assert_eq!(response.services.len(), 6);
        assert_eq!(response.services[0].id, "workplace-management");
        assert_eq!(response.services[0].name, "Werkplekbeheer");
    }

    #[tokio::test]
    async fn test_catalog_in_english() {
        let query = CatalogQuery {
            locale: "en".to_string(),
        };
        let Json(response) = list_services(State(test_state()), Ok(Query(query)))
            .await
            .unwrap();

        let server = response
            .services
            .iter()
            .find(|s| s.id == "server-management")
            .unwrap();
        assert_eq!(server.name, "Server management");
        assert_eq!(server.yearly_discount, 10.0);
    }
}
