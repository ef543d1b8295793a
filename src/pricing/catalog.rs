use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::pricing::PricingError;

/// A service that can be put on a quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCategory {
    pub id: String,
    pub name_nl: String,
    pub name_en: String,
    /// Unit of measure, e.g. "user" or "server"
    pub unit: String,
    pub min_quantity: u32,
    pub max_quantity: u32,
    pub base_price: f64,
    pub price_per_unit: f64,
    /// Discount in percent (0-100) when billed yearly
    #[serde(default)]
    pub yearly_discount: f64,
    #[serde(default)]
    pub features: Vec<String>,
}

impl ServiceCategory {
    pub fn display_name(&self, locale: &str) -> &str {
        if locale.eq_ignore_ascii_case("en") {
            &self.name_en
        } else {
            &self.name_nl
        }
    }
}

/// Read-only list of quotable services, in configuration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceCatalog {
    services: Vec<ServiceCategory>,
}

impl ServiceCatalog {
    pub fn new(services: Vec<ServiceCategory>) -> Result<Self, PricingError> {
        let catalog = Self { services };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&ServiceCategory> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn services(&self) -> &[ServiceCategory] {
        &self.services
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn validate(&self) -> Result<(), PricingError> {
        let mut seen = HashSet::new();
        for service in &self.services {
            if service.id.trim().is_empty() {
                return Err(PricingError::InvalidPriceTable(
                    "catalog service id cannot be empty".to_string(),
                ));
            }
            if !seen.insert(service.id.as_str()) {
                return Err(PricingError::InvalidPriceTable(format!(
                    "duplicate catalog service id '{}'",
                    service.id
                )));
            }
            if service.min_quantity > service.max_quantity {
                return Err(PricingError::InvalidPriceTable(format!(
                    "service '{}' has min_quantity {} above max_quantity {}",
                    service.id, service.min_quantity, service.max_quantity
                )));
            }
            if !(service.base_price >= 0.0 && service.price_per_unit >= 0.0) {
                return Err(PricingError::InvalidPriceTable(format!(
                    "service '{}' has a negative price",
                    service.id
                )));
            }
            if !(0.0..=100.0).contains(&service.yearly_discount) {
                return Err(PricingError::InvalidPriceTable(format!(
                    "service '{}' has yearly_discount {} outside 0-100",
                    service.id, service.yearly_discount
                )));
            }
        }
        Ok(())
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self {
            services: default_services(),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn service(
    id: &str,
    name_nl: &str,
    name_en: &str,
    unit: &str,
    quantity: (u32, u32),
    base_price: f64,
    price_per_unit: f64,
    yearly_discount: f64,
    features: &[&str],
) -> ServiceCategory {
    ServiceCategory {
        id: id.to_string(),
        name_nl: name_nl.to_string(),
        name_en: name_en.to_string(),
        unit: unit.to_string(),
        min_quantity: quantity.0,
        max_quantity: quantity.1,
        base_price,
        price_per_unit,
        yearly_discount,
        features: features.iter().map(|f| f.to_string()).collect(),
    }
}

fn default_services() -> Vec<ServiceCategory> {
    vec![
        service(
            "workplace-management",
            "Werkplekbeheer",
            "Workplace management",
            "user",
            (1, 500),
            0.0,
            45.0,
            10.0,
            &["Helpdesk", "Patch management", "Endpoint monitoring"],
        ),
        service(
            "server-management",
            "Serverbeheer",
            "Server management",
            "server",
            (1, 50),
            50.0,
            95.0,
            10.0,
            &["24/7 monitoring", "Backup verification", "Capacity reporting"],
        ),
        service(
            "microsoft-365",
            "Microsoft 365 beheer",
            "Microsoft 365 management",
            "user",
            (1, 1000),
            0.0,
            8.5,
            5.0,
            &["License management", "Exchange and Teams administration"],
        ),
        service(
            "cloud-backup",
            "Cloud back-up",
            "Cloud backup",
            "100 GB",
            (1, 200),
            25.0,
            12.0,
            15.0,
            &["Daily backups", "30-day retention", "Restore tests"],
        ),
        service(
            "security-monitoring",
            "Security monitoring",
            "Security monitoring",
            "device",
            (5, 1000),
            150.0,
            6.0,
            10.0,
            &["SIEM", "Threat hunting", "Monthly security report"],
        ),
        service(
            "network-management",
            "Netwerkbeheer",
            "Network management",
            "location",
            (1, 25),
            75.0,
            125.0,
            0.0,
            &["Firewall", "Wi-Fi", "Switch configuration"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = ServiceCatalog::default();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.len(), 6);
        assert!(catalog.get("cloud-backup").is_some());
        assert!(catalog.get("coffee-machine").is_none());
    }

    #[test]
    fn test_display_name_by_locale() {
        let catalog = ServiceCatalog::default();
        let service = catalog.get("server-management").unwrap();
        assert_eq!(service.display_name("nl"), "Serverbeheer");
        assert_eq!(service.display_name("EN"), "Server management");
        assert_eq!(service.display_name("de"), "Serverbeheer");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut services = default_services();
        services.push(services[0].clone());
        let err = ServiceCatalog::new(services).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_quantity_range_and_discount_checked() {
        let mut services = default_services();
        services[0].min_quantity = 10;
        services[0].max_quantity = 5;
        assert!(ServiceCatalog::new(services).is_err());

        let mut services = default_services();
        services[1].yearly_discount = 120.0;
        assert!(ServiceCatalog::new(services).is_err());
    }

    #[test]
    fn test_catalog_deserializes_from_toml_array() {
        #[derive(Deserialize)]
        struct Wrapper {
            catalog: ServiceCatalog,
        }

        let wrapper: Wrapper = toml::from_str(
            r#"
            [[catalog]]
            id = "printing"
            name_nl = "Printbeheer"
            name_en = "Print management"
            unit = "printer"
            min_quantity = 1
            max_quantity = 20
            base_price = 10.0
            price_per_unit = 15.0
            "#,
        )
        .unwrap();

        let service = wrapper.catalog.get("printing").unwrap();
        assert_eq!(service.yearly_discount, 0.0);
        assert!(service.features.is_empty());
    }
}
