use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bookable service offered by the workshop catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: ServiceCategory,
    pub price: Decimal,
    /// Duration in minutes.
    pub duration: u32,
    #[serde(default = "Service::default_available")]
    pub is_available: bool,
}

impl Service {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: ServiceCategory,
        price: Decimal,
        duration: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category,
            price,
            duration,
            is_available: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.is_available = false;
        self
    }

    /// Non-negative price and a positive duration.
    pub fn is_well_formed(&self) -> bool {
        !self.price.is_sign_negative() && self.duration > 0
    }

    fn default_available() -> bool {
        true
    }
}

/// Catalog line: name, category, duration and price.
impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} min) ${:.2}",
            self.name, self.category, self.duration, self.price
        )
    }
}

/// Catalog classification used for recommendations and bundles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Maintenance,
    Repair,
    Inspection,
    Customization,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 4] = [
        ServiceCategory::Maintenance,
        ServiceCategory::Repair,
        ServiceCategory::Inspection,
        ServiceCategory::Customization,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Maintenance => "maintenance",
            ServiceCategory::Repair => "repair",
            ServiceCategory::Inspection => "inspection",
            ServiceCategory::Customization => "customization",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().expect("valid decimal")
    }

    #[test]
    fn deserializes_catalog_payload() {
        let json = r#"{
            "id": "svc-1",
            "name": "Oil Change",
            "description": "Synthetic oil and filter",
            "category": "maintenance",
            "price": 49.99,
            "duration": 30,
            "isAvailable": false
        }"#;
        let service: Service = serde_json::from_str(json).expect("parse service");
        assert_eq!(service.category, ServiceCategory::Maintenance);
        assert_eq!(service.price, dec("49.99"));
        assert!(!service.is_available);
    }

    #[test]
    fn negative_price_or_zero_duration_is_malformed() {
        let ok = Service::new("a", "Wash", ServiceCategory::Customization, dec("0"), 20);
        assert!(ok.is_well_formed());
        let negative = Service::new("b", "Wash", ServiceCategory::Customization, dec("-1.00"), 20);
        assert!(!negative.is_well_formed());
        let instant = Service::new("c", "Wash", ServiceCategory::Customization, dec("10"), 0);
        assert!(!instant.is_well_formed());
    }

    #[test]
    fn availability_defaults_to_true() {
        let json = r#"{"id":"s","name":"Tune","category":"repair","price":"10","duration":15}"#;
        let service: Service = serde_json::from_str(json).expect("parse service");
        assert!(service.is_available);
        assert!(service.description.is_empty());
    }
}
