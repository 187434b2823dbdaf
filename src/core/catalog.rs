use crate::domain::{Service, ServiceCategory};

/// Local narrowing of the fetched catalog for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub category: Option<ServiceCategory>,
    pub query: Option<String>,
    pub available_only: bool,
}

impl CatalogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: ServiceCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = if query.trim().is_empty() {
            None
        } else {
            Some(query)
        };
        self
    }

    pub fn available_only(mut self) -> Self {
        self.available_only = true;
        self
    }

    pub fn matches(&self, service: &Service) -> bool {
        if self.available_only && !service.is_available {
            return false;
        }
        if let Some(category) = self.category {
            if service.category != category {
                return false;
            }
        }
        match &self.query {
            Some(query) => {
                let needle = query.trim().to_lowercase();
                service.name.to_lowercase().contains(&needle)
                    || service.description.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }

    pub fn apply<'a>(&self, catalog: &'a [Service]) -> Vec<&'a Service> {
        catalog.iter().filter(|service| self.matches(service)).collect()
    }
}
