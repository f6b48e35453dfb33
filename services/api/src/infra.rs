use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use utility_dashboard::config::RegistryConfig;
use utility_dashboard::properties::{
    InMemoryPropertyStore, NewComplex, NewSingleProperty, PropertyRegistry,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type MemoryRegistry = PropertyRegistry<InMemoryPropertyStore>;

pub(crate) fn build_registry(config: RegistryConfig) -> Arc<MemoryRegistry> {
    let store = Arc::new(InMemoryPropertyStore::default());
    Arc::new(PropertyRegistry::new(store, config))
}

/// Single-family sample portfolio used by the demo command.
pub(crate) fn sample_properties() -> Vec<NewSingleProperty> {
    [
        (
            "Sunset Villa",
            "123 Ocean Drive, Miami, FL",
            "Single Family Home",
            (850.0, 102.50),
            (4200.0, 45.80),
            (450.0, 79.99),
        ),
        (
            "Downtown Loft",
            "456 Main Street, Austin, TX",
            "Apartment",
            (620.0, 74.40),
            (2800.0, 32.50),
            (780.0, 89.99),
        ),
        (
            "Garden Cottage",
            "789 Maple Lane, Portland, OR",
            "Cottage",
            (540.0, 64.80),
            (3200.0, 38.40),
            (320.0, 69.99),
        ),
        (
            "Riverside Condo",
            "321 River Road, Denver, CO",
            "Condo",
            (680.0, 81.60),
            (2600.0, 31.20),
            (590.0, 84.99),
        ),
    ]
    .into_iter()
    .map(
        |(name, address, property_type, electricity, water, internet)| NewSingleProperty {
            name: name.to_string(),
            address: address.to_string(),
            property_type: property_type.to_string(),
            electricity_usage: Some(electricity.0),
            electricity_cost: Some(electricity.1),
            water_usage: Some(water.0),
            water_cost: Some(water.1),
            internet_usage: Some(internet.0),
            internet_cost: Some(internet.1),
        },
    )
    .collect()
}

pub(crate) fn sample_complex() -> NewComplex {
    NewComplex {
        name: "Harbor View Apartments".to_string(),
        address: "789 Waterfront Blvd, Seattle, WA".to_string(),
        total_units: Some(24),
        occupied_units: Some(22),
    }
}
