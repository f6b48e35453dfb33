use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::config::RegistryConfig;
use crate::properties::codes::PropertyCode;
use crate::properties::domain::{
    ComplexId, NewComplex, NewSingleProperty, OwnerId, PropertyCodeRecord, PropertyId,
    RealEstateComplex, SingleProperty,
};
use crate::properties::memory::InMemoryPropertyStore;
use crate::properties::repository::{PropertyStore, RepositoryError};
use crate::properties::{property_router, PropertyRegistry};

pub(super) const SEED: u64 = 20_240_915;

pub(super) fn owner() -> OwnerId {
    OwnerId("owner-ana".to_string())
}

pub(super) fn other_owner() -> OwnerId {
    OwnerId("owner-ben".to_string())
}

pub(super) fn registry_config() -> RegistryConfig {
    RegistryConfig {
        code_seed: Some(SEED),
        code_attempts: 1,
    }
}

pub(super) fn sunset_villa() -> NewSingleProperty {
    NewSingleProperty {
        name: "Sunset Villa".to_string(),
        address: "123 Ocean Drive, Miami, FL".to_string(),
        property_type: "Single Family Home".to_string(),
        electricity_usage: Some(850.0),
        electricity_cost: Some(102.50),
        water_usage: Some(4200.0),
        water_cost: Some(45.80),
        internet_usage: Some(450.0),
        internet_cost: Some(79.99),
    }
}

pub(super) fn costly_loft() -> NewSingleProperty {
    NewSingleProperty {
        name: "Downtown Loft".to_string(),
        address: "456 Main Street, Austin, TX".to_string(),
        property_type: "Apartment".to_string(),
        electricity_usage: None,
        electricity_cost: Some(150.0),
        water_usage: None,
        water_cost: Some(70.0),
        internet_usage: None,
        internet_cost: Some(110.0),
    }
}

pub(super) fn harbor_view() -> NewComplex {
    NewComplex {
        name: "Harbor View Apartments".to_string(),
        address: "789 Waterfront Blvd, Seattle, WA".to_string(),
        total_units: Some(24),
        occupied_units: Some(22),
    }
}

pub(super) fn build_registry() -> (
    PropertyRegistry<InMemoryPropertyStore>,
    Arc<InMemoryPropertyStore>,
) {
    let store = Arc::new(InMemoryPropertyStore::default());
    let registry = PropertyRegistry::new(store.clone(), registry_config());
    (registry, store)
}

pub(super) fn router_with_registry(
    registry: PropertyRegistry<InMemoryPropertyStore>,
) -> axum::Router {
    property_router(Arc::new(registry))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Rejects the first `collisions` code inserts as duplicates.
#[derive(Default)]
pub(super) struct CollidingStore {
    pub(super) inner: InMemoryPropertyStore,
    pub(super) collisions: usize,
    pub(super) attempts: AtomicUsize,
}

impl CollidingStore {
    pub(super) fn new(collisions: usize) -> Self {
        Self {
            collisions,
            ..Self::default()
        }
    }

    pub(super) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl PropertyStore for CollidingStore {
    fn insert_property(&self, property: SingleProperty) -> Result<SingleProperty, RepositoryError> {
        self.inner.insert_property(property)
    }

    fn insert_complex(
        &self,
        complex: RealEstateComplex,
    ) -> Result<RealEstateComplex, RepositoryError> {
        self.inner.insert_complex(complex)
    }

    fn insert_code(
        &self,
        record: PropertyCodeRecord,
    ) -> Result<PropertyCodeRecord, RepositoryError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.collisions {
            return Err(RepositoryError::Conflict);
        }
        self.inner.insert_code(record)
    }

    fn remove_property(&self, id: &PropertyId) -> Result<(), RepositoryError> {
        self.inner.remove_property(id)
    }

    fn remove_complex(&self, id: &ComplexId) -> Result<(), RepositoryError> {
        self.inner.remove_complex(id)
    }

    fn find_property(&self, id: &PropertyId) -> Result<Option<SingleProperty>, RepositoryError> {
        self.inner.find_property(id)
    }

    fn find_complex(&self, id: &ComplexId) -> Result<Option<RealEstateComplex>, RepositoryError> {
        self.inner.find_complex(id)
    }

    fn find_code(
        &self,
        code: &PropertyCode,
    ) -> Result<Option<PropertyCodeRecord>, RepositoryError> {
        self.inner.find_code(code)
    }

    fn record_view(&self, code: &PropertyCode) -> Result<u64, RepositoryError> {
        self.inner.record_view(code)
    }

    fn codes_for_owner(&self, owner: &OwnerId) -> Result<Vec<PropertyCodeRecord>, RepositoryError> {
        self.inner.codes_for_owner(owner)
    }
}

pub(super) struct UnavailableStore;

impl PropertyStore for UnavailableStore {
    fn insert_property(&self, _property: SingleProperty) -> Result<SingleProperty, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_complex(
        &self,
        _complex: RealEstateComplex,
    ) -> Result<RealEstateComplex, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_code(
        &self,
        _record: PropertyCodeRecord,
    ) -> Result<PropertyCodeRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove_property(&self, _id: &PropertyId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove_complex(&self, _id: &ComplexId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_property(&self, _id: &PropertyId) -> Result<Option<SingleProperty>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_complex(&self, _id: &ComplexId) -> Result<Option<RealEstateComplex>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_code(
        &self,
        _code: &PropertyCode,
    ) -> Result<Option<PropertyCodeRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn record_view(&self, _code: &PropertyCode) -> Result<u64, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn codes_for_owner(
        &self,
        _owner: &OwnerId,
    ) -> Result<Vec<PropertyCodeRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
