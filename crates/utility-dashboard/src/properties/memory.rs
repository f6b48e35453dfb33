use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::codes::PropertyCode;
use super::domain::{
    CodeSubject, ComplexId, OwnerId, PropertyCodeRecord, PropertyId, RealEstateComplex,
    SingleProperty,
};
use super::repository::{PropertyStore, RepositoryError};

#[derive(Debug, Default)]
struct Tables {
    properties: HashMap<PropertyId, SingleProperty>,
    complexes: HashMap<ComplexId, RealEstateComplex>,
    codes: Vec<PropertyCodeRecord>,
}

impl Tables {
    fn owner_of(&self, subject: &CodeSubject) -> Option<&OwnerId> {
        match subject {
            CodeSubject::Single(id) => self.properties.get(id).map(|property| &property.owner_id),
            CodeSubject::Complex(id) => self.complexes.get(id).map(|complex| &complex.owner_id),
        }
    }
}

/// Process-local store backing the demo service and tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPropertyStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryPropertyStore {
    pub fn code_count(&self) -> usize {
        self.tables.lock().expect("store mutex poisoned").codes.len()
    }

    pub fn property_count(&self) -> usize {
        self.tables.lock().expect("store mutex poisoned").properties.len()
    }

    pub fn complex_count(&self) -> usize {
        self.tables.lock().expect("store mutex poisoned").complexes.len()
    }
}

impl PropertyStore for InMemoryPropertyStore {
    fn insert_property(&self, property: SingleProperty) -> Result<SingleProperty, RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        if tables.properties.contains_key(&property.id) {
            return Err(RepositoryError::Conflict);
        }
        tables
            .properties
            .insert(property.id.clone(), property.clone());
        Ok(property)
    }

    fn insert_complex(
        &self,
        complex: RealEstateComplex,
    ) -> Result<RealEstateComplex, RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        if tables.complexes.contains_key(&complex.id) {
            return Err(RepositoryError::Conflict);
        }
        tables.complexes.insert(complex.id.clone(), complex.clone());
        Ok(complex)
    }

    fn insert_code(
        &self,
        record: PropertyCodeRecord,
    ) -> Result<PropertyCodeRecord, RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        if tables
            .codes
            .iter()
            .any(|existing| existing.code == record.code || existing.id == record.id)
        {
            return Err(RepositoryError::Conflict);
        }
        tables.codes.push(record.clone());
        Ok(record)
    }

    fn remove_property(&self, id: &PropertyId) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        tables
            .properties
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    fn remove_complex(&self, id: &ComplexId) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        tables
            .complexes
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    fn find_property(&self, id: &PropertyId) -> Result<Option<SingleProperty>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.properties.get(id).cloned())
    }

    fn find_complex(&self, id: &ComplexId) -> Result<Option<RealEstateComplex>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.complexes.get(id).cloned())
    }

    fn find_code(
        &self,
        code: &PropertyCode,
    ) -> Result<Option<PropertyCodeRecord>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables
            .codes
            .iter()
            .find(|record| &record.code == code)
            .cloned())
    }

    fn record_view(&self, code: &PropertyCode) -> Result<u64, RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        let record = tables
            .codes
            .iter_mut()
            .find(|record| &record.code == code)
            .ok_or(RepositoryError::NotFound)?;
        record.public_views += 1;
        Ok(record.public_views)
    }

    fn codes_for_owner(&self, owner: &OwnerId) -> Result<Vec<PropertyCodeRecord>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables
            .codes
            .iter()
            .rev()
            .filter(|record| tables.owner_of(&record.subject) == Some(owner))
            .cloned()
            .collect())
    }
}
