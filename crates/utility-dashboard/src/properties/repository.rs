use super::codes::PropertyCode;
use super::domain::{
    ComplexId, OwnerId, PropertyCodeRecord, PropertyId, RealEstateComplex, SingleProperty,
};

/// Storage abstraction for properties, complexes, and their codes.
///
/// Code strings are unique: `insert_code` answers [`RepositoryError::Conflict`]
/// when the code is already taken.
pub trait PropertyStore: Send + Sync {
    fn insert_property(&self, property: SingleProperty) -> Result<SingleProperty, RepositoryError>;
    fn insert_complex(
        &self,
        complex: RealEstateComplex,
    ) -> Result<RealEstateComplex, RepositoryError>;
    fn insert_code(&self, record: PropertyCodeRecord)
        -> Result<PropertyCodeRecord, RepositoryError>;
    /// Drop a property whose code could not be issued.
    fn remove_property(&self, id: &PropertyId) -> Result<(), RepositoryError>;
    fn remove_complex(&self, id: &ComplexId) -> Result<(), RepositoryError>;
    fn find_property(&self, id: &PropertyId) -> Result<Option<SingleProperty>, RepositoryError>;
    fn find_complex(&self, id: &ComplexId) -> Result<Option<RealEstateComplex>, RepositoryError>;
    fn find_code(&self, code: &PropertyCode)
        -> Result<Option<PropertyCodeRecord>, RepositoryError>;
    /// Bump the public view counter, returning the new count.
    fn record_view(&self, code: &PropertyCode) -> Result<u64, RepositoryError>;
    /// Codes linked to the owner's properties and complexes, newest first.
    fn codes_for_owner(&self, owner: &OwnerId) -> Result<Vec<PropertyCodeRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
