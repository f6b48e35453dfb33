//! Property registration, public lookup codes, and utility service scoring.
//!
//! `codes`, `scoring`, and `rating` are pure and hold no state between calls.
//! The registry composes them with a [`PropertyStore`] when an owner adds a
//! property or complex, and serves the public lookup that reads the results back.

pub mod codes;
pub mod domain;
pub mod memory;
pub mod rating;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use codes::{
    generate_complex_code, generate_single_code, name_initials, type_initials, CodeKind,
    MalformedCode, PropertyCode, PropertyCodeGenerator,
};
pub use domain::{
    CodeRecordId, CodeSubject, ComplexId, InvalidArgument, NewComplex, NewSingleProperty,
    OwnerCodeView, OwnerId, PropertyCodeRecord, PropertyId, PublicCodeView, RealEstateComplex,
    RegisteredComplex, RegisteredProperty, SingleProperty, UtilityReading,
    COMPLEX_PROPERTY_TYPE, DEFAULT_PROPERTY_TYPE,
};
pub use memory::InMemoryPropertyStore;
pub use rating::{get_reliability_rating, ReliabilityRating};
pub use repository::{PropertyStore, RepositoryError};
pub use router::property_router;
pub use scoring::{
    calculate_service_score, score_costs, CostProfile, PenaltyFactor, ScoreBreakdown,
    ScorePenalty, ServiceScore,
};
pub use service::{PropertyRegistry, RegistryError};
