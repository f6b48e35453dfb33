use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::codes::PropertyCode;
use super::rating::ReliabilityRating;
use super::scoring::{ScoreBreakdown, ServiceScore};

/// Form default for new single properties.
pub const DEFAULT_PROPERTY_TYPE: &str = "Single Family Home";

/// Property type reported for complexes in public lookups.
pub const COMPLEX_PROPERTY_TYPE: &str = "Real Estate Complex";

/// Opaque identifier of the account that owns properties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComplexId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeRecordId(pub String);

/// Input rejected before anything is scored or stored.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidArgument {
    #[error("property name must not be empty")]
    EmptyName,
    #[error("{utility} cost must be a finite, non-negative amount (got {value})")]
    Cost { utility: &'static str, value: f64 },
}

/// Monthly consumption and cost for one utility.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UtilityReading {
    pub usage: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleProperty {
    pub id: PropertyId,
    pub owner_id: OwnerId,
    pub name: String,
    pub address: String,
    pub property_type: String,
    pub electricity: UtilityReading,
    pub water: UtilityReading,
    pub internet: UtilityReading,
    pub created_at: DateTime<Utc>,
}

impl SingleProperty {
    pub fn total_cost(&self) -> f64 {
        self.electricity.cost + self.water.cost + self.internet.cost
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealEstateComplex {
    pub id: ComplexId,
    pub owner_id: OwnerId,
    pub name: String,
    pub address: String,
    pub total_units: u32,
    pub occupied_units: u32,
    pub created_at: DateTime<Utc>,
}

/// The single record a code belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum CodeSubject {
    Single(PropertyId),
    Complex(ComplexId),
}

/// Stored code with the score and rating computed at creation time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyCodeRecord {
    pub id: CodeRecordId,
    pub code: PropertyCode,
    pub subject: CodeSubject,
    pub service_score: ServiceScore,
    pub reliability_rating: ReliabilityRating,
    pub public_views: u64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Owner-submitted single property. Missing usage and cost figures count as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSingleProperty {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default = "default_property_type")]
    pub property_type: String,
    #[serde(default)]
    pub electricity_usage: Option<f64>,
    #[serde(default)]
    pub electricity_cost: Option<f64>,
    #[serde(default)]
    pub water_usage: Option<f64>,
    #[serde(default)]
    pub water_cost: Option<f64>,
    #[serde(default)]
    pub internet_usage: Option<f64>,
    #[serde(default)]
    pub internet_cost: Option<f64>,
}

fn default_property_type() -> String {
    DEFAULT_PROPERTY_TYPE.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComplex {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub total_units: Option<u32>,
    #[serde(default)]
    pub occupied_units: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisteredProperty {
    pub property: SingleProperty,
    pub code: PropertyCodeRecord,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisteredComplex {
    pub complex: RealEstateComplex,
    pub code: PropertyCodeRecord,
}

/// What anyone holding a code may see.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicCodeView {
    pub code: PropertyCode,
    pub property_name: String,
    pub property_address: String,
    pub property_type: String,
    pub service_score: ServiceScore,
    pub reliability_rating: ReliabilityRating,
    pub public_views: u64,
    pub is_active: bool,
}

/// Row of an owner's code listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerCodeView {
    pub id: CodeRecordId,
    pub property_name: String,
    pub property_address: String,
    pub property_type: String,
    pub code: PropertyCode,
    pub service_score: ServiceScore,
    pub reliability_rating: ReliabilityRating,
    pub public_views: u64,
    pub is_active: bool,
}
