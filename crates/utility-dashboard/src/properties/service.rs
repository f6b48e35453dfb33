use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use chrono::Utc;
use tracing::{info, warn};

use super::codes::{MalformedCode, PropertyCode, PropertyCodeGenerator};
use super::domain::{
    CodeRecordId, CodeSubject, ComplexId, InvalidArgument, NewComplex, NewSingleProperty,
    OwnerCodeView, OwnerId, PropertyCodeRecord, PropertyId, PublicCodeView, RealEstateComplex,
    RegisteredComplex, RegisteredProperty, SingleProperty, UtilityReading, COMPLEX_PROPERTY_TYPE,
};
use super::repository::{PropertyStore, RepositoryError};
use super::scoring::{score_costs, CostProfile, ServiceScore};
use crate::config::RegistryConfig;

/// Creation and lookup workflows over a [`PropertyStore`].
///
/// A record's code, score, and rating are computed before the code row is
/// inserted and never change afterwards.
pub struct PropertyRegistry<S> {
    store: Arc<S>,
    generator: Mutex<PropertyCodeGenerator>,
    config: RegistryConfig,
}

static PROPERTY_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static COMPLEX_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static CODE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_property_id() -> PropertyId {
    let id = PROPERTY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    PropertyId(format!("prop-{id:06}"))
}

fn next_complex_id() -> ComplexId {
    let id = COMPLEX_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ComplexId(format!("cplx-{id:06}"))
}

fn next_code_record_id() -> CodeRecordId {
    let id = CODE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CodeRecordId(format!("code-{id:06}"))
}

impl<S> PropertyRegistry<S>
where
    S: PropertyStore + 'static,
{
    pub fn new(store: Arc<S>, config: RegistryConfig) -> Self {
        let generator = match config.code_seed {
            Some(seed) => PropertyCodeGenerator::seeded(seed),
            None => PropertyCodeGenerator::from_entropy(),
        };
        Self::with_generator(store, generator, config)
    }

    pub fn with_generator(
        store: Arc<S>,
        generator: PropertyCodeGenerator,
        config: RegistryConfig,
    ) -> Self {
        Self {
            store,
            generator: Mutex::new(generator),
            config,
        }
    }

    /// Store a single property and issue its code, score, and rating.
    ///
    /// If no code can be stored the property row is removed again before the
    /// error is returned.
    pub fn create_property(
        &self,
        owner_id: OwnerId,
        submission: NewSingleProperty,
    ) -> Result<RegisteredProperty, RegistryError> {
        let name = required_name(&submission.name)?;
        let costs = CostProfile::normalized(
            submission.electricity_cost,
            submission.water_cost,
            submission.internet_cost,
        )?;

        let property = self.store.insert_property(SingleProperty {
            id: next_property_id(),
            owner_id,
            name,
            address: submission.address.trim().to_string(),
            property_type: submission.property_type.trim().to_string(),
            electricity: UtilityReading {
                usage: submission.electricity_usage.unwrap_or(0.0),
                cost: costs.electricity(),
            },
            water: UtilityReading {
                usage: submission.water_usage.unwrap_or(0.0),
                cost: costs.water(),
            },
            internet: UtilityReading {
                usage: submission.internet_usage.unwrap_or(0.0),
                cost: costs.internet(),
            },
            created_at: Utc::now(),
        })?;

        let breakdown = score_costs(&costs);
        let code = match self.issue_code(
            CodeSubject::Single(property.id.clone()),
            breakdown.score,
            |generator| generator.generate_single_code(&property.name, &property.property_type),
        ) {
            Ok(code) => code,
            Err(err) => {
                roll_back(&property.id.0, self.store.remove_property(&property.id));
                return Err(err);
            }
        };

        info!(
            property_id = %property.id.0,
            code = %code.code,
            service_score = %code.service_score,
            rating = %code.reliability_rating,
            "registered single property"
        );

        Ok(RegisteredProperty {
            property,
            code,
            breakdown,
        })
    }

    /// Store a complex and issue its code. Complexes carry no utility costs,
    /// so they score as a zero-cost profile.
    pub fn create_complex(
        &self,
        owner_id: OwnerId,
        submission: NewComplex,
    ) -> Result<RegisteredComplex, RegistryError> {
        let name = required_name(&submission.name)?;

        let complex = self.store.insert_complex(RealEstateComplex {
            id: next_complex_id(),
            owner_id,
            name,
            address: submission.address.trim().to_string(),
            total_units: submission.total_units.unwrap_or(0),
            occupied_units: submission.occupied_units.unwrap_or(0),
            created_at: Utc::now(),
        })?;

        let score = CostProfile::zero().service_score();
        let code = match self.issue_code(
            CodeSubject::Complex(complex.id.clone()),
            score,
            |generator| generator.generate_complex_code(&complex.name, complex.total_units),
        ) {
            Ok(code) => code,
            Err(err) => {
                roll_back(&complex.id.0, self.store.remove_complex(&complex.id));
                return Err(err);
            }
        };

        info!(
            complex_id = %complex.id.0,
            code = %code.code,
            total_units = complex.total_units,
            "registered real estate complex"
        );

        Ok(RegisteredComplex { complex, code })
    }

    /// Resolve a public code and count the view.
    ///
    /// The returned view carries the count from before this lookup.
    pub fn lookup(&self, raw_code: &str) -> Result<PublicCodeView, RegistryError> {
        let code = PropertyCode::parse(raw_code)?;
        let record = self
            .store
            .find_code(&code)?
            .ok_or(RepositoryError::NotFound)?;

        let (property_name, property_address, property_type) = match &record.subject {
            CodeSubject::Single(id) => {
                let property = self
                    .store
                    .find_property(id)?
                    .ok_or(RepositoryError::NotFound)?;
                (property.name, property.address, property.property_type)
            }
            CodeSubject::Complex(id) => {
                let complex = self
                    .store
                    .find_complex(id)?
                    .ok_or(RepositoryError::NotFound)?;
                (
                    complex.name,
                    complex.address,
                    COMPLEX_PROPERTY_TYPE.to_string(),
                )
            }
        };

        let views = self.store.record_view(&code)?;
        info!(%code, views, "public code lookup");
        let public_views = views.saturating_sub(1);

        Ok(PublicCodeView {
            code: record.code,
            property_name,
            property_address,
            property_type,
            service_score: record.service_score,
            reliability_rating: record.reliability_rating,
            public_views,
            is_active: record.is_active,
        })
    }

    /// Codes for everything the owner has registered, newest first.
    pub fn owner_codes(&self, owner_id: &OwnerId) -> Result<Vec<OwnerCodeView>, RegistryError> {
        let records = self.store.codes_for_owner(owner_id)?;
        let mut views = Vec::with_capacity(records.len());

        for record in records {
            let described = match &record.subject {
                CodeSubject::Single(id) => self.store.find_property(id)?.map(|property| {
                    (property.name, property.address, property.property_type)
                }),
                CodeSubject::Complex(id) => self.store.find_complex(id)?.map(|complex| {
                    (
                        complex.name,
                        complex.address,
                        COMPLEX_PROPERTY_TYPE.to_string(),
                    )
                }),
            };

            match described {
                Some((property_name, property_address, property_type)) => {
                    views.push(OwnerCodeView {
                        id: record.id,
                        property_name,
                        property_address,
                        property_type,
                        code: record.code,
                        service_score: record.service_score,
                        reliability_rating: record.reliability_rating,
                        public_views: record.public_views,
                        is_active: record.is_active,
                    })
                }
                None => warn!(record_id = %record.id.0, "code links to a missing record"),
            }
        }

        Ok(views)
    }

    fn issue_code<F>(
        &self,
        subject: CodeSubject,
        score: ServiceScore,
        mut generate: F,
    ) -> Result<PropertyCodeRecord, RegistryError>
    where
        F: FnMut(&mut PropertyCodeGenerator) -> Result<PropertyCode, InvalidArgument>,
    {
        let max_attempts = self.config.code_attempts.max(1);
        let mut attempt = 1;

        loop {
            let code = {
                let mut generator = self.generator.lock().expect("generator mutex poisoned");
                generate(&mut *generator)?
            };

            let record = PropertyCodeRecord {
                id: next_code_record_id(),
                code,
                subject: subject.clone(),
                service_score: score,
                reliability_rating: score.rating(),
                public_views: 0,
                is_active: true,
                created_at: Utc::now(),
            };

            match self.store.insert_code(record) {
                Ok(stored) => return Ok(stored),
                Err(RepositoryError::Conflict) if attempt < max_attempts => {
                    warn!(attempt, max_attempts, "property code collision, regenerating");
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

fn roll_back(record_id: &str, removal: Result<(), RepositoryError>) {
    match removal {
        Ok(()) => warn!(record_id, "removed record after its code could not be stored"),
        Err(err) => warn!(record_id, error = %err, "record left without a code"),
    }
}

fn required_name(raw: &str) -> Result<String, InvalidArgument> {
    let name = raw.trim();
    if name.is_empty() {
        Err(InvalidArgument::EmptyName)
    } else {
        Ok(name.to_string())
    }
}

/// Error raised by the property registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
    #[error(transparent)]
    MalformedCode(#[from] MalformedCode),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl RegistryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RegistryError::InvalidArgument(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RegistryError::MalformedCode(_) => StatusCode::BAD_REQUEST,
            RegistryError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            RegistryError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            RegistryError::Repository(RepositoryError::Unavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
