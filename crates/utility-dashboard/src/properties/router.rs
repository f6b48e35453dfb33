use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use super::domain::{NewComplex, NewSingleProperty, OwnerId};
use super::rating::ReliabilityRating;
use super::repository::PropertyStore;
use super::scoring::{score_costs, CostProfile, ScorePenalty, ServiceScore};
use super::service::{PropertyRegistry, RegistryError};

/// Router exposing registration, owner listings, public lookup, and score previews.
pub fn property_router<S>(registry: Arc<PropertyRegistry<S>>) -> Router
where
    S: PropertyStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/owners/:owner_id/properties",
            post(create_property_handler::<S>),
        )
        .route(
            "/api/v1/owners/:owner_id/complexes",
            post(create_complex_handler::<S>),
        )
        .route(
            "/api/v1/owners/:owner_id/codes",
            get(owner_codes_handler::<S>),
        )
        .route("/api/v1/codes/:code", get(lookup_handler::<S>))
        .route("/api/v1/service-score", post(service_score_handler))
        .with_state(registry)
}

/// Costs to preview; missing figures count as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceScoreRequest {
    #[serde(default)]
    pub electricity_cost: Option<f64>,
    #[serde(default)]
    pub water_cost: Option<f64>,
    #[serde(default)]
    pub internet_cost: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceScoreResponse {
    pub service_score: ServiceScore,
    pub reliability_rating: ReliabilityRating,
    pub total_cost: f64,
    pub penalties: Vec<ScorePenalty>,
}

pub(crate) async fn create_property_handler<S>(
    State(registry): State<Arc<PropertyRegistry<S>>>,
    Path(owner_id): Path<String>,
    axum::Json(submission): axum::Json<NewSingleProperty>,
) -> Response
where
    S: PropertyStore + 'static,
{
    match registry.create_property(OwnerId(owner_id), submission) {
        Ok(registered) => (StatusCode::CREATED, axum::Json(registered)).into_response(),
        Err(err) => registry_error_response(err),
    }
}

pub(crate) async fn create_complex_handler<S>(
    State(registry): State<Arc<PropertyRegistry<S>>>,
    Path(owner_id): Path<String>,
    axum::Json(submission): axum::Json<NewComplex>,
) -> Response
where
    S: PropertyStore + 'static,
{
    match registry.create_complex(OwnerId(owner_id), submission) {
        Ok(registered) => (StatusCode::CREATED, axum::Json(registered)).into_response(),
        Err(err) => registry_error_response(err),
    }
}

pub(crate) async fn owner_codes_handler<S>(
    State(registry): State<Arc<PropertyRegistry<S>>>,
    Path(owner_id): Path<String>,
) -> Response
where
    S: PropertyStore + 'static,
{
    match registry.owner_codes(&OwnerId(owner_id)) {
        Ok(codes) => (StatusCode::OK, axum::Json(codes)).into_response(),
        Err(err) => registry_error_response(err),
    }
}

pub(crate) async fn lookup_handler<S>(
    State(registry): State<Arc<PropertyRegistry<S>>>,
    Path(code): Path<String>,
) -> Response
where
    S: PropertyStore + 'static,
{
    match registry.lookup(&code) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => registry_error_response(err),
    }
}

pub(crate) async fn service_score_handler(
    axum::Json(request): axum::Json<ServiceScoreRequest>,
) -> Response {
    let costs = match CostProfile::normalized(
        request.electricity_cost,
        request.water_cost,
        request.internet_cost,
    ) {
        Ok(costs) => costs,
        Err(err) => return registry_error_response(err.into()),
    };

    let breakdown = score_costs(&costs);
    let response = ServiceScoreResponse {
        service_score: breakdown.score,
        reliability_rating: breakdown.rating(),
        total_cost: costs.total(),
        penalties: breakdown.penalties,
    };
    (StatusCode::OK, axum::Json(response)).into_response()
}

fn registry_error_response(err: RegistryError) -> Response {
    let status = err.status_code();
    if status.is_server_error() {
        error!(error = %err, "property registry failure");
    }
    (status, axum::Json(json!({ "error": err.to_string() }))).into_response()
}
