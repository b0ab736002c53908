//! HTTP API routes
//!
//! Defines the inbound contract: the two location-check endpoints and a
//! status endpoint. "Not found" and "no match" are ordinary 200
//! responses; genuine failures map to 500 (configuration, upstream
//! shape, storage, comparison) or 502 (upstream transport).

use crate::constants;
use crate::error::Error;
use crate::geo::{GeoProvider, ResolvedLocation};
use crate::matcher::{self, MatchVerdict};
use crate::reference::ReferenceLocation;
use crate::server::state::AppState;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Create the API router
pub fn create_router<P: GeoProvider + 'static>(state: Arc<AppState<P>>) -> Router {
    Router::new()
        .route("/current-location", get(current_location_handler::<P>))
        .route("/search-location", post(search_location_handler::<P>))
        .route("/api/status", get(status_handler))
        .with_state(state)
}

/// Reference location as exposed to API clients
#[derive(Debug, Serialize, Deserialize)]
pub struct ReferencePayload {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl From<ReferenceLocation> for ReferencePayload {
    fn from(location: ReferenceLocation) -> Self {
        Self {
            name: location.name,
            latitude: location.coordinate.lat,
            longitude: location.coordinate.lng,
            address: location.address,
        }
    }
}

/// A resolved location as exposed to API clients
#[derive(Debug, Serialize, Deserialize)]
pub struct LocationPayload {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl From<ResolvedLocation> for LocationPayload {
    fn from(location: ResolvedLocation) -> Self {
        Self {
            latitude: location.coordinate.lat,
            longitude: location.coordinate.lng,
            address: location.address,
        }
    }
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip)]
    pub status: StatusCode,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let (code, status) = match &err {
            Error::MissingCredential => ("MISSING_CREDENTIAL", StatusCode::INTERNAL_SERVER_ERROR),
            Error::UpstreamUnavailable(_) => ("UPSTREAM_UNAVAILABLE", StatusCode::BAD_GATEWAY),
            Error::UpstreamShape(_) => ("UPSTREAM_SHAPE", StatusCode::INTERNAL_SERVER_ERROR),
            Error::Storage(_) => ("STORAGE", StatusCode::INTERNAL_SERVER_ERROR),
            Error::Comparison(_) => ("COMPARISON", StatusCode::INTERNAL_SERVER_ERROR),
            Error::InvalidCoordinates(_) => {
                ("INVALID_COORDINATES", StatusCode::INTERNAL_SERVER_ERROR)
            }
            _ => ("INTERNAL_ERROR", StatusCode::INTERNAL_SERVER_ERROR),
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
            status,
        }
    }
}

/// Current-location check response
#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentLocationResponse {
    #[serde(rename = "match")]
    pub verdict: MatchVerdict,
    pub reference: ReferencePayload,
    pub current: LocationPayload,
}

/// Check the caller's current location against the reference
///
/// GET /current-location
async fn current_location_handler<P: GeoProvider + 'static>(
    State(state): State<Arc<AppState<P>>>,
) -> Result<Json<CurrentLocationResponse>, ApiError> {
    let reference = state.reference.get().map_err(ApiError::from)?;
    let current = state.resolver.resolve_current().await.map_err(ApiError::from)?;

    let verdict =
        matcher::evaluate(current.coordinate, reference.coordinate).map_err(ApiError::from)?;

    Ok(Json(CurrentLocationResponse {
        verdict,
        reference: reference.into(),
        current: current.into(),
    }))
}

/// Search request body
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchRequest {
    pub place: String,
}

/// Search-location check response
///
/// A search that finds no location is still a 200: `found` is false and
/// the verdict/resolved fields are absent.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchLocationResponse {
    pub found: bool,
    pub place: String,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub verdict: Option<MatchVerdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferencePayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<LocationPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Check a named place against the reference
///
/// POST /search-location
async fn search_location_handler<P: GeoProvider + 'static>(
    State(state): State<Arc<AppState<P>>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchLocationResponse>, ApiError> {
    let reference = state.reference.get().map_err(ApiError::from)?;

    let Some(resolved) = state
        .resolver
        .resolve_search(&req.place)
        .await
        .map_err(ApiError::from)?
    else {
        return Ok(Json(SearchLocationResponse {
            found: false,
            place: req.place.clone(),
            verdict: None,
            reference: None,
            resolved: None,
            message: Some(format!("No location found for '{}'", req.place)),
        }));
    };

    let verdict =
        matcher::evaluate(resolved.coordinate, reference.coordinate).map_err(ApiError::from)?;

    Ok(Json(SearchLocationResponse {
        found: true,
        place: req.place,
        verdict: Some(verdict),
        reference: Some(reference.into()),
        resolved: Some(resolved.into()),
        message: None,
    }))
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Name of the configured reference location
    pub reference: String,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        reference: constants::reference::NAME.to_string(),
    })
}
