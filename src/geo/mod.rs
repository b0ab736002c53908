//! Geolocation and geocoding
//!
//! Defines the coordinate/location types and the provider trait the
//! resolver talks through, plus the Google-backed implementation.

pub mod google;

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Create a new coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that the coordinate is within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !self.lat.is_finite() || self.lat < -90.0 || self.lat > 90.0 {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !self.lng.is_finite() || self.lng < -180.0 || self.lng > 180.0 {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

/// A location produced by the resolver for a single request
///
/// The coordinate is authoritative; the address is best-effort enrichment
/// and may be absent when reverse geocoding fails or returns nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub coordinate: Coordinate,
    pub address: Option<String>,
}

impl ResolvedLocation {
    /// Create a resolved location without an address
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            address: None,
        }
    }

    /// Create a resolved location with an address
    pub fn with_address(coordinate: Coordinate, address: impl Into<String>) -> Self {
        Self {
            coordinate,
            address: Some(address.into()),
        }
    }
}

/// Trait for geolocation/geocoding backends
///
/// All three calls fail with `MissingCredential` before any I/O when no
/// API key is configured, and with `UpstreamUnavailable` on transport
/// failures.
pub trait GeoProvider: Send + Sync {
    /// Derive the caller's current coordinate from network signals
    fn locate(&self) -> impl std::future::Future<Output = Result<Coordinate>> + Send;

    /// Reverse-geocode a coordinate into a formatted address
    ///
    /// Returns `Ok(None)` when the upstream has no address for the
    /// coordinate (non-OK status or zero results).
    fn reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;

    /// Forward-geocode a free-text place name to a coordinate + address
    ///
    /// Returns `Ok(None)` when the place is unknown to the upstream.
    fn forward_geocode(
        &self,
        place: &str,
    ) -> impl std::future::Future<Output = Result<Option<ResolvedLocation>>> + Send;
}
