//! Location resolution
//!
//! Turns "where am I" and "where is this place" into a `ResolvedLocation`
//! via the configured `GeoProvider`. The current-location path chains two
//! upstream calls: geolocate for the coordinate, then reverse geocoding
//! for the address. The second call is enrichment only; its failure never
//! fails the request.

use crate::error::Result;
use crate::geo::{GeoProvider, ResolvedLocation};
use tracing::warn;

/// Address used when reverse geocoding yields nothing
pub const UNKNOWN_ADDRESS: &str = "Unknown";

/// Resolves locations through a geolocation/geocoding provider
#[derive(Debug, Clone)]
pub struct LocationResolver<P: GeoProvider> {
    provider: P,
}

impl<P: GeoProvider> LocationResolver<P> {
    /// Create a resolver backed by the given provider
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Resolve the caller's current location from network signals
    ///
    /// The coordinate is authoritative. The address comes from a
    /// best-effort reverse geocode and falls back to `"Unknown"` when
    /// that call fails or returns nothing.
    pub async fn resolve_current(&self) -> Result<ResolvedLocation> {
        let coordinate = self.provider.locate().await?;

        let address = match self.provider.reverse_geocode(coordinate).await {
            Ok(Some(address)) => address,
            Ok(None) => UNKNOWN_ADDRESS.to_string(),
            Err(e) => {
                warn!("Reverse geocoding failed, using address fallback: {}", e);
                UNKNOWN_ADDRESS.to_string()
            }
        };

        Ok(ResolvedLocation::with_address(coordinate, address))
    }

    /// Resolve a free-text place name via forward geocoding
    ///
    /// Returns `Ok(None)` when the upstream knows no such place.
    pub async fn resolve_search(&self, place: &str) -> Result<Option<ResolvedLocation>> {
        self.provider.forward_geocode(place).await
    }
}
