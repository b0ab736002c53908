//! Server shared state
//!
//! Holds configuration and the per-request collaborators. Generic over
//! the geo provider so tests can substitute a scripted fake.

use crate::config::Config;
use crate::geo::GeoProvider;
use crate::reference::ReferenceProvider;
use crate::resolver::LocationResolver;

/// Shared state for the HTTP server
pub struct AppState<P: GeoProvider> {
    /// Configuration
    pub config: Config,

    /// Reference location provider
    pub reference: ReferenceProvider,

    /// Location resolver backed by the geo provider
    pub resolver: LocationResolver<P>,
}

impl<P: GeoProvider> AppState<P> {
    /// Create new application state
    pub fn new(config: Config, provider: P) -> Self {
        let reference = ReferenceProvider::from_config(&config);
        Self {
            config,
            reference,
            resolver: LocationResolver::new(provider),
        }
    }
}
