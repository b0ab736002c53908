//! Centralized constants for the locmatch crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// External API endpoints
pub mod api {
    /// Google network-based geolocation API (POST, coordinate from network signals)
    pub const GEOLOCATION_URL: &str = "https://www.googleapis.com/geolocation/v1/geolocate";

    /// Google geocoding API (GET, forward and reverse)
    pub const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

    /// Timeout applied to every outbound call, in seconds
    pub const UPSTREAM_TIMEOUT_SECS: u64 = 5;
}

/// Match evaluation settings
pub mod matching {
    /// Decimal places both axes are rounded to before comparison
    /// (~11 m of latitude at the equator)
    pub const PRECISION_DECIMALS: u32 = 4;
}

/// The fixed reference location every request is compared against
pub mod reference {
    pub const NAME: &str = "BridgeLabz Solutions Bengaluru";
    pub const LATITUDE: f64 = 12.9145732;
    pub const LONGITUDE: f64 = 77.6385797;
}
