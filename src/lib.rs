//! locmatch: Location Matcher
//!
//! A library and CLI tool for checking whether a resolved location — the
//! caller's current network-derived position or a searched place name —
//! matches a fixed reference location at 4-decimal coordinate precision.
//!
//! ## Features
//!
//! - Network-based geolocation + reverse geocoding (current location)
//! - Forward geocoding for free-text place names
//! - Rounded coordinate equality against one reference point
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use locmatch::geo::Coordinate;
//! use locmatch::matcher;
//!
//! let reference = Coordinate::new(12.9145732, 77.6385797);
//! let searched = Coordinate::new(12.91457321, 77.63857968);
//!
//! // Both round to the same 4-decimal coordinate
//! let verdict = matcher::evaluate(searched, reference).unwrap();
//! println!("Verdict: {}", verdict);
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod geo;
pub mod matcher;
pub mod reference;
pub mod resolver;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use geo::{Coordinate, GeoProvider, ResolvedLocation};
pub use matcher::MatchVerdict;
pub use reference::ReferenceLocation;
