//! Reference location provider
//!
//! The comparison target is a single fixed location. When a snapshot path
//! is configured, the constant is also written to disk as a flat JSON
//! object on every `get()` call; a failed write is a storage error
//! surfaced to the caller. The content never varies, so concurrent
//! rewrites of the same file are last-writer-wins and benign.

use crate::config::Config;
use crate::constants::reference;
use crate::error::{Error, Result};
use crate::geo::Coordinate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// The fixed location every request is compared against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceLocation {
    pub name: String,
    pub coordinate: Coordinate,
    pub address: Option<String>,
}

/// On-disk snapshot shape: a flat object, not the nested in-memory form
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    name: String,
    latitude: f64,
    longitude: f64,
    address: Option<String>,
}

/// Provides the reference location, optionally persisting a snapshot
#[derive(Debug, Clone, Default)]
pub struct ReferenceProvider {
    snapshot_path: Option<PathBuf>,
}

impl ReferenceProvider {
    /// Create a provider that never touches disk
    pub fn new() -> Self {
        Self {
            snapshot_path: None,
        }
    }

    /// Create a provider that writes a snapshot on every `get()`
    pub fn with_snapshot_path(path: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_path: Some(path.into()),
        }
    }

    /// Create a provider from configuration
    pub fn from_config(config: &Config) -> Self {
        if config.reference.snapshot_path.is_empty() {
            Self::new()
        } else {
            Self::with_snapshot_path(config.reference.snapshot_path.clone())
        }
    }

    /// Return the reference location
    ///
    /// Writes the snapshot first when one is configured, so a failed
    /// write surfaces before the value is used.
    pub fn get(&self) -> Result<ReferenceLocation> {
        let location = ReferenceLocation {
            name: reference::NAME.to_string(),
            coordinate: Coordinate::new(reference::LATITUDE, reference::LONGITUDE),
            address: None,
        };

        if let Some(path) = &self.snapshot_path {
            self.write_snapshot(&location, path)?;
        }

        Ok(location)
    }

    fn write_snapshot(&self, location: &ReferenceLocation, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Storage(format!("Failed to create snapshot directory: {}", e)))?;
        }

        let snapshot = Snapshot {
            name: location.name.clone(),
            latitude: location.coordinate.lat,
            longitude: location.coordinate.lng,
            address: location.address.clone(),
        };

        let content = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| Error::Storage(format!("Failed to serialize snapshot: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| Error::Storage(format!("Failed to write snapshot: {}", e)))?;

        Ok(())
    }
}
