//! Lookup collaborators consumed by the resolver
//!
//! The resolver only depends on the three traits defined here: place name to
//! coordinates, coordinates to IANA timezone identifier, and timezone identifier
//! to a human-readable current-time string. The production implementations are
//! thin single-call wrappers around external services and the timezone database;
//! tests substitute stubs.

pub mod format;
pub mod geocode;
pub mod timezone;

pub use format::{ClockFormatter, FormatError};
pub use geocode::{GeocodeError, NominatimClient};
pub use timezone::{OpenMeteoTimezoneClient, TimezoneLookupError};

use async_trait::async_trait;

/// A geographic point returned by geocoding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees, [-90, 90]
    pub latitude: f64,
    /// Longitude in decimal degrees, [-180, 180]
    pub longitude: f64,
}

/// Resolves a free-text place name to coordinates
#[async_trait]
pub trait Geocoder {
    async fn geocode(&self, query: &str) -> Result<Coordinates, GeocodeError>;
}

/// Resolves coordinates to an IANA timezone identifier
#[async_trait]
pub trait TimezoneFinder {
    async fn lookup(&self, coords: Coordinates) -> Result<String, TimezoneLookupError>;
}

/// Renders the current instant in a given IANA timezone
pub trait TimeFormatter {
    fn format(&self, timezone: &str) -> Result<String, FormatError>;
}
