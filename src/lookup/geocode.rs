//! Nominatim (OpenStreetMap) geocoding client
//!
//! This module provides functionality to resolve a free-text place name to
//! coordinates via the public Nominatim search API. Only the best-ranked match
//! is used.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::{Coordinates, Geocoder};

/// Base URL for the Nominatim search API
const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org/search";

/// User-Agent sent with every request, required by the Nominatim usage policy
const USER_AGENT: &str = concat!("timein/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur when geocoding a place name
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The service returned no match for the query
    #[error("No results found for: {0}")]
    NoResults(String),

    /// The best match carried out-of-range or non-numeric coordinates
    #[error("Invalid coordinates for: {0}")]
    InvalidCoordinates(String),
}

/// A single result row from the Nominatim search response
///
/// Nominatim serializes latitude and longitude as strings.
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
}

/// Client for geocoding place names through Nominatim
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
}

impl Default for NominatimClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NominatimClient {
    /// Create a new NominatimClient with default settings
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a new NominatimClient with a custom HTTP client
    #[allow(dead_code)]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetch the best match for the given place name
    async fn fetch_best_match(&self, query: &str) -> Result<Coordinates, GeocodeError> {
        let response = self
            .client
            .get(NOMINATIM_BASE_URL)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?;
        let text = response.text().await?;
        debug!(query, "geocoded place name via Nominatim");

        parse_response(query, &text)
    }
}

/// Parse a Nominatim search response into coordinates
///
/// The first (best-ranked) result wins, matching the original behavior of
/// picking `results[0]`.
fn parse_response(query: &str, body: &str) -> Result<Coordinates, GeocodeError> {
    let results: Vec<NominatimResult> = serde_json::from_str(body)?;
    let best = results
        .into_iter()
        .next()
        .ok_or_else(|| GeocodeError::NoResults(query.to_string()))?;

    let latitude: f64 = best
        .lat
        .parse()
        .map_err(|_| GeocodeError::InvalidCoordinates(query.to_string()))?;
    let longitude: f64 = best
        .lon
        .parse()
        .map_err(|_| GeocodeError::InvalidCoordinates(query.to_string()))?;

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(GeocodeError::InvalidCoordinates(query.to_string()));
    }

    Ok(Coordinates {
        latitude,
        longitude,
    })
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn geocode(&self, query: &str) -> Result<Coordinates, GeocodeError> {
        self.fetch_best_match(query).await
    }
}
