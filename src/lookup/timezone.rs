//! Open-Meteo coordinate→timezone lookup client
//!
//! Open-Meteo resolves `timezone=auto` to the IANA zone covering the requested
//! coordinates and echoes it back in the response, which is all this client
//! needs from the API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::{Coordinates, TimezoneFinder};

/// Base URL for the Open-Meteo forecast API
const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Errors that can occur when looking up a timezone by coordinates
#[derive(Debug, Error)]
pub enum TimezoneLookupError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// No timezone is known for the coordinates
    #[error("No timezone found for coordinates: {0}, {1}")]
    NotFound(f64, f64),
}

/// The slice of the Open-Meteo response this client cares about
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    timezone: Option<String>,
}

/// Client for resolving coordinates to an IANA timezone via Open-Meteo
#[derive(Debug, Clone)]
pub struct OpenMeteoTimezoneClient {
    client: Client,
}

impl Default for OpenMeteoTimezoneClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenMeteoTimezoneClient {
    /// Create a new OpenMeteoTimezoneClient with default settings
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a new OpenMeteoTimezoneClient with a custom HTTP client
    #[allow(dead_code)]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetch the IANA timezone covering the given coordinates
    async fn fetch_timezone(&self, coords: Coordinates) -> Result<String, TimezoneLookupError> {
        let url = format!(
            "{}?latitude={}&longitude={}&timezone=auto",
            OPEN_METEO_BASE_URL, coords.latitude, coords.longitude
        );

        let response = self.client.get(&url).send().await?;
        let text = response.text().await?;
        debug!(
            latitude = coords.latitude,
            longitude = coords.longitude,
            "looked up timezone via Open-Meteo"
        );

        parse_response(coords, &text)
    }
}

/// Parse an Open-Meteo response into a timezone identifier
fn parse_response(coords: Coordinates, body: &str) -> Result<String, TimezoneLookupError> {
    let response: OpenMeteoResponse = serde_json::from_str(body)?;
    match response.timezone {
        Some(tz) if !tz.trim().is_empty() => Ok(tz),
        _ => Err(TimezoneLookupError::NotFound(
            coords.latitude,
            coords.longitude,
        )),
    }
}

#[async_trait]
impl TimezoneFinder for OpenMeteoTimezoneClient {
    async fn lookup(&self, coords: Coordinates) -> Result<String, TimezoneLookupError> {
        self.fetch_timezone(coords).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANGKOK: Coordinates = Coordinates {
        latitude: 13.7563,
        longitude: 100.5018,
    };

    #[test]
    fn test_parse_response_extracts_timezone() {
        let body = r#"{"latitude": 13.75, "longitude": 100.5, "timezone": "Asia/Bangkok", "timezone_abbreviation": "+07"}"#;
        let tz = parse_response(BANGKOK, body).expect("Should parse");
        assert_eq!(tz, "Asia/Bangkok");
    }

    #[test]
    fn test_parse_response_missing_timezone_is_not_found() {
        let body = r#"{"latitude": 13.75, "longitude": 100.5}"#;
        let result = parse_response(BANGKOK, body);
        assert!(matches!(result, Err(TimezoneLookupError::NotFound(_, _))));
    }

    #[test]
    fn test_parse_response_blank_timezone_is_not_found() {
        let body = r#"{"timezone": "  "}"#;
        let result = parse_response(BANGKOK, body);
        assert!(matches!(result, Err(TimezoneLookupError::NotFound(_, _))));
    }

    #[test]
    fn test_parse_response_malformed_json() {
        let result = parse_response(BANGKOK, "oops");
        assert!(matches!(result, Err(TimezoneLookupError::ParseError(_))));
    }
}
