//! Geocoding provider: Nominatim (OpenStreetMap).
//!
//! Keyless, but the usage policy requires an identifying User-Agent and
//! forbids bulk traffic, so every query asks for exactly one match.

use super::types::{Location, LocationError};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = "atlas-forecast/0.3 (terminal weather client)";

/// Anything that can turn free text into at most one [`Location`].
///
/// `Ok(None)` means the service answered with zero candidates;
/// `Err` means no usable answer at all.
pub trait Geocoder {
    fn geocode(&self, query: &str) -> Result<Option<Location>, LocationError>;
}

// ─── Nominatim provider ─────────────────────────────────────────

#[derive(Deserialize, Debug, Clone)]
pub struct NominatimResult {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Blocking Nominatim client with a bounded timeout.
#[derive(Debug)]
pub struct NominatimGeocoder {
    agent: ureq::Agent,
    endpoint: String,
    user_agent: String,
}

impl NominatimGeocoder {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            endpoint: format!("{}/search", base_url.trim_end_matches('/')),
            user_agent: user_agent.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for NominatimGeocoder {
    fn default() -> Self {
        Self::new(NOMINATIM_BASE_URL, DEFAULT_USER_AGENT, Duration::from_secs(10))
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, query: &str) -> Result<Option<Location>, LocationError> {
        debug!(endpoint = %self.endpoint, query, "geocoding");

        let response = self
            .agent
            .get(&self.endpoint)
            .set("User-Agent", &self.user_agent)
            .query("q", query)
            .query("format", "json")
            .query("limit", "1")
            .query("addressdetails", "0")
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => LocationError::Status(code),
                ureq::Error::Transport(t) => LocationError::Network(t.to_string()),
            })?;

        let results: Vec<NominatimResult> = response
            .into_json()
            .map_err(|e| LocationError::Malformed(e.to_string()))?;

        first_location(&results, query)
    }
}

/// Build a [`Location`] from the best (first) candidate.
///
/// Coordinates arrive as strings; a missing display name falls back to the query.
pub fn first_location(
    results: &[NominatimResult],
    query: &str,
) -> Result<Option<Location>, LocationError> {
    let Some(item) = results.first() else {
        return Ok(None);
    };

    let latitude = parse_coord(&item.lat, "lat")?;
    let longitude = parse_coord(&item.lon, "lon")?;
    let display_name = item
        .display_name
        .clone()
        .unwrap_or_else(|| query.to_string());

    Ok(Some(Location::new(latitude, longitude, display_name)))
}

fn parse_coord(raw: &str, field: &str) -> Result<f64, LocationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LocationError::Malformed(format!("{} is not a number: '{}'", field, raw)))
}
