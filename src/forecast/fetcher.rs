//! Forecast fetcher: Open-Meteo client plus a memo cache keyed by
//! (latitude, longitude, days).

use super::normalize::DAILY_FIELDS;
use super::types::{ForecastDays, ForecastError, ForecastPayload};
use crate::cache::QueryCache;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

pub const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com";

/// Anything that can produce a raw forecast payload for a point.
pub trait WeatherSource {
    fn forecast(&self, lat: f64, lon: f64, days: ForecastDays)
        -> Result<ForecastPayload, ForecastError>;
}

// ─── Open-Meteo provider ────────────────────────────────────────

#[derive(Debug)]
pub struct OpenMeteoClient {
    agent: ureq::Agent,
    endpoint: String,
}

impl OpenMeteoClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            endpoint: format!("{}/v1/forecast", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new(OPEN_METEO_BASE_URL, Duration::from_secs(10))
    }
}

impl WeatherSource for OpenMeteoClient {
    fn forecast(
        &self,
        lat: f64,
        lon: f64,
        days: ForecastDays,
    ) -> Result<ForecastPayload, ForecastError> {
        debug!(endpoint = %self.endpoint, lat, lon, days = days.count(), "fetching forecast");

        let response = self
            .agent
            .get(&self.endpoint)
            .query("latitude", &lat.to_string())
            .query("longitude", &lon.to_string())
            .query("current_weather", "true")
            .query("daily", &DAILY_FIELDS.join(","))
            .query("timezone", "auto")
            .query("forecast_days", &days.count().to_string())
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => ForecastError::Status(code),
                ureq::Error::Transport(t) => ForecastError::Network(t.to_string()),
            })?;

        let body: Value = response
            .into_json()
            .map_err(|e| ForecastError::Malformed(e.to_string()))?;

        ForecastPayload::from_value(body)
            .ok_or_else(|| ForecastError::Malformed("expected a JSON object".into()))
    }
}

// ─── Fetcher ────────────────────────────────────────────────────

/// Cache key. Coordinates are compared bit-for-bit, no rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ForecastKey {
    lat_bits: u64,
    lon_bits: u64,
    days: ForecastDays,
}

impl ForecastKey {
    pub fn new(lat: f64, lon: f64, days: ForecastDays) -> Self {
        Self {
            lat_bits: lat.to_bits(),
            lon_bits: lon.to_bits(),
            days,
        }
    }
}

/// Fetches raw payloads, memoizing successes. Owns its cache.
#[derive(Debug)]
pub struct ForecastFetcher<S = OpenMeteoClient> {
    source: S,
    cache: QueryCache<ForecastKey, ForecastPayload>,
}

impl ForecastFetcher<OpenMeteoClient> {
    pub fn new() -> Self {
        Self::with_source(OpenMeteoClient::default())
    }
}

impl Default for ForecastFetcher<OpenMeteoClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: WeatherSource> ForecastFetcher<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            cache: QueryCache::new(),
        }
    }

    /// Fetch the payload for a point, or `None` on any failure. No retry.
    ///
    /// The cache is not locked while the source is being called.
    pub fn fetch(&self, lat: f64, lon: f64, days: ForecastDays) -> Option<ForecastPayload> {
        let key = ForecastKey::new(lat, lon, days);
        if let Some(hit) = self.cache.get(&key) {
            let (hits, misses) = self.cache.stats();
            debug!(lat, lon, days = days.count(), hits, misses, "forecast cache hit");
            return Some(hit);
        }

        let payload = match self.source.forecast(lat, lon, days) {
            Ok(payload) => {
                self.cache.put(key, payload.clone());
                Some(payload)
            }
            Err(e) => {
                warn!(lat, lon, days = days.count(), error = %e, "forecast fetch failed");
                None
            }
        };

        let (hits, misses) = self.cache.stats();
        debug!(hits, misses, cached = self.cache.len(), "forecast cache");
        payload
    }

    pub fn cached_forecasts(&self) -> usize {
        self.cache.len()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
