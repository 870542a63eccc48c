//! Submission pipeline: query → location → raw forecast → report.
//!
//! Each stage either yields a value or stops the submission with a
//! [`LookupError`] whose `user_message` is the notice shown to the user.
//! The service stays usable after any failure.

use crate::config::AppConfig;
use crate::forecast::{
    normalize_daily, CurrentConditions, ForecastDays, ForecastFetcher, ForecastTable,
    OpenMeteoClient, WeatherSource,
};
use crate::location::{Geocoder, Location, LocationResolver, NominatimGeocoder};
use serde::Serialize;
use tracing::info;

/// Everything one submission produces.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub location: Location,
    pub days_requested: ForecastDays,
    pub timezone: Option<String>,
    pub current: Option<CurrentConditions>,
    /// Empty when the payload had no usable daily series.
    pub daily: ForecastTable,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("empty location query")]
    EmptyQuery,
    #[error("location not found: '{0}'")]
    LocationNotFound(String),
    #[error("forecast unavailable for '{0}'")]
    ForecastUnavailable(String),
}

impl LookupError {
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyQuery => "Please enter a city or location.".to_string(),
            Self::LocationNotFound(_) => {
                "Location not found. Try a different query (e.g., 'Lahore', 'Lahore, PK', 'Pakistan')."
                    .to_string()
            }
            Self::ForecastUnavailable(_) => {
                "Failed to fetch weather data from Open-Meteo. Try again later.".to_string()
            }
        }
    }
}

/// Resolver and fetcher wired in sequence.
#[derive(Debug)]
pub struct ForecastService<G = NominatimGeocoder, S = OpenMeteoClient> {
    resolver: LocationResolver<G>,
    fetcher: ForecastFetcher<S>,
}

impl ForecastService {
    pub fn new() -> Self {
        Self::with_parts(LocationResolver::new(), ForecastFetcher::new())
    }

    /// Real Nominatim and Open-Meteo clients with the configured endpoints.
    pub fn from_config(config: &AppConfig) -> Self {
        let geocoder = NominatimGeocoder::new(
            &config.geocoder.base_url,
            &config.geocoder.user_agent,
            config.geocoder_timeout(),
        );
        let weather = OpenMeteoClient::new(&config.weather.base_url, config.weather_timeout());
        Self::with_parts(
            LocationResolver::with_geocoder(geocoder),
            ForecastFetcher::with_source(weather),
        )
    }
}

impl Default for ForecastService {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Geocoder, S: WeatherSource> ForecastService<G, S> {
    pub fn with_parts(resolver: LocationResolver<G>, fetcher: ForecastFetcher<S>) -> Self {
        Self { resolver, fetcher }
    }

    /// Resolve only. Used by the `/api/resolve` endpoint.
    pub fn locate(&self, query: &str) -> Result<Location, LookupError> {
        let q = query.trim();
        if q.is_empty() {
            return Err(LookupError::EmptyQuery);
        }
        self.resolver
            .resolve(q)
            .ok_or_else(|| LookupError::LocationNotFound(q.to_string()))
    }

    /// Run one full submission. At most two network calls, the second only
    /// after the first succeeded.
    pub fn lookup(&self, query: &str, days: ForecastDays) -> Result<ForecastReport, LookupError> {
        let location = self.locate(query)?;

        let payload = self
            .fetcher
            .fetch(location.latitude, location.longitude, days)
            .ok_or_else(|| LookupError::ForecastUnavailable(location.display_name.clone()))?;

        let daily = normalize_daily(payload.daily()).unwrap_or_default();
        info!(
            location = %location.display_name,
            days = days.count(),
            rows = daily.len(),
            "forecast ready"
        );

        Ok(ForecastReport {
            timezone: payload.timezone().map(str::to_string),
            current: payload.current(),
            daily,
            location,
            days_requested: days,
        })
    }

    pub fn resolver(&self) -> &LocationResolver<G> {
        &self.resolver
    }

    pub fn fetcher(&self) -> &ForecastFetcher<S> {
        &self.fetcher
    }
}
