//! Forecast subsystem: raw Open-Meteo payloads, the weather-code table and
//! the daily-series normalizer.

pub mod codes;
pub mod fetcher;
pub mod normalize;
pub mod types;

pub use codes::{describe, UNKNOWN_LABEL, WEATHER_CODES};
pub use fetcher::{ForecastFetcher, OpenMeteoClient, WeatherSource};
pub use normalize::normalize_daily;
pub use types::{
    CurrentConditions, DailyRecord, ForecastDate, ForecastDays, ForecastError, ForecastPayload, ForecastTable,
};
