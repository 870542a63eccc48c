//! Atlas Forecast: free-text location to a multi-day weather forecast.
//!
//! Nominatim resolves the place, Open-Meteo supplies the forecast, and the
//! daily series is normalized into one row per day with a readable
//! condition label.

pub mod cache;
pub mod config;
pub mod forecast;
pub mod location;
pub mod logging;
pub mod render;
pub mod server;
pub mod service;

pub use config::AppConfig;
pub use forecast::{DailyRecord, ForecastDays, ForecastTable};
pub use location::{Location, LocationResolver};
pub use service::{ForecastReport, ForecastService, LookupError};
