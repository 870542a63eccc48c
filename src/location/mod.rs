//! Location subsystem: free-text query to a geocoded point.
//!
//! Provides the Nominatim geocoder and a resolver that memoizes by exact query.

pub mod providers;
pub mod resolver;
pub mod types;

pub use providers::{Geocoder, NominatimGeocoder};
pub use resolver::LocationResolver;
pub use types::{Location, LocationError, Resolution};
