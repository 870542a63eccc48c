//! Core types for the location subsystem.

use serde::{Deserialize, Serialize};

/// A geocoded point. Produced once per query and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// Canonical name from the geocoder (e.g. "Karachi, Sindh, Pakistan")
    pub display_name: String,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64, display_name: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            display_name: display_name.into(),
        }
    }

    pub fn display_line(&self) -> String {
        format!(
            "Location: {} \u{2014} lat: {:.4}, lon: {:.4}",
            self.display_name, self.latitude, self.longitude
        )
    }
}

/// Outcome of one resolution attempt.
///
/// `NotFound` and `ServiceUnavailable` are kept apart for diagnostics only;
/// [`Resolution::found`] collapses both to `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(Location),
    NotFound,
    ServiceUnavailable,
}

impl Resolution {
    pub fn found(self) -> Option<Location> {
        match self {
            Self::Found(loc) => Some(loc),
            Self::NotFound | Self::ServiceUnavailable => None,
        }
    }
}

/// Why a geocoding call produced no usable result.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Geocoder returned HTTP {0}")]
    Status(u16),
    #[error("Invalid geocoder response: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_collapses() {
        let loc = Location::new(24.86, 67.0, "Karachi");
        assert_eq!(Resolution::Found(loc.clone()).found(), Some(loc));
        assert_eq!(Resolution::NotFound.found(), None);
        assert_eq!(Resolution::ServiceUnavailable.found(), None);
    }

    #[test]
    fn test_display_line() {
        let loc = Location::new(35.6762, 139.6503, "Tokyo, Japan");
        assert_eq!(
            loc.display_line(),
            "Location: Tokyo, Japan \u{2014} lat: 35.6762, lon: 139.6503"
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(LocationError::Status(503).to_string(), "Geocoder returned HTTP 503");
        assert!(LocationError::Malformed("bad lat".into()).to_string().contains("bad lat"));
    }
}
