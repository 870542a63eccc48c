//! Location resolver: memo cache in front of a geocoder.
//!
//! Flow:  Cache → Geocoder → Found / NotFound / ServiceUnavailable
//!
//! `Found` and `NotFound` are memoized under the exact query string.
//! `ServiceUnavailable` is not, so the next submission tries the network again.

use super::providers::{Geocoder, NominatimGeocoder};
use super::types::{Location, Resolution};
use crate::cache::QueryCache;
use tracing::{debug, warn};

/// The location resolver. Owns its memo cache.
#[derive(Debug)]
pub struct LocationResolver<G = NominatimGeocoder> {
    geocoder: G,
    cache: QueryCache<String, Option<Location>>,
}

impl LocationResolver<NominatimGeocoder> {
    pub fn new() -> Self {
        Self::with_geocoder(NominatimGeocoder::default())
    }
}

impl Default for LocationResolver<NominatimGeocoder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Geocoder> LocationResolver<G> {
    pub fn with_geocoder(geocoder: G) -> Self {
        Self {
            geocoder,
            cache: QueryCache::new(),
        }
    }

    /// Resolve a query to a location, or `None` for any kind of failure.
    ///
    /// The caller is expected to have rejected empty input already.
    pub fn resolve(&self, query: &str) -> Option<Location> {
        self.resolve_detailed(query).found()
    }

    /// Resolve a query, keeping the reason for a miss.
    ///
    /// The cache lock is released before the geocoder is called, so a slow
    /// upstream never blocks lookups that are already memoized.
    pub fn resolve_detailed(&self, query: &str) -> Resolution {
        if let Some(cached) = self.cache.get(query) {
            let (hits, misses) = self.cache.stats();
            debug!(query, hits, misses, "location cache hit");
            return match cached {
                Some(loc) => Resolution::Found(loc),
                None => Resolution::NotFound,
            };
        }

        let resolution = match self.geocoder.geocode(query) {
            Ok(Some(loc)) => {
                debug!(query, name = %loc.display_name, lat = loc.latitude, lon = loc.longitude, "resolved");
                self.cache.put(query.to_string(), Some(loc.clone()));
                Resolution::Found(loc)
            }
            Ok(None) => {
                debug!(query, "geocoder returned no candidates");
                self.cache.put(query.to_string(), None);
                Resolution::NotFound
            }
            Err(e) => {
                warn!(query, error = %e, "geocoding failed");
                Resolution::ServiceUnavailable
            }
        };

        let (hits, misses) = self.cache.stats();
        debug!(hits, misses, cached = self.cache.len(), "location cache");
        resolution
    }

    pub fn cached_queries(&self) -> usize {
        self.cache.len()
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }
}
