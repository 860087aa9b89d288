//! Trip planning: free-text place lookup plus a routed path between the two
//! resolved points.
//!
//! Geocoding sits behind [`Geocoder`] so tests and offline runs can script
//! it; the HTTP implementation (Nominatim) is compiled under the `osrm`
//! feature alongside the other network code.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geo::{haversine_m, GeoPoint};
use crate::routing::{PathProvider, ResolvedPath};

/// A resolved place: short display name plus coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl GeocodedPlace {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// Free-text place lookup. `None` means the query resolved to nothing.
pub trait Geocoder: Send + Sync {
    fn geocode(&self, query: &str) -> Option<GeocodedPlace>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripPlanError {
    /// The named query could not be geocoded.
    LocationNotFound(String),
}

impl fmt::Display for TripPlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripPlanError::LocationNotFound(query) => {
                write!(f, "location not found: {query}")
            }
        }
    }
}

impl std::error::Error for TripPlanError {}

/// A planned trip between two geocoded places.
#[derive(Debug, Clone, PartialEq)]
pub struct TripPlan {
    pub origin: GeocodedPlace,
    pub destination: GeocodedPlace,
    pub path: ResolvedPath,
    pub distance_m: f64,
}

/// Resolve both endpoints and fetch a path between them. The path degrades
/// to a straight line like every other provider call; only a failed lookup
/// is an error.
pub fn plan_trip(
    geocoder: &dyn Geocoder,
    provider: &dyn PathProvider,
    origin_query: &str,
    destination_query: &str,
) -> Result<TripPlan, TripPlanError> {
    let origin = geocoder
        .geocode(origin_query)
        .ok_or_else(|| TripPlanError::LocationNotFound(origin_query.to_string()))?;
    let destination = geocoder
        .geocode(destination_query)
        .ok_or_else(|| TripPlanError::LocationNotFound(destination_query.to_string()))?;

    let path = provider.fetch_path(origin.point(), destination.point());
    let distance_m = path
        .points
        .windows(2)
        .map(|pair| haversine_m(pair[0], pair[1]))
        .sum();

    Ok(TripPlan {
        origin,
        destination,
        path,
        distance_m,
    })
}

#[cfg(feature = "osrm")]
pub mod nominatim {
    use super::*;
    use reqwest::blocking::Client;
    use std::time::Duration;

    const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

    /// Geocodes via the Nominatim search API, biased toward Nairobi by
    /// default.
    pub struct NominatimGeocoder {
        client: Client,
        endpoint: String,
        bias_suffix: String,
    }

    impl NominatimGeocoder {
        pub const DEFAULT_ENDPOINT: &'static str = "https://nominatim.openstreetmap.org";

        pub fn new(endpoint: &str) -> Self {
            let client = Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .user_agent("fleet-sim")
                .build()
                .expect("failed to build HTTP client");
            Self {
                client,
                endpoint: endpoint.trim_end_matches('/').to_string(),
                bias_suffix: ", Nairobi, Kenya".to_string(),
            }
        }

        /// Override the region suffix appended to every query.
        pub fn with_bias_suffix(mut self, suffix: &str) -> Self {
            self.bias_suffix = suffix.to_string();
            self
        }
    }

    #[derive(Deserialize)]
    pub(super) struct NominatimEntry {
        pub display_name: String,
        /// Nominatim serializes coordinates as strings.
        pub lat: String,
        pub lon: String,
    }

    /// First result wins; the display name is cut at the first comma.
    pub(super) fn parse_search_response(entries: Vec<NominatimEntry>) -> Option<GeocodedPlace> {
        let entry = entries.into_iter().next()?;
        let lat = entry.lat.parse().ok()?;
        let lng = entry.lon.parse().ok()?;
        let name = entry
            .display_name
            .split(',')
            .next()
            .unwrap_or(&entry.display_name)
            .trim()
            .to_string();
        Some(GeocodedPlace { name, lat, lng })
    }

    impl Geocoder for NominatimGeocoder {
        fn geocode(&self, query: &str) -> Option<GeocodedPlace> {
            let url = format!("{}/search", self.endpoint);
            let biased = format!("{query}{}", self.bias_suffix);
            let entries: Vec<NominatimEntry> = match self
                .client
                .get(&url)
                .query(&[("q", biased.as_str()), ("format", "json"), ("limit", "1")])
                .send()
                .and_then(|r| r.json())
            {
                Ok(parsed) => parsed,
                Err(err) => {
                    log::warn!("geocoding {query:?} failed: {err}");
                    return None;
                }
            };
            parse_search_response(entries)
        }
    }
}
