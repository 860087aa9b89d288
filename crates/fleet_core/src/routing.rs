//! Pluggable path providers: the routing boundary of the engine.
//!
//! Two implementations, selectable via [`PathProviderKind`]:
//!
//! - **`StraightLineProvider`**: always the two-point straight line. Zero
//!   dependencies, the offline default.
//! - **`OsrmPathProvider`** (feature `osrm`): calls a local/remote OSRM HTTP
//!   endpoint and decodes its encoded-polyline geometry.
//!
//! Providers never fail: any error degrades to the two-point straight line,
//! tagged [`PathSource::StraightLine`] so callers and tests can tell which
//! path was taken. Downstream code may rely on a non-empty result with at
//! least two points.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// How a [`ResolvedPath`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathSource {
    /// Road geometry from the routing service.
    Routed,
    /// Two-point fallback, used when the service failed or is not configured.
    StraightLine,
}

/// An ordered coordinate sequence approximating travel between two points.
/// Always holds at least two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPath {
    pub points: Vec<GeoPoint>,
    pub source: PathSource,
}

impl ResolvedPath {
    /// The two-point straight line between `start` and `end`.
    pub fn straight_line(start: GeoPoint, end: GeoPoint) -> Self {
        Self {
            points: vec![start, end],
            source: PathSource::StraightLine,
        }
    }
}

/// Which routing backend to use. Serializable so it can live in scenario
/// parameter sets.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub enum PathProviderKind {
    /// Two-point straight lines, no external calls.
    #[default]
    StraightLine,
    /// OSRM HTTP endpoint (e.g. `"https://router.project-osrm.org"`).
    #[cfg(feature = "osrm")]
    Osrm { endpoint: String },
}

/// Trait for routing backends. Implementations must be `Send + Sync`: the
/// provider is shared between the scenario and the geometry population
/// threads.
pub trait PathProvider: Send + Sync {
    /// Resolve a travel path from `start` to `end`. Must not fail; on any
    /// failure the implementation returns the two-point straight line.
    fn fetch_path(&self, start: GeoPoint, end: GeoPoint) -> ResolvedPath;
}

/// ECS resource wrapping a shared path provider.
#[derive(Resource, Clone)]
pub struct PathProviderResource(pub Arc<dyn PathProvider>);

/// Always returns the straight line between the endpoints.
pub struct StraightLineProvider;

impl PathProvider for StraightLineProvider {
    fn fetch_path(&self, start: GeoPoint, end: GeoPoint) -> ResolvedPath {
        ResolvedPath::straight_line(start, end)
    }
}

// ---------------------------------------------------------------------------
// OSRM provider (behind `osrm` feature)
// ---------------------------------------------------------------------------

#[cfg(feature = "osrm")]
pub mod osrm {
    use super::*;
    use crate::polyline;
    use reqwest::blocking::Client;
    use std::time::Duration;

    const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

    /// Routes via an OSRM HTTP endpoint, `geometries=polyline`.
    pub struct OsrmPathProvider {
        client: Client,
        endpoint: String,
    }

    impl OsrmPathProvider {
        pub fn new(endpoint: &str) -> Self {
            let client = Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("failed to build HTTP client");
            Self {
                client,
                endpoint: endpoint.trim_end_matches('/').to_string(),
            }
        }
    }

    /// Minimal OSRM JSON response structures.
    #[derive(Deserialize)]
    pub(super) struct OsrmResponse {
        pub routes: Option<Vec<OsrmRoute>>,
    }

    #[derive(Deserialize)]
    pub(super) struct OsrmRoute {
        /// Encoded polyline.
        pub geometry: String,
    }

    /// Extract a decoded path from an OSRM response, or `None` when the
    /// response has no usable route.
    pub(super) fn parse_route_response(resp: OsrmResponse) -> Option<Vec<GeoPoint>> {
        let route = resp.routes?.into_iter().next()?;
        let points = polyline::decode(&route.geometry, polyline::DEFAULT_PRECISION);
        if points.len() < 2 {
            return None;
        }
        Some(points)
    }

    impl PathProvider for OsrmPathProvider {
        fn fetch_path(&self, start: GeoPoint, end: GeoPoint) -> ResolvedPath {
            let url = format!(
                "{}/route/v1/driving/{},{};{},{}?overview=full&geometries=polyline",
                self.endpoint, start.lng, start.lat, end.lng, end.lat,
            );

            let resp: OsrmResponse = match self.client.get(&url).send().and_then(|r| r.json()) {
                Ok(parsed) => parsed,
                Err(err) => {
                    log::warn!("routing failed, falling back to straight line: {err}");
                    return ResolvedPath::straight_line(start, end);
                }
            };

            match parse_route_response(resp) {
                Some(points) => ResolvedPath {
                    points,
                    source: PathSource::Routed,
                },
                None => {
                    log::warn!("routing returned no usable route, falling back to straight line");
                    ResolvedPath::straight_line(start, end)
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Caching wrapper
// ---------------------------------------------------------------------------

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;

/// Endpoints quantized to microdegrees, so float keys hash exactly.
type PathKey = ((i64, i64), (i64, i64));

fn path_key(start: GeoPoint, end: GeoPoint) -> PathKey {
    let q = |v: f64| (v * 1e6).round() as i64;
    ((q(start.lat), q(start.lng)), (q(end.lat), q(end.lng)))
}

/// LRU-cached wrapper around any [`PathProvider`].
///
/// The key is the directional endpoint pair. Straight-line fallbacks are
/// cached too: repopulating after a transient outage goes through
/// [`crate::geometry::RouteGeometryCache`], not this layer.
pub struct CachedPathProvider {
    inner: Box<dyn PathProvider>,
    cache: Mutex<LruCache<PathKey, ResolvedPath>>,
}

impl CachedPathProvider {
    pub fn new(inner: Box<dyn PathProvider>, capacity: usize) -> Self {
        Self {
            inner,
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity.max(1)).expect("cache capacity must be > 0"),
            )),
        }
    }
}

impl PathProvider for CachedPathProvider {
    fn fetch_path(&self, start: GeoPoint, end: GeoPoint) -> ResolvedPath {
        let key = path_key(start, end);

        if let Ok(mut cache) = self.cache.lock() {
            if let Some(cached) = cache.get(&key) {
                return cached.clone();
            }
        }

        let result = self.inner.fetch_path(start, end);

        if let Ok(mut cache) = self.cache.lock() {
            cache.put(key, result.clone());
        }

        result
    }
}

/// Default path cache capacity.
const DEFAULT_PATH_CACHE_CAPACITY: usize = 4_096;

/// Construct a shared [`PathProvider`] from a [`PathProviderKind`] descriptor.
///
/// - `StraightLine` is returned without caching (it allocates two points).
/// - `Osrm` is wrapped in a [`CachedPathProvider`] so repeated segment
///   queries hit the network once.
pub fn build_path_provider(kind: &PathProviderKind) -> Arc<dyn PathProvider> {
    match kind {
        PathProviderKind::StraightLine => Arc::new(StraightLineProvider),

        #[cfg(feature = "osrm")]
        PathProviderKind::Osrm { endpoint } => {
            let inner = Box::new(osrm::OsrmPathProvider::new(endpoint));
            Arc::new(CachedPathProvider::new(inner, DEFAULT_PATH_CACHE_CAPACITY))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::ScriptedPathProvider;

    #[test]
    fn straight_line_provider_returns_two_endpoints() {
        let start = GeoPoint::new(-1.28, 36.81);
        let end = GeoPoint::new(-1.29, 36.82);
        let path = StraightLineProvider.fetch_path(start, end);
        assert_eq!(path.points, vec![start, end]);
        assert_eq!(path.source, PathSource::StraightLine);
    }

    #[test]
    fn cached_provider_queries_inner_once_per_endpoint_pair() {
        let scripted = ScriptedPathProvider::with_midpoint();
        let calls = scripted.call_count_handle();
        let provider = CachedPathProvider::new(Box::new(scripted), 16);

        let start = GeoPoint::new(0.0, 0.0);
        let end = GeoPoint::new(0.0, 10.0);
        let first = provider.fetch_path(start, end);
        let second = provider.fetch_path(start, end);

        assert_eq!(first, second);
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);

        provider.fetch_path(end, start);
        assert_eq!(
            calls.load(std::sync::atomic::Ordering::SeqCst),
            2,
            "direction is part of the key"
        );
    }

    #[cfg(feature = "osrm")]
    mod osrm_parsing {
        use super::super::osrm::{parse_route_response, OsrmResponse};

        #[test]
        fn parses_polyline_geometry() {
            let resp: OsrmResponse = serde_json::from_str(
                r#"{"code":"Ok","routes":[{"geometry":"_p~iF~ps|U_ulLnnqC"}]}"#,
            )
            .expect("fixture parses");
            let points = parse_route_response(resp).expect("route");
            assert_eq!(points.len(), 2);
            assert!((points[0].lat - 38.5).abs() < 1e-5);
        }

        #[test]
        fn empty_routes_yield_none() {
            let resp: OsrmResponse =
                serde_json::from_str(r#"{"code":"Ok","routes":[]}"#).expect("fixture parses");
            assert!(parse_route_response(resp).is_none());
        }

        #[test]
        fn missing_routes_yield_none() {
            let resp: OsrmResponse =
                serde_json::from_str(r#"{"code":"NoRoute"}"#).expect("fixture parses");
            assert!(parse_route_response(resp).is_none());
        }
    }
}
