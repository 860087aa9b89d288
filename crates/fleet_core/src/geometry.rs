//! Route geometry cache: one resolved path per consecutive stop pair.
//!
//! Population is best-effort and may still be in flight while the tick loop
//! runs; readers must treat absence as "not resolved yet" and fall back to
//! straight-line interpolation between the raw stops. A route's segment list
//! is built locally and published in one write, so readers observe either
//! none or all of a route's segments — partial lists are unrepresentable.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::thread::JoinHandle;

use bevy_ecs::prelude::Resource;

use crate::routes::Route;
use crate::routing::{PathProvider, ResolvedPath};

/// Shared, clonable handle to the geometry cache.
///
/// Cloning is cheap (an `Arc` bump); population threads hold a clone while
/// the ECS world holds another as a resource.
#[derive(Clone, Default, Resource)]
pub struct RouteGeometryCache {
    inner: Arc<RwLock<HashMap<String, Arc<Vec<ResolvedPath>>>>>,
}

impl RouteGeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// All segment paths for a route, index-aligned with its segments.
    /// `None` until the route has been published.
    pub fn route_segments(&self, route_id: &str) -> Option<Arc<Vec<ResolvedPath>>> {
        let map = self.inner.read().ok()?;
        map.get(route_id).cloned()
    }

    /// The path for one segment of a route. `None` while population is still
    /// pending or when the index is out of range — callers fall back, they
    /// do not error.
    pub fn segment(&self, route_id: &str, segment_index: usize) -> Option<ResolvedPath> {
        let segments = self.route_segments(route_id)?;
        segments.get(segment_index).cloned()
    }

    pub fn is_populated(&self, route_id: &str) -> bool {
        self.route_segments(route_id).is_some()
    }

    /// Publish a route's full segment list in one atomic step.
    ///
    /// The list length must equal the route's segment count; a shorter list
    /// would break the index alignment readers rely on.
    pub fn publish(&self, route: &Route, segments: Vec<ResolvedPath>) {
        debug_assert_eq!(
            segments.len(),
            route.segment_count(),
            "segment list must be index-aligned with the route"
        );
        if let Ok(mut map) = self.inner.write() {
            map.insert(route.id.clone(), Arc::new(segments));
        }
    }

    /// Drop all published geometry. Test/reset hook; the simulation tolerates
    /// an empty cache at any time.
    pub fn clear(&self) {
        if let Ok(mut map) = self.inner.write() {
            map.clear();
        }
    }

    /// Resolve and publish geometry for every route, in the calling thread.
    ///
    /// Segments are fetched in index order, so the published list is aligned
    /// by construction. Completes once; a second call re-fetches and
    /// republishes.
    pub fn populate_blocking(&self, routes: &[Route], provider: &dyn PathProvider) {
        for route in routes {
            let segments = resolve_route_segments(route, provider);
            self.publish(route, segments);
        }
    }

    /// Resolve geometry on background threads, one per route.
    ///
    /// Routes resolve independently and in no particular order; each becomes
    /// visible only when all of its segments have resolved. The handles are
    /// returned for callers that want to join (tests); dropping them is fine,
    /// a late-resolving route still publishes useful data.
    pub fn spawn_population(
        &self,
        routes: Vec<Route>,
        provider: Arc<dyn PathProvider>,
    ) -> Vec<JoinHandle<()>> {
        routes
            .into_iter()
            .map(|route| {
                let cache = self.clone();
                let provider = Arc::clone(&provider);
                std::thread::spawn(move || {
                    let segments = resolve_route_segments(&route, provider.as_ref());
                    cache.publish(&route, segments);
                })
            })
            .collect()
    }
}

/// Fetch every segment path of `route` in index order.
fn resolve_route_segments(route: &Route, provider: &dyn PathProvider) -> Vec<ResolvedPath> {
    (0..route.segment_count())
        .filter_map(|i| route.segment_endpoints(i))
        .map(|(start, end)| provider.fetch_path(start, end))
        .collect()
}
