//! Fixed route reference data: named stops and the routes connecting them.
//!
//! Routes are read-only at runtime. A route's segments are the consecutive
//! stop pairs `(stops[i], stops[i+1])`, so `segment_count == stops.len() - 1`.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// A named stop along a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub lat: f64,
    pub lng: f64,
    pub label: String,
}

impl Stop {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// One fixed route: an ordered sequence of stops plus display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub name: String,
    /// Hex color used by map rendering.
    pub color: String,
    pub stops: Vec<Stop>,
}

impl Route {
    /// Number of traversable segments (consecutive stop pairs).
    pub fn segment_count(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }

    /// Endpoints of segment `index`, or `None` when out of range.
    pub fn segment_endpoints(&self, index: usize) -> Option<(GeoPoint, GeoPoint)> {
        let start = self.stops.get(index)?;
        let end = self.stops.get(index + 1)?;
        Some((start.point(), end.point()))
    }
}

/// Read-only table of all known routes. Consulted by the tick loop and by
/// render-time composition; never mutated after scenario construction.
#[derive(Debug, Clone, Default, Resource)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn get(&self, route_id: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.id == route_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
