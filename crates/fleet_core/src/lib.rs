pub mod catalog;
pub mod clock;
pub mod ecs;
pub mod eta;
pub mod geo;
pub mod geometry;
pub mod markers;
pub mod planner;
pub mod polyline;
pub mod routes;
pub mod routing;
pub mod runner;
pub mod sampler;
pub mod scenario;
pub mod systems;
pub mod telemetry;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
