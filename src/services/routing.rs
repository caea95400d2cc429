//! Client seam for the third-party routing engine.
//!
//! The engine receives a start/end pair and answers with a polyline.
//! A failure here is never fatal to the view: the map stays usable and
//! the overlay simply does not appear.

use async_trait::async_trait;
use thiserror::Error;

use crate::route::{Route, RoutePath};

/// Why the routing engine could not produce a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("routing engine request failed: {0}")]
    Request(String),
    #[error("no route found between the requested points")]
    NoRoute,
}

/// Computes a path between two coordinates.
#[async_trait]
pub trait RoutingEngine {
    async fn compute(&self, route: &Route) -> Result<RoutePath, RoutingError>;
}
