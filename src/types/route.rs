//! Route types exchanged with the external routing engine.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// A requested path between the user and a selected facility.
///
/// Ephemeral: recreated on every new facility selection and discarded
/// when the selection is cleared. A route exists if and only if both a
/// user coordinate and a selection are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    pub start: Coordinate,
    pub end: Coordinate,
}

/// A computed path returned by the routing engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePath {
    /// Polyline from start to end.
    pub waypoints: Vec<Coordinate>,
    pub distance_km: f64,
}
