//! Distance ranking of facilities around a user coordinate.
//!
//! The ranked list is recomputed wholesale whenever the user
//! coordinate or the facility list changes. For the facility counts
//! this view handles (tens to low hundreds) a full re-sort is cheaper
//! to reason about than incremental maintenance.

use log::debug;
use ordered_float::OrderedFloat;

use crate::coordinate::Coordinate;
use crate::facility::Facility;
use crate::haversine;

/// Ranks facilities ascending by great-circle distance from `user`.
///
/// The sort is stable: facilities at identical distances keep their
/// relative input order. Facilities without a usable coordinate cannot
/// be ranked; they keep `distance_km = None` and sort after every
/// ranked entry, preserving relative order. The result is always a
/// permutation of the input.
///
/// With no user coordinate the input is returned unmodified — "not yet
/// rankable" is distinct from "zero distance".
pub fn rank(user: Option<&Coordinate>, facilities: Vec<Facility>) -> Vec<Facility> {
    let Some(user) = user else {
        return facilities;
    };

    let mut ranked: Vec<Facility> = facilities
        .into_iter()
        .map(|mut facility| {
            facility.distance_km = facility
                .coordinate()
                .map(|position| haversine::distance(user, &position));
            facility
        })
        .collect();

    ranked.sort_by_key(|facility| {
        facility
            .distance_km
            .map(OrderedFloat)
            .unwrap_or(OrderedFloat(f64::INFINITY))
    });

    debug!("ranked {} facilities by distance", ranked.len());
    ranked
}

/// Formats a distance for display: under one kilometer in whole
/// meters, otherwise in kilometers to one decimal place.
///
/// Ties round half away from zero, so 1.25 km renders as "1.3km".
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{}m", (km * 1000.0).round() as i64)
    } else {
        format!("{:.1}km", (km * 10.0).round() / 10.0)
    }
}
