//! Struct definitions and implementations for [`Coordinate`].

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// A [`Coordinate`] is an immutable geographic position in decimal
/// degrees, WGS-84 implied.
///
/// The components are wrapped in [`OrderedFloat`] so the type gets a
/// total order, `Eq` and `Hash` — plain floats have none of those —
/// and can appear in `const` items such as the documented fallback
/// point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: OrderedFloat<f64>,
    pub longitude: OrderedFloat<f64>,
}

impl Coordinate {
    /// Creates a coordinate from raw decimal degrees.
    pub fn new(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate {
            latitude: OrderedFloat(latitude),
            longitude: OrderedFloat(longitude),
        }
    }

    /// Creates a coordinate only when both components are finite and
    /// inside the WGS-84 range.
    ///
    /// Facility records arriving from remote payloads may carry missing
    /// or NaN components; those yield [`None`] here and are excluded
    /// from the rendered marker set.
    pub fn from_degrees(latitude: f64, longitude: f64) -> Option<Coordinate> {
        if latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude)
        {
            Some(Coordinate::new(latitude, longitude))
        } else {
            None
        }
    }

    /// Latitude in decimal degrees.
    pub fn lat(&self) -> f64 {
        self.latitude.into_inner()
    }

    /// Longitude in decimal degrees.
    pub fn lon(&self) -> f64 {
        self.longitude.into_inner()
    }
}
