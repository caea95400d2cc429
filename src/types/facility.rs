//! Struct definitions and implementations for [`Facility`].
//!
//! A facility is a read projection of a hospital or clinic record
//! served by the remote data source. The client never deletes or
//! mutates it, except for the derived distance field appended by the
//! distance ranker.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// Ownership category of a facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FacilityKind {
    #[default]
    #[serde(alias = "Public")]
    Public,
    #[serde(alias = "Private")]
    Private,
}

fn missing_coordinate() -> f64 {
    f64::NAN
}

/// A hospital or clinic record with a geographic coordinate.
///
/// Field renames follow the remote payload shape (`type`, `icus`,
/// `isOpen`, `costRange`). Latitude and longitude are kept as raw
/// floats because the data source occasionally ships records without
/// them; use [`Facility::coordinate`] to obtain a validated position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    /// Unique within a given facility list.
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: FacilityKind,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(rename = "costRange", default)]
    pub cost_range: Option<String>,
    #[serde(rename = "icus", default)]
    pub icu_count: Option<u32>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(rename = "isOpen", default)]
    pub is_open: bool,
    #[serde(default = "missing_coordinate")]
    pub latitude: f64,
    #[serde(default = "missing_coordinate")]
    pub longitude: f64,

    /// Kilometers from the user, appended by the distance ranker.
    /// Never part of the remote payload.
    #[serde(skip)]
    pub distance_km: Option<f64>,
}

impl Facility {
    /// Creates a facility with the given identity and position and
    /// neutral defaults for everything else.
    pub fn new(id: u64, name: impl Into<String>, latitude: f64, longitude: f64) -> Facility {
        Facility {
            id,
            name: name.into(),
            address: String::new(),
            phone_number: String::new(),
            website: None,
            kind: FacilityKind::default(),
            specialties: Vec::new(),
            cost_range: None,
            icu_count: None,
            rating: None,
            is_open: true,
            latitude,
            longitude,
            distance_km: None,
        }
    }

    /// The validated position of this facility, or [`None`] when the
    /// record carries missing, NaN or out-of-range components.
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::from_degrees(self.latitude, self.longitude)
    }
}
