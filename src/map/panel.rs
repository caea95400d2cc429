//! Render model for the facility detail side panel.
//!
//! The panel shows the selected facility's attributes and a single
//! primary action that navigates to the full detail view. Navigation
//! itself belongs to the app-level routing layer; this module only
//! emits the intent.

use crate::facility::{Facility, FacilityKind};
use crate::ranking::format_distance;

/// Intent to open the full detail view of a facility, consumed by the
/// navigation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailNavigation {
    pub facility_id: u64,
}

/// Everything the side panel renders for a selected facility.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub facility_id: u64,
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub website: Option<String>,
    pub kind: FacilityKind,
    pub specialties: Vec<String>,
    pub icu_count: Option<u32>,
    pub rating: Option<f64>,
    pub is_open: bool,
    /// Formatted distance from the user, when ranked.
    pub distance_label: Option<String>,
}

impl PanelView {
    pub fn from_facility(facility: &Facility) -> PanelView {
        PanelView {
            facility_id: facility.id,
            name: facility.name.clone(),
            address: facility.address.clone(),
            phone_number: facility.phone_number.clone(),
            website: facility.website.clone(),
            kind: facility.kind,
            specialties: facility.specialties.clone(),
            icu_count: facility.icu_count,
            rating: facility.rating,
            is_open: facility.is_open,
            distance_label: facility.distance_km.map(format_distance),
        }
    }

    /// The panel's primary action.
    pub fn detail_navigation(&self) -> DetailNavigation {
        DetailNavigation {
            facility_id: self.facility_id,
        }
    }
}
