//! Geospatial Facility Discovery Library.
//! Handles location acquisition, distance ranking and map presentation
//! tasks for a facility (hospital/clinic) discovery view.

pub mod types {
    pub mod coordinate;
    pub mod facility;
    pub mod route;
    pub mod selection;
}

pub mod utils {
    pub mod generator;
    pub mod haversine;
}

pub mod algorithms {
    pub mod ranking;
}

pub mod services {
    pub mod location;
    pub mod routing;
}

pub mod map {
    pub mod panel;
    pub mod renderer;
    pub mod view;
}

pub use algorithms::ranking;
pub use map::{panel, renderer, view};
pub use services::{location, routing};
pub use types::{coordinate, facility, route, selection};
pub use utils::{generator, haversine};
