//! Orchestration of the geospatial discovery view.
//!
//! Data flows location fix → distance ranker → map renderer; marker
//! selection feeds the detail panel and the route overlay. The view is
//! single-threaded and event-driven: selection events are handled in
//! call order through the `&mut` receiver, and at most one route is
//! active at a time — a newer selection supersedes an older in-flight
//! route request by replacement, not by cancellation.

use log::{debug, info, warn};
use thiserror::Error;

use crate::facility::Facility;
use crate::location::LocationFix;
use crate::map::panel::PanelView;
use crate::map::renderer::{MapRenderer, MapSurface};
use crate::ranking;
use crate::route::{Route, RoutePath};
use crate::routing::{RoutingEngine, RoutingError};
use crate::selection::SelectionPhase;

/// Selection problems the caller can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no facility with id {0} is currently displayed")]
    UnknownFacility(u64),
}

/// A route computation handed to the event loop.
///
/// The generation tag implements last-write-wins: a result is applied
/// only while its generation is still the current one, so a stale
/// response arriving after a newer selection (or after the panel was
/// closed) is discarded on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRequest {
    pub generation: u64,
    pub route: Route,
}

/// The geospatial discovery view: ranked facility list, map markers,
/// detail panel and route overlay behind one façade.
pub struct DiscoveryView<S: MapSurface, R: RoutingEngine> {
    renderer: MapRenderer<S>,
    routing: R,
    fix: LocationFix,
    facilities: Vec<Facility>,
    selected: Option<Facility>,
    phase: SelectionPhase,
    route_generation: u64,
}

impl<S: MapSurface, R: RoutingEngine> DiscoveryView<S, R> {
    /// Builds the view around an acquired location fix: facilities are
    /// ranked by distance and synced onto the map, centered on the
    /// user at the default zoom.
    pub fn new(
        surface: S,
        routing: R,
        fix: LocationFix,
        facilities: Vec<Facility>,
    ) -> DiscoveryView<S, R> {
        let ranked = ranking::rank(Some(&fix.coordinate), facilities);
        let mut renderer = MapRenderer::new(surface, fix.coordinate);
        renderer.sync_markers(&ranked);
        info!("discovery view ready with {} facilities", ranked.len());
        DiscoveryView {
            renderer,
            routing,
            fix,
            facilities: ranked,
            selected: None,
            phase: SelectionPhase::Idle,
            route_generation: 0,
        }
    }

    /// The ranked facility list, ascending by distance.
    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    /// Advisory recorded when the device position fell back to the
    /// city-centre default.
    pub fn advisory(&self) -> Option<&str> {
        self.fix.advisory.as_deref()
    }

    /// Formatted distance to the nearest ranked facility, for the
    /// map-stats card.
    pub fn nearest_distance_label(&self) -> Option<String> {
        self.facilities
            .first()
            .and_then(|f| f.distance_km)
            .map(ranking::format_distance)
    }

    /// The detail panel render model; `None` while nothing is
    /// selected.
    pub fn panel(&self) -> Option<PanelView> {
        self.selected.as_ref().map(PanelView::from_facility)
    }

    /// Replaces the facility list (e.g. after a new search): re-ranks
    /// wholesale and reconciles markers. A selection that no longer
    /// appears in the list is cleared, together with its route.
    pub fn set_facilities(&mut self, facilities: Vec<Facility>) {
        self.facilities = ranking::rank(Some(&self.fix.coordinate), facilities);
        self.renderer.sync_markers(&self.facilities);

        if let Some(selected_id) = self.selected.as_ref().map(|f| f.id) {
            match self.facilities.iter().find(|f| f.id == selected_id) {
                Some(survivor) => self.selected = Some(survivor.clone()),
                None => {
                    debug!("selection {selected_id} dropped by new search");
                    self.close_panel();
                }
            }
        }
    }

    /// Handles a facility marker activation.
    ///
    /// The facility becomes the single selection and a route request
    /// toward it is issued, superseding any in-flight one. Facilities
    /// without a usable coordinate can still be selected (from list
    /// views); they produce no route request.
    pub fn select_facility(
        &mut self,
        facility_id: u64,
    ) -> Result<Option<RouteRequest>, SelectionError> {
        let facility = self
            .facilities
            .iter()
            .find(|f| f.id == facility_id)
            .cloned()
            .ok_or(SelectionError::UnknownFacility(facility_id))?;

        let end = facility.coordinate();
        info!("facility {} selected", facility.id);
        self.selected = Some(facility);
        self.route_generation += 1;

        match end {
            Some(end) => {
                self.phase = SelectionPhase::RouteRequested;
                Ok(Some(RouteRequest {
                    generation: self.route_generation,
                    route: Route {
                        start: self.fix.coordinate,
                        end,
                    },
                }))
            }
            None => {
                self.phase = SelectionPhase::Selected;
                Ok(None)
            }
        }
    }

    /// Applies a completed route computation.
    ///
    /// Results from superseded requests are discarded; only the most
    /// recent request may change what the overlay shows. A failure is
    /// non-fatal: the selection stays, the overlay does not appear.
    pub fn apply_route_result(
        &mut self,
        generation: u64,
        result: Result<RoutePath, RoutingError>,
    ) {
        if generation != self.route_generation || self.selected.is_none() {
            debug!("discarding stale route result (generation {generation})");
            return;
        }
        match result {
            Ok(path) => {
                self.renderer.draw_route(&path);
                self.phase = SelectionPhase::RouteDisplayed;
            }
            Err(err) => {
                warn!("route computation failed: {err}");
                self.renderer.clear_route();
                self.phase = SelectionPhase::Selected;
            }
        }
    }

    /// Drives a route request through the routing engine and applies
    /// the result. Convenience for callers without their own event
    /// loop.
    pub async fn request_route(&mut self, request: RouteRequest) {
        let result = self.routing.compute(&request.route).await;
        self.apply_route_result(request.generation, result);
    }

    /// Closes the detail panel: clears the selection and any displayed
    /// route, and invalidates in-flight route requests.
    pub fn close_panel(&mut self) {
        self.selected = None;
        self.phase = SelectionPhase::Idle;
        self.route_generation += 1;
        self.renderer.clear_route();
    }

    /// The "re-center on me" action.
    pub fn center_on_user(&mut self) {
        self.renderer.center_on_user();
    }

    /// Call when the map container becomes visible after being hidden.
    pub fn container_resized(&mut self) {
        self.renderer.container_resized();
    }

    pub fn renderer(&self) -> &MapRenderer<S> {
        &self.renderer
    }
}
