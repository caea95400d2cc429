//! Map widget ownership and marker presentation.
//!
//! The actual basemap widget is a third-party collaborator. It is
//! wrapped behind the [`MapSurface`] trait and owned exclusively by
//! [`MapRenderer`]; the panel and route overlay never reach into the
//! widget directly. Every layer the renderer adds is removed again on
//! teardown, including the drop path.

use std::collections::{HashMap, HashSet};

use log::{debug, info};

use crate::coordinate::Coordinate;
use crate::facility::Facility;
use crate::route::RoutePath;

/// Initial and re-center zoom level of the basemap view.
pub const DEFAULT_ZOOM: u8 = 13;

/// Opaque handle to a layer the surface has drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub u64);

/// What a marker represents, so the surface can style the user point
/// distinctly from facility points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerKind {
    User,
    Facility { facility_id: u64 },
}

/// A marker to place on the basemap.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coordinate,
    pub kind: MarkerKind,
    pub tooltip: Option<String>,
}

/// The third-party map widget seam.
///
/// Implementations draw layers and report back opaque handles; the
/// renderer tracks which handle belongs to which facility.
pub trait MapSurface {
    fn set_view(&mut self, center: Coordinate, zoom: u8);
    /// Animated re-center, used by the "center on me" action.
    fn fly_to(&mut self, center: Coordinate, zoom: u8);
    /// Recomputes the widget's internal layout. Required after the
    /// container was hidden and shown again; hidden containers do not
    /// auto-recompute.
    fn invalidate_size(&mut self);
    fn add_marker(&mut self, marker: Marker) -> LayerId;
    fn move_marker(&mut self, layer: LayerId, position: Coordinate);
    fn remove_layer(&mut self, layer: LayerId);
    fn draw_path(&mut self, waypoints: &[Coordinate]) -> LayerId;
}

/// Draws the user marker, one marker per facility and at most one
/// route polyline on an owned [`MapSurface`].
pub struct MapRenderer<S: MapSurface> {
    surface: S,
    user_position: Coordinate,
    user_layer: Option<LayerId>,
    facility_layers: HashMap<u64, LayerId>,
    route_layer: Option<LayerId>,
}

impl<S: MapSurface> MapRenderer<S> {
    /// Creates a renderer centered on the user at [`DEFAULT_ZOOM`]
    /// with the user marker placed.
    pub fn new(mut surface: S, user_position: Coordinate) -> MapRenderer<S> {
        surface.set_view(user_position, DEFAULT_ZOOM);
        let user_layer = surface.add_marker(Marker {
            position: user_position,
            kind: MarkerKind::User,
            tooltip: Some("Your Location".to_string()),
        });
        MapRenderer {
            surface,
            user_position,
            user_layer: Some(user_layer),
            facility_layers: HashMap::new(),
            route_layer: None,
        }
    }

    /// Reconciles facility markers against a new list.
    ///
    /// Existing markers are moved, new ones added and stale ones
    /// removed, so the widget keeps its pan/zoom state across
    /// searches. Facilities without a usable coordinate are excluded
    /// from the marker set; they remain in listings elsewhere.
    pub fn sync_markers(&mut self, facilities: &[Facility]) {
        let incoming: HashSet<u64> = facilities
            .iter()
            .filter(|f| f.coordinate().is_some())
            .map(|f| f.id)
            .collect();

        let stale: Vec<u64> = self
            .facility_layers
            .keys()
            .filter(|id| !incoming.contains(id))
            .copied()
            .collect();
        for id in stale {
            if let Some(layer) = self.facility_layers.remove(&id) {
                self.surface.remove_layer(layer);
            }
        }

        for facility in facilities {
            let Some(position) = facility.coordinate() else {
                debug!(
                    "facility {} has no usable coordinate; skipping marker",
                    facility.id
                );
                continue;
            };
            match self.facility_layers.get(&facility.id) {
                Some(&layer) => self.surface.move_marker(layer, position),
                None => {
                    let layer = self.surface.add_marker(Marker {
                        position,
                        kind: MarkerKind::Facility {
                            facility_id: facility.id,
                        },
                        tooltip: Some(marker_tooltip(facility)),
                    });
                    self.facility_layers.insert(facility.id, layer);
                }
            }
        }
        info!("map shows {} facility markers", self.facility_layers.len());
    }

    /// Draws a route polyline, replacing any previously drawn one.
    pub fn draw_route(&mut self, path: &RoutePath) {
        self.clear_route();
        self.route_layer = Some(self.surface.draw_path(&path.waypoints));
    }

    /// Removes the route polyline if one is drawn.
    pub fn clear_route(&mut self) {
        if let Some(layer) = self.route_layer.take() {
            self.surface.remove_layer(layer);
        }
    }

    /// Animated re-center on the user coordinate.
    pub fn center_on_user(&mut self) {
        self.surface.fly_to(self.user_position, DEFAULT_ZOOM);
    }

    /// Call when the container becomes visible after being hidden, so
    /// the widget recomputes its layout and re-centers.
    pub fn container_resized(&mut self) {
        self.surface.invalidate_size();
        self.surface.set_view(self.user_position, DEFAULT_ZOOM);
    }

    /// Removes every layer this renderer owns. Idempotent; also runs
    /// on drop.
    pub fn teardown(&mut self) {
        self.clear_route();
        for (_, layer) in self.facility_layers.drain() {
            self.surface.remove_layer(layer);
        }
        if let Some(layer) = self.user_layer.take() {
            self.surface.remove_layer(layer);
        }
    }

    pub fn facility_marker_count(&self) -> usize {
        self.facility_layers.len()
    }

    pub fn has_route(&self) -> bool {
        self.route_layer.is_some()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: MapSurface> Drop for MapRenderer<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Tooltip shown on marker hover: specialty tags plus the cost tier
/// when present.
fn marker_tooltip(facility: &Facility) -> String {
    let mut tooltip = facility.specialties.join(", ");
    if let Some(cost) = &facility.cost_range {
        if !tooltip.is_empty() {
            tooltip.push('\n');
        }
        tooltip.push_str("Cost: ");
        tooltip.push_str(cost);
    }
    if tooltip.is_empty() {
        facility.name.clone()
    } else {
        tooltip
    }
}

#[cfg(test)]
mod renderer_tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct SurfaceState {
        next_layer: u64,
        markers: HashMap<LayerId, Marker>,
        paths: HashMap<LayerId, Vec<Coordinate>>,
        view: Option<(Coordinate, u8)>,
        fly_to_calls: Vec<(Coordinate, u8)>,
        invalidations: usize,
        adds: usize,
        moves: usize,
        removals: usize,
    }

    /// Cloneable handle so tests can inspect the surface after the
    /// renderer is dropped.
    #[derive(Clone, Default)]
    struct SharedSurface(Rc<RefCell<SurfaceState>>);

    impl SharedSurface {
        fn layer_count(&self) -> usize {
            let state = self.0.borrow();
            state.markers.len() + state.paths.len()
        }
    }

    impl MapSurface for SharedSurface {
        fn set_view(&mut self, center: Coordinate, zoom: u8) {
            self.0.borrow_mut().view = Some((center, zoom));
        }

        fn fly_to(&mut self, center: Coordinate, zoom: u8) {
            self.0.borrow_mut().fly_to_calls.push((center, zoom));
        }

        fn invalidate_size(&mut self) {
            self.0.borrow_mut().invalidations += 1;
        }

        fn add_marker(&mut self, marker: Marker) -> LayerId {
            let mut state = self.0.borrow_mut();
            state.next_layer += 1;
            let layer = LayerId(state.next_layer);
            state.markers.insert(layer, marker);
            state.adds += 1;
            layer
        }

        fn move_marker(&mut self, layer: LayerId, position: Coordinate) {
            let mut state = self.0.borrow_mut();
            if let Some(marker) = state.markers.get_mut(&layer) {
                marker.position = position;
            }
            state.moves += 1;
        }

        fn remove_layer(&mut self, layer: LayerId) {
            let mut state = self.0.borrow_mut();
            state.markers.remove(&layer);
            state.paths.remove(&layer);
            state.removals += 1;
        }

        fn draw_path(&mut self, waypoints: &[Coordinate]) -> LayerId {
            let mut state = self.0.borrow_mut();
            state.next_layer += 1;
            let layer = LayerId(state.next_layer);
            state.paths.insert(layer, waypoints.to_vec());
            layer
        }
    }

    fn dhaka() -> Coordinate {
        Coordinate::new(23.7937, 90.4066)
    }

    #[test]
    fn test_new_centers_on_user_and_places_user_marker() {
        let surface = SharedSurface::default();
        let renderer = MapRenderer::new(surface.clone(), dhaka());

        let state = surface.0.borrow();
        assert_eq!(state.view, Some((dhaka(), DEFAULT_ZOOM)));
        assert_eq!(state.markers.len(), 1);
        let marker = state.markers.values().next().unwrap();
        assert_eq!(marker.kind, MarkerKind::User);
        drop(state);
        assert_eq!(renderer.facility_marker_count(), 0);
    }

    #[test]
    fn test_sync_markers_skips_malformed_coordinates() {
        let surface = SharedSurface::default();
        let mut renderer = MapRenderer::new(surface.clone(), dhaka());

        let facilities = vec![
            Facility::new(1, "City General Hospital", 23.723081, 90.409136),
            Facility::new(2, "No Position Clinic", f64::NAN, 90.4),
        ];
        renderer.sync_markers(&facilities);

        assert_eq!(renderer.facility_marker_count(), 1);
        // One user marker plus one facility marker.
        assert_eq!(surface.0.borrow().markers.len(), 2);
    }

    #[test]
    fn test_sync_markers_reconciles_instead_of_redrawing() {
        let surface = SharedSurface::default();
        let mut renderer = MapRenderer::new(surface.clone(), dhaka());

        renderer.sync_markers(&[
            Facility::new(1, "City General Hospital", 23.723081, 90.409136),
            Facility::new(2, "Private Care Center", 23.751315, 90.367692),
        ]);
        let adds_after_first = surface.0.borrow().adds;

        // Facility 2 survives, facility 1 drops out, facility 3 is new.
        renderer.sync_markers(&[
            Facility::new(2, "Private Care Center", 23.7514, 90.3678),
            Facility::new(3, "Emergency Trauma Center", 23.753081, 90.459136),
        ]);

        let state = surface.0.borrow();
        assert_eq!(renderer.facility_marker_count(), 2);
        assert_eq!(state.adds, adds_after_first + 1);
        assert_eq!(state.moves, 1);
        assert_eq!(state.removals, 1);
    }

    #[test]
    fn test_draw_route_replaces_previous_layer() {
        let surface = SharedSurface::default();
        let mut renderer = MapRenderer::new(surface.clone(), dhaka());

        let first = RoutePath {
            waypoints: vec![dhaka(), Coordinate::new(23.72, 90.41)],
            distance_km: 8.0,
        };
        let second = RoutePath {
            waypoints: vec![dhaka(), Coordinate::new(23.75, 90.46)],
            distance_km: 6.5,
        };

        renderer.draw_route(&first);
        renderer.draw_route(&second);

        let state = surface.0.borrow();
        assert_eq!(state.paths.len(), 1);
        assert_eq!(
            state.paths.values().next().unwrap(),
            &second.waypoints
        );
        drop(state);
        assert!(renderer.has_route());
    }

    #[test]
    fn test_center_on_user_flies_to_user() {
        let surface = SharedSurface::default();
        let mut renderer = MapRenderer::new(surface.clone(), dhaka());
        renderer.center_on_user();
        assert_eq!(
            surface.0.borrow().fly_to_calls,
            vec![(dhaka(), DEFAULT_ZOOM)]
        );
    }

    #[test]
    fn test_container_resized_invalidates_and_recenters() {
        let surface = SharedSurface::default();
        let mut renderer = MapRenderer::new(surface.clone(), dhaka());
        renderer.container_resized();
        let state = surface.0.borrow();
        assert_eq!(state.invalidations, 1);
        assert_eq!(state.view, Some((dhaka(), DEFAULT_ZOOM)));
    }

    /// All layers are removed when the renderer goes away.
    #[test]
    fn test_drop_removes_every_layer() {
        let surface = SharedSurface::default();
        {
            let mut renderer = MapRenderer::new(surface.clone(), dhaka());
            renderer.sync_markers(&[Facility::new(1, "City General Hospital", 23.72, 90.41)]);
            renderer.draw_route(&RoutePath {
                waypoints: vec![dhaka()],
                distance_km: 0.0,
            });
            assert!(surface.layer_count() > 0);
        }
        assert_eq!(surface.layer_count(), 0);
    }
}
