//! Definition for the [`SelectionPhase`] type, implemented by an enum.

/// Phase of the selection/route state machine.
///
/// `Idle` is the initial state. Any state returns to `Idle` on an
/// explicit panel close or when a new search invalidates the current
/// selection. A failed route computation falls back from
/// `RouteRequested` to `Selected` without a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    /// No selection, no route.
    Idle,
    /// A facility is chosen; no route displayed.
    Selected,
    /// A route computation is in flight for the current selection.
    RouteRequested,
    /// The most recent route result is drawn on the map.
    RouteDisplayed,
}
