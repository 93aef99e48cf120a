//! Shared fixtures for overlay synchronization tests

use crate::app::models::GeoPoint;
use crate::app::services::filter_engine::{FilterState, VisibleSet, select_visible};
use crate::app::services::overlay_sync::OverlayRegistry;
use crate::app::services::route_store::RouteStore;
use crate::app::services::route_store::tests::{create_test_route, create_test_route_with_geometry};

pub mod reconcile_tests;

/// Store with routes A, B, C, D in France, all Mountain, A at 1.0 .. D at 4.0
pub fn create_lettered_store() -> (RouteStore, OverlayRegistry) {
    let mut store = RouteStore::new();
    let mut overlays = OverlayRegistry::new("https://example.org");

    store.insert_country(
        "France",
        vec![
            create_test_route_with_geometry(
                "A",
                "France",
                "Mountain",
                1.0,
                vec![GeoPoint::new(44.0, 5.0), GeoPoint::new(44.5, 5.5)],
            ),
            create_test_route_with_geometry(
                "B",
                "France",
                "Mountain",
                2.0,
                vec![GeoPoint::new(45.0, 6.0), GeoPoint::new(45.5, 6.5)],
            ),
            create_test_route_with_geometry(
                "C",
                "France",
                "Mountain",
                3.0,
                vec![GeoPoint::new(46.0, 7.0), GeoPoint::new(46.5, 7.5)],
            ),
            create_test_route_with_geometry(
                "D",
                "France",
                "Mountain",
                4.0,
                vec![GeoPoint::new(47.0, 3.0), GeoPoint::new(47.5, 3.5)],
            ),
        ],
        &mut overlays,
    );

    (store, overlays)
}

/// Visible set holding the France/Mountain routes rated in `[low, high)`
pub fn visible_between(store: &RouteStore, low: f64, high: f64) -> VisibleSet {
    let mut state = FilterState::new();
    state.set_countries(["France"]);
    state.set_road_types(["Mountain"]);
    state.set_rating_interval(low, high).unwrap();
    select_visible(store, state.current())
}

/// Store whose only route has no overlay in the given registry
pub fn create_unregistered_store() -> (RouteStore, OverlayRegistry) {
    let mut store = RouteStore::new();
    let mut scratch = OverlayRegistry::default();
    store.insert_country(
        "France",
        vec![create_test_route("ghost", "France", "Mountain", 3.0)],
        &mut scratch,
    );
    (store, OverlayRegistry::default())
}
