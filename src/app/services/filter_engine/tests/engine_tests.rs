//! Tests for the apply step and visible-set pruning

use super::*;
use crate::app::services::filter_engine::{apply, select_visible};

#[test]
fn test_apply_selects_matching_routes() {
    let (store, _) = create_test_store();
    let mut state = create_filter_state(&["France"], &["Mountain"]);

    let outcome = apply(&store, &mut state).unwrap();
    assert!(outcome.countries_changed());

    let ids: Vec<&str> = outcome.visible.route_ids().collect();
    assert_eq!(ids, vec!["fr-2", "fr-1", "fr-4"]);
}

#[test]
fn test_apply_twice_is_a_noop() {
    let (store, _) = create_test_store();
    let mut state = create_filter_state(&["France", "Italy"], &["Mountain"]);

    assert!(apply(&store, &mut state).is_some());
    assert!(apply(&store, &mut state).is_none());
}

#[test]
fn test_empty_country_selection_yields_nothing() {
    let (store, _) = create_test_store();
    let mut state = create_filter_state(&["France"], &["Mountain", "Coastal"]);
    apply(&store, &mut state).unwrap();

    state.set_countries(Vec::<String>::new());
    let outcome = apply(&store, &mut state).unwrap();
    assert!(outcome.visible.is_empty());
    assert!(outcome.countries_changed());
}

#[test]
fn test_empty_buckets_and_countries_are_pruned() {
    let (store, _) = create_test_store();
    let mut state = create_filter_state(&["France", "Italy"], &["Mountain", "Coastal"]);
    state.set_rating_interval(4.5, 5.0).unwrap();

    let visible = select_visible(&store, state.current());

    // Italy tops out at 4.0 and France's coastal route is 3.5
    assert_eq!(visible.country_names().collect::<Vec<_>>(), vec!["France"]);
    assert_eq!(visible.road_types_for("France").collect::<Vec<_>>(), vec!["Mountain"]);
    assert!(visible.bucket("France", "Coastal").is_none());
    assert!(visible.bucket("Italy", "Mountain").is_none());

    for country in visible.country_names() {
        for road_type in visible.road_types_for(country) {
            assert!(!visible.bucket(country, road_type).unwrap().is_empty());
        }
    }
}

#[test]
fn test_top_rated_routes_survive_full_interval() {
    let (store, _) = create_test_store();
    let state = create_filter_state(&["France"], &["Mountain"]);

    let visible = select_visible(&store, state.current());
    assert!(visible.routes().any(|route| route.rating == 5.0));
}

#[test]
fn test_rating_boundary_excludes_upper_bound_below_top() {
    let (store, _) = create_test_store();
    let mut state = create_filter_state(&["Italy"], &["Mountain"]);
    state.set_rating_interval(3.0, 4.0).unwrap();

    let visible = select_visible(&store, state.current());
    let ids: Vec<&str> = visible.route_ids().collect();
    assert_eq!(ids, vec!["it-1"]);
}

#[test]
fn test_unknown_countries_and_road_types_are_ignored() {
    let (store, _) = create_test_store();
    let state = create_filter_state(&["Atlantis", "Italy"], &["Gravel", "Mountain"]);

    let visible = select_visible(&store, state.current());
    assert_eq!(visible.route_count(), 2);
    assert_eq!(visible.country_names().collect::<Vec<_>>(), vec!["Italy"]);
}

#[test]
fn test_visible_buckets_keep_rating_order() {
    let (store, _) = create_test_store();
    let state = create_filter_state(&["France", "Italy"], &["Mountain", "Coastal"]);

    let visible = select_visible(&store, state.current());
    for country in visible.country_names() {
        for road_type in visible.road_types_for(country) {
            let bucket = visible.bucket(country, road_type).unwrap();
            assert!(bucket.windows(2).all(|pair| pair[0].rating <= pair[1].rating));
        }
    }
}
