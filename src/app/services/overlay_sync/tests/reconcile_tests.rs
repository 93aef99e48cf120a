//! Tests for diff-based reconciliation

use super::*;
use crate::Error;
use crate::app::adapters::headless_map::{Camera, HeadlessMap};
use crate::app::services::overlay_sync::{MapSurface, reconcile};

#[test]
fn test_reconcile_applies_minimal_diff() {
    let (store, overlays) = create_lettered_store();
    let mut map = HeadlessMap::new();

    let first = visible_between(&store, 1.0, 4.0);
    reconcile(&first, &overlays, &mut map, false).unwrap();
    assert_eq!(map.attached_ids(), vec!["A", "B", "C"]);

    let second = visible_between(&store, 2.0, 5.0);
    let report = reconcile(&second, &overlays, &mut map, false).unwrap();

    assert_eq!(report.added, vec!["D".to_string()]);
    assert_eq!(report.removed, vec!["A".to_string()]);
    assert_eq!(map.attached_ids(), vec!["B", "C", "D"]);

    let counters = map.counters();
    assert_eq!(counters.attach_calls, 4);
    assert_eq!(counters.detach_calls, 1);
}

#[test]
fn test_reconcile_is_idempotent() {
    let (store, overlays) = create_lettered_store();
    let mut map = HeadlessMap::new();
    let visible = visible_between(&store, 1.0, 5.0);

    reconcile(&visible, &overlays, &mut map, false).unwrap();
    let counters = map.counters();

    let report = reconcile(&visible, &overlays, &mut map, false).unwrap();
    assert!(report.is_noop());
    assert_eq!(map.counters(), counters);
}

#[test]
fn test_reconcile_reads_surface_state_live() {
    let (store, overlays) = create_lettered_store();
    let mut map = HeadlessMap::new();
    let visible = visible_between(&store, 1.0, 5.0);
    reconcile(&visible, &overlays, &mut map, false).unwrap();

    // Something else detached B behind the synchronizer's back
    map.detach(overlays.get("B").unwrap());

    let report = reconcile(&visible, &overlays, &mut map, false).unwrap();
    assert_eq!(report.added, vec!["B".to_string()]);
    assert!(report.removed.is_empty());
}

#[test]
fn test_camera_refits_only_when_requested() {
    let (store, overlays) = create_lettered_store();
    let mut map = HeadlessMap::new();

    let visible = visible_between(&store, 2.0, 4.0);
    let report = reconcile(&visible, &overlays, &mut map, false).unwrap();
    assert!(report.camera.is_none());
    assert_eq!(map.camera(), Camera::default());

    let report = reconcile(&visible, &overlays, &mut map, true).unwrap();
    let region = report.camera.unwrap();

    // B spans lat 45..45.5 lon 6..6.5, C spans lat 46..46.5 lon 7..7.5
    assert_eq!(region.min().x, 6.0);
    assert_eq!(region.min().y, 45.0);
    assert_eq!(region.max().x, 7.5);
    assert_eq!(region.max().y, 46.5);
    assert_eq!(map.camera(), Camera::Fitted(region));
    assert_eq!(map.counters().fit_calls, 1);
}

#[test]
fn test_empty_visible_set_detaches_all_and_keeps_camera() {
    let (store, overlays) = create_lettered_store();
    let mut map = HeadlessMap::new();

    let visible = visible_between(&store, 1.0, 5.0);
    reconcile(&visible, &overlays, &mut map, true).unwrap();
    let camera = map.camera();

    let report = reconcile(&VisibleSet::default(), &overlays, &mut map, true).unwrap();
    assert_eq!(report.removed.len(), 4);
    assert!(report.camera.is_none());
    assert_eq!(map.attached_count(), 0);
    assert_eq!(map.camera(), camera);
}

#[test]
fn test_unregistered_overlay_is_an_error() {
    let (store, overlays) = create_unregistered_store();
    let mut map = HeadlessMap::new();
    let visible = visible_between(&store, 1.0, 5.0);

    let result = reconcile(&visible, &overlays, &mut map, true);
    assert!(matches!(
        result,
        Err(Error::UnregisteredOverlay { ref route_id }) if route_id == "ghost"
    ));
    assert_eq!(map.counters(), Default::default());
    assert_eq!(map.camera(), Camera::default());
}
