//! Diff-based convergence of the map surface towards the visible set

use std::collections::BTreeSet;
use tracing::{debug, info};

use super::{MapSurface, OverlayHandle, OverlayRegistry, Region};
use crate::app::services::filter_engine::VisibleSet;
use crate::{Error, Result};

/// What one reconcile pass changed on the surface
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    /// Route ids attached by this pass, sorted
    pub added: Vec<String>,

    /// Route ids detached by this pass, sorted
    pub removed: Vec<String>,

    /// Region the camera was fitted to, if a refit happened
    pub camera: Option<Region>,
}

impl ReconcileReport {
    /// True if the pass touched neither overlays nor camera
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.camera.is_none()
    }
}

/// Converge the surface's attached overlays to exactly the visible routes
///
/// Attachment state is read from the surface on every call. When
/// `refit_camera` is set and something is visible, the camera is fitted to the
/// visible overlays; an empty visible set never moves the camera.
///
/// # Errors
/// * `Error::UnregisteredOverlay` if a visible route has no overlay handle;
///   the surface is left untouched in that case
pub fn reconcile<M: MapSurface + ?Sized>(
    visible: &VisibleSet,
    overlays: &OverlayRegistry,
    map: &mut M,
    refit_camera: bool,
) -> Result<ReconcileReport> {
    let wanted_ids: BTreeSet<&str> = visible.route_ids().collect();

    // Resolve every handle before mutating anything
    let wanted: Vec<&OverlayHandle> = wanted_ids
        .iter()
        .map(|id| {
            overlays
                .get(id)
                .ok_or_else(|| Error::unregistered_overlay(*id))
        })
        .collect::<Result<_>>()?;

    let attached: BTreeSet<&str> = overlays
        .handles()
        .filter(|handle| map.is_attached(handle))
        .map(|handle| handle.route_id())
        .collect();

    let mut report = ReconcileReport::default();

    for handle in &wanted {
        if !attached.contains(handle.route_id()) {
            map.attach(handle);
            report.added.push(handle.route_id().to_string());
        }
    }

    for id in attached.difference(&wanted_ids) {
        if let Some(handle) = overlays.get(id) {
            map.detach(handle);
            report.removed.push(id.to_string());
        }
    }

    if refit_camera && !wanted.is_empty() {
        if let Some(region) = map.bounding_region_of(&wanted) {
            debug!("Fitting camera to {:?}", region);
            map.fit_camera(region);
            report.camera = Some(region);
        }
    }

    info!(
        "Reconciled overlays: {} visible, {} attached, {} detached{}",
        wanted.len(),
        report.added.len(),
        report.removed.len(),
        if report.camera.is_some() {
            ", camera refitted"
        } else {
            ""
        }
    );

    Ok(report)
}
