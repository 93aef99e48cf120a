//! Map overlay registry and synchronization
//!
//! Every loaded route gets exactly one [`OverlayHandle`] at load time. Handles
//! are never recreated or removed; the synchronizer only toggles whether each
//! one is attached to the [`MapSurface`], converging the surface towards the
//! visible set with the minimal add/remove operations.
//!
//! # Architecture
//!
//! - [`handle`] - overlay handle, styling, click summary and link
//! - [`reconcile`] - diff-based attach/detach and camera refit

use geo::{Coord, Rect};
use std::collections::HashMap;
use tracing::debug;

use crate::app::models::Route;

pub mod handle;
pub mod reconcile;

#[cfg(test)]
pub mod tests;

pub use handle::{OverlayHandle, OverlayStyle, RouteSummary};
pub use reconcile::{ReconcileReport, reconcile};

/// Geographic region in degrees; `x` is longitude and `y` is latitude
pub type Region = Rect<f64>;

/// Drawing surface capability consumed by the synchronizer
///
/// Implementations own attachment state; the synchronizer queries it live on
/// every reconcile and never caches it.
pub trait MapSurface {
    /// Draw the overlay
    fn attach(&mut self, overlay: &OverlayHandle);

    /// Stop drawing the overlay
    fn detach(&mut self, overlay: &OverlayHandle);

    /// Whether the overlay is currently drawn
    fn is_attached(&self, overlay: &OverlayHandle) -> bool;

    /// Smallest region covering every given overlay, `None` if none has geometry
    fn bounding_region_of(&self, overlays: &[&OverlayHandle]) -> Option<Region> {
        union_regions(overlays.iter().filter_map(|overlay| overlay.bounding_region()))
    }

    /// Move the camera so the region is fully visible
    fn fit_camera(&mut self, region: Region);
}

/// Smallest region covering all given regions
pub fn union_regions(regions: impl IntoIterator<Item = Region>) -> Option<Region> {
    regions.into_iter().reduce(|acc, region| {
        Rect::new(
            Coord {
                x: acc.min().x.min(region.min().x),
                y: acc.min().y.min(region.min().y),
            },
            Coord {
                x: acc.max().x.max(region.max().x),
                y: acc.max().y.max(region.max().y),
            },
        )
    })
}

/// Overlay handles keyed by route id
#[derive(Debug, Clone)]
pub struct OverlayRegistry {
    handles: HashMap<String, OverlayHandle>,

    /// Base URL that relative route links resolve against
    link_base: String,
}

impl OverlayRegistry {
    pub fn new(link_base: impl Into<String>) -> Self {
        Self {
            handles: HashMap::new(),
            link_base: link_base.into(),
        }
    }

    /// Create and register the overlay for a route
    ///
    /// Returns `false` and keeps the existing handle if the id is already registered.
    pub fn register(&mut self, route: &Route) -> bool {
        if self.handles.contains_key(&route.id) {
            return false;
        }
        debug!("Registering overlay for route {}", route.id);
        self.handles.insert(
            route.id.clone(),
            OverlayHandle::for_route(route, &self.link_base),
        );
        true
    }

    pub fn get(&self, route_id: &str) -> Option<&OverlayHandle> {
        self.handles.get(route_id)
    }

    pub fn contains(&self, route_id: &str) -> bool {
        self.handles.contains_key(route_id)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Every registered handle, in no particular order
    pub fn handles(&self) -> impl Iterator<Item = &OverlayHandle> {
        self.handles.values()
    }
}

impl Default for OverlayRegistry {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_ROUTE_LINK_BASE)
    }
}
