//! In-memory map surface
//!
//! Tracks which overlays are drawn and where the camera points without any
//! rendering. The CLI reports from it and the tests assert against it.

use serde::Serialize;
use std::collections::HashSet;
use tracing::trace;

use crate::app::services::overlay_sync::{MapSurface, OverlayHandle, Region};
use crate::constants::{DEFAULT_CAMERA_CENTER, DEFAULT_CAMERA_ZOOM};

/// Where the camera currently points
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Camera {
    /// Initial world view
    CenterZoom { lat: f64, lon: f64, zoom: u8 },

    /// Fitted to a region
    Fitted(Region),
}

impl Default for Camera {
    fn default() -> Self {
        let (lat, lon) = DEFAULT_CAMERA_CENTER;
        Camera::CenterZoom {
            lat,
            lon,
            zoom: DEFAULT_CAMERA_ZOOM,
        }
    }
}

/// Number of surface operations performed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SurfaceCounters {
    pub attach_calls: usize,
    pub detach_calls: usize,
    pub fit_calls: usize,
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessMap {
    attached: HashSet<String>,
    camera: Camera,
    counters: SurfaceCounters,
}

impl HeadlessMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Ids of the drawn overlays, sorted
    pub fn attached_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.attached.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    pub fn counters(&self) -> SurfaceCounters {
        self.counters
    }
}

impl MapSurface for HeadlessMap {
    fn attach(&mut self, overlay: &OverlayHandle) {
        trace!("attach {}", overlay.route_id());
        self.counters.attach_calls += 1;
        self.attached.insert(overlay.route_id().to_string());
    }

    fn detach(&mut self, overlay: &OverlayHandle) {
        trace!("detach {}", overlay.route_id());
        self.counters.detach_calls += 1;
        self.attached.remove(overlay.route_id());
    }

    fn is_attached(&self, overlay: &OverlayHandle) -> bool {
        self.attached.contains(overlay.route_id())
    }

    fn fit_camera(&mut self, region: Region) {
        self.counters.fit_calls += 1;
        self.camera = Camera::Fitted(region);
    }
}
