//! Shared test utilities and fixtures for route store tests

use crate::app::adapters::data_source::DataSource;
use crate::app::models::{Country, GeoPoint, RawRouteRecord, Route};
use crate::app::services::overlay_sync::OverlayRegistry;
use crate::app::services::route_store::RouteStore;
use crate::{Error, Result};
use serde_json::json;
use std::collections::HashMap;


/// Encoded polyline for `[(1.0, 2.0), (3.0, 4.0)]`
pub const TWO_POINT_POLYLINE: &str = "_ibE_seK_seK_seK";

/// Encoded polyline for `[(45.0, 6.0), (45.5, 6.5)]`
pub const ALPINE_POLYLINE: &str = "_atqG_{rc@_t`B_t`B";

/// Create a route with fixed two-point geometry
pub fn create_test_route(id: &str, country: &str, road_type: &str, rating: f64) -> Route {
    create_test_route_with_geometry(
        id,
        country,
        road_type,
        rating,
        vec![GeoPoint::new(1.0, 2.0), GeoPoint::new(3.0, 4.0)],
    )
}

pub fn create_test_route_with_geometry(
    id: &str,
    country: &str,
    road_type: &str,
    rating: f64,
    geometry: Vec<GeoPoint>,
) -> Route {
    Route {
        id: id.to_string(),
        country_name: country.to_string(),
        road_type_name: road_type.to_string(),
        rating,
        geometry,
        length_km: 42.0,
        title: format!("Route {}", id),
        comments_count: 3,
        source_url: format!("/routes/{}", id),
    }
}

/// Create a raw record as a country file would carry it
pub fn create_raw_record(title: &str, road_type: &str, rating: serde_json::Value) -> RawRouteRecord {
    RawRouteRecord {
        title: title.to_string(),
        road_type_name: road_type.to_string(),
        rating,
        polyline: TWO_POINT_POLYLINE.to_string(),
        length: json!(25.5),
        comments_count: json!(2),
        url: format!("/{}", title.to_lowercase().replace(' ', "-")),
        ..Default::default()
    }
}

/// Store with France (Mountain, Coastal) and Italy (Mountain)
pub fn create_test_store() -> (RouteStore, OverlayRegistry) {
    let mut store = RouteStore::new();
    let mut overlays = OverlayRegistry::default();

    store.insert_country(
        "France",
        vec![
            create_test_route("fr-1", "France", "Mountain", 4.5),
            create_test_route("fr-2", "France", "Mountain", 2.0),
            create_test_route("fr-3", "France", "Coastal", 3.5),
            create_test_route("fr-4", "France", "Mountain", 5.0),
        ],
        &mut overlays,
    );
    store.insert_country(
        "Italy",
        vec![
            create_test_route("it-1", "Italy", "Mountain", 3.0),
            create_test_route("it-2", "Italy", "Mountain", 4.0),
        ],
        &mut overlays,
    );

    (store, overlays)
}

/// In-memory data source with optional per-country failures
#[derive(Debug, Default)]
pub struct StaticSource {
    pub payloads: HashMap<String, Vec<RawRouteRecord>>,
    pub failing: Vec<String>,
}

impl StaticSource {
    pub fn with_country(mut self, name: &str, records: Vec<RawRouteRecord>) -> Self {
        self.payloads.insert(name.to_string(), records);
        self
    }

    pub fn with_failure(mut self, name: &str) -> Self {
        self.failing.push(name.to_string());
        self
    }
}

impl DataSource for StaticSource {
    fn describe(&self) -> String {
        "static test source".to_string()
    }

    async fn fetch_country(&self, country: &Country) -> Result<Vec<RawRouteRecord>> {
        if self.failing.contains(&country.name) {
            return Err(Error::data_source(&country.name, "simulated outage"));
        }
        self.payloads
            .get(&country.name)
            .cloned()
            .ok_or_else(|| Error::data_source(&country.name, "no payload"))
    }
}
