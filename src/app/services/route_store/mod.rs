//! Route store: the hierarchical index of every loaded route
//!
//! Routes are indexed as country name -> road type name -> routes, with every
//! bucket sorted ascending by rating (stable, so ties keep load order). The
//! store is append-only: a country is built once, atomically, and never
//! removed.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::app::models::{Country, RawRouteRecord, Route};
use crate::app::services::overlay_sync::OverlayRegistry;

pub mod loader;
pub mod metadata;
pub mod query;

#[cfg(test)]
pub mod tests;

pub use metadata::{CountryBuild, LoadStats};

type Buckets = BTreeMap<String, Vec<Arc<Route>>>;

/// Hierarchical, rating-ordered route index
#[derive(Debug, Clone, Default)]
pub struct RouteStore {
    /// Country name -> road type name -> routes ascending by rating
    pub(crate) countries: BTreeMap<String, Buckets>,

    /// Every road type seen in any loaded country
    pub(crate) known_road_types: BTreeSet<String>,

    /// Route lookup by id, used to keep ids unique across countries
    pub(crate) by_id: HashMap<String, Arc<Route>>,
}

impl RouteStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a country's raw records and insert them
    ///
    /// Records whose geometry cannot be decoded are skipped and counted; the
    /// rest of the country is still built.
    pub fn build_country(
        &mut self,
        country: &Country,
        records: &[RawRouteRecord],
        overlays: &mut OverlayRegistry,
    ) -> CountryBuild {
        let mut skipped = 0;
        let routes: Vec<Route> = records
            .iter()
            .filter_map(|raw| match Route::from_raw(raw, country) {
                Ok(route) => Some(route),
                Err(e) => {
                    warn!("Skipping record in {}: {}", country.name, e);
                    skipped += 1;
                    None
                }
            })
            .collect();

        let mut build = self.insert_country(&country.name, routes, overlays);
        build.records_skipped += skipped;
        build
    }

    /// Insert already-normalized routes for one country
    ///
    /// The country's buckets are assembled and sorted locally, then published
    /// in one step, so readers never observe a partially built country. A
    /// country that is already present is left untouched. Routes whose id is
    /// already taken are skipped.
    pub fn insert_country(
        &mut self,
        country_name: &str,
        routes: Vec<Route>,
        overlays: &mut OverlayRegistry,
    ) -> CountryBuild {
        let mut build = CountryBuild::default();

        if self.countries.contains_key(country_name) {
            warn!("Country {} already loaded, ignoring reload", country_name);
            build.already_loaded = true;
            return build;
        }

        let mut buckets: Buckets = BTreeMap::new();
        let mut accepted: HashMap<String, Arc<Route>> = HashMap::new();

        for mut route in routes {
            if self.by_id.contains_key(&route.id) || accepted.contains_key(&route.id) {
                warn!(
                    "Duplicate route id '{}' in {}, keeping the first occurrence",
                    route.id, country_name
                );
                build.duplicates_skipped += 1;
                continue;
            }

            // A route always lives in the bucket of its own country
            route.country_name = country_name.to_string();
            let route = Arc::new(route);
            accepted.insert(route.id.clone(), Arc::clone(&route));
            buckets
                .entry(route.road_type_name.clone())
                .or_default()
                .push(route);
        }

        for bucket in buckets.values_mut() {
            bucket.sort_by(|a, b| a.rating.total_cmp(&b.rating));
        }

        for route in buckets.values().flatten() {
            overlays.register(route);
        }

        build.routes_loaded = accepted.len();
        self.known_road_types.extend(buckets.keys().cloned());
        self.by_id.extend(accepted);
        if !buckets.is_empty() {
            self.countries.insert(country_name.to_string(), buckets);
        }

        debug!(
            "Built {}: {} routes, {} skipped, {} duplicates",
            country_name, build.routes_loaded, build.records_skipped, build.duplicates_skipped
        );

        build
    }
}
