//! Visible-set derivation

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use super::state::{ChangeKind, FilterSnapshot, FilterState};
use crate::app::models::Route;
use crate::app::services::route_store::RouteStore;

/// Routes passing the filters, nested as country -> road type -> routes
///
/// Buckets keep the store's rating order. Road types with no passing route and
/// countries with no remaining road type are absent, never empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibleSet {
    countries: BTreeMap<String, BTreeMap<String, Vec<Arc<Route>>>>,
}

impl VisibleSet {
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn country_names(&self) -> impl Iterator<Item = &str> {
        self.countries.keys().map(String::as_str)
    }

    pub fn road_types_for(&self, country: &str) -> impl Iterator<Item = &str> {
        self.countries
            .get(country)
            .into_iter()
            .flat_map(|road_types| road_types.keys().map(String::as_str))
    }

    pub fn bucket(&self, country: &str, road_type: &str) -> Option<&[Arc<Route>]> {
        self.countries
            .get(country)
            .and_then(|road_types| road_types.get(road_type))
            .map(Vec::as_slice)
    }

    pub fn route_count(&self) -> usize {
        self.countries
            .values()
            .flat_map(|road_types| road_types.values())
            .map(Vec::len)
            .sum()
    }

    /// Every visible route in country, road type, then rating order
    pub fn routes(&self) -> impl Iterator<Item = &Arc<Route>> {
        self.countries
            .values()
            .flat_map(|road_types| road_types.values())
            .flatten()
    }

    pub fn route_ids(&self) -> impl Iterator<Item = &str> {
        self.routes().map(|route| route.id.as_str())
    }
}

/// Result of an apply step that detected changes
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub visible: VisibleSet,
    pub changes: ChangeKind,
}

impl FilterOutcome {
    /// Camera refits only when the country selection changed
    pub fn countries_changed(&self) -> bool {
        self.changes.countries
    }
}

/// Run the filter step
///
/// The snapshot is overwritten before anything else, then `None` is returned
/// if no dimension differed from the previous snapshot.
pub fn apply(store: &RouteStore, state: &mut FilterState) -> Option<FilterOutcome> {
    let changes = state.take_changes();
    if !changes.any() {
        debug!("Filters unchanged, skipping recompute");
        return None;
    }

    debug!("Filters changed: {}", changes);
    Some(FilterOutcome {
        visible: select_visible(store, state.current()),
        changes,
    })
}

/// Compute the routes of `store` that pass every filter in `filters`
pub fn select_visible(store: &RouteStore, filters: &FilterSnapshot) -> VisibleSet {
    let mut visible = VisibleSet::default();

    for country in &filters.countries {
        let mut kept = BTreeMap::new();

        for road_type in &filters.road_types {
            let Some(bucket) = store.bucket(country, road_type) else {
                continue;
            };

            let passing: Vec<Arc<Route>> = bucket
                .iter()
                .filter(|route| filters.rating.contains(route.rating))
                .cloned()
                .collect();

            if !passing.is_empty() {
                kept.insert(road_type.clone(), passing);
            }
        }

        if !kept.is_empty() {
            visible.countries.insert(country.clone(), kept);
        }
    }

    visible
}
