//! Read access to the route store

use std::sync::Arc;

use super::RouteStore;
use crate::app::models::Route;

impl RouteStore {
    /// Names of the loaded countries, sorted
    pub fn country_names(&self) -> impl Iterator<Item = &str> {
        self.countries.keys().map(String::as_str)
    }

    pub fn contains_country(&self, country: &str) -> bool {
        self.countries.contains_key(country)
    }

    /// Every road type seen in any loaded country, sorted
    pub fn known_road_types(&self) -> impl Iterator<Item = &str> {
        self.known_road_types.iter().map(String::as_str)
    }

    /// Road types present in one country, sorted
    pub fn road_types_for(&self, country: &str) -> impl Iterator<Item = &str> {
        self.countries
            .get(country)
            .into_iter()
            .flat_map(|buckets| buckets.keys().map(String::as_str))
    }

    /// Routes of one (country, road type) bucket, ascending by rating
    pub fn bucket(&self, country: &str, road_type: &str) -> Option<&[Arc<Route>]> {
        self.countries
            .get(country)
            .and_then(|buckets| buckets.get(road_type))
            .map(Vec::as_slice)
    }

    pub fn get_route(&self, route_id: &str) -> Option<&Arc<Route>> {
        self.by_id.get(route_id)
    }

    /// Total number of routes across all countries
    pub fn route_count(&self) -> usize {
        self.by_id.len()
    }

    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Every route in country, road type, then rating order
    pub fn routes(&self) -> impl Iterator<Item = &Arc<Route>> {
        self.countries
            .values()
            .flat_map(|buckets| buckets.values())
            .flatten()
    }
}
