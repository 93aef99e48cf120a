//! Shared fixtures for filter engine tests

use crate::app::services::filter_engine::FilterState;

pub use crate::app::services::route_store::tests::create_test_store;

pub mod engine_tests;

/// Filter state selecting the given countries and road types at full rating
pub fn create_filter_state(countries: &[&str], road_types: &[&str]) -> FilterState {
    let mut state = FilterState::new();
    state.set_countries(countries.iter().copied());
    state.set_road_types(road_types.iter().copied());
    state
}
