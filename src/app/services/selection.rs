//! Picker drafts for editing one filter dimension
//!
//! A draft copies the current filter value when opened, is edited freely, and
//! only touches the filter state when committed as a [`FilterCommand`].

use std::collections::BTreeSet;

use crate::Result;
use crate::app::models::Country;
use crate::app::services::filter_engine::{FilterCommand, FilterSnapshot, RatingInterval};
use crate::app::services::route_store::RouteStore;
use crate::constants::{RATING_MAX, RATING_MIN};

/// Which filter dimension a draft edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    Countries,
    RoadTypes,
    Rating,
}

/// An open picker with its temporary selection
#[derive(Debug, Clone)]
pub struct SelectionDraft {
    kind: PickerKind,
    options: Vec<String>,
    selected: BTreeSet<String>,
    rating: (f64, f64),
    search: String,
}

impl SelectionDraft {
    fn open(kind: PickerKind, options: Vec<String>, current: &FilterSnapshot) -> Self {
        let selected = match kind {
            PickerKind::Countries => current.countries.clone(),
            PickerKind::RoadTypes => current.road_types.clone(),
            PickerKind::Rating => BTreeSet::new(),
        };

        Self {
            kind,
            options,
            selected,
            rating: (current.rating.low(), current.rating.high()),
            search: String::new(),
        }
    }

    /// Country picker offering every catalogue country, sorted by name
    pub fn countries(current: &FilterSnapshot) -> Self {
        let mut options: Vec<String> = Country::catalogue()
            .into_iter()
            .map(|country| country.name)
            .collect();
        options.sort();
        Self::open(PickerKind::Countries, options, current)
    }

    /// Road type picker offering every road type known to the store
    pub fn road_types(store: &RouteStore, current: &FilterSnapshot) -> Self {
        let options = store.known_road_types().map(str::to_string).collect();
        Self::open(PickerKind::RoadTypes, options, current)
    }

    pub fn rating(current: &FilterSnapshot) -> Self {
        Self::open(PickerKind::Rating, Vec::new(), current)
    }

    pub fn kind(&self) -> PickerKind {
        self.kind
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn is_selected(&self, option: &str) -> bool {
        self.selected.contains(option)
    }

    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Options containing the search text, case-insensitively
    pub fn visible_options(&self) -> Vec<&str> {
        let query = self.search.to_lowercase();
        self.options
            .iter()
            .filter(|option| query.is_empty() || option.to_lowercase().contains(&query))
            .map(String::as_str)
            .collect()
    }

    /// Flip one option; returns whether it is now selected
    ///
    /// Unknown options are ignored.
    pub fn toggle(&mut self, option: &str) -> bool {
        if !self.options.iter().any(|candidate| candidate == option) {
            return false;
        }
        if !self.selected.remove(option) {
            self.selected.insert(option.to_string());
            return true;
        }
        false
    }

    pub fn select_all(&mut self) {
        if self.kind != PickerKind::Rating {
            self.selected = self.options.iter().cloned().collect();
        }
    }

    pub fn clear(&mut self) {
        if self.kind != PickerKind::Rating {
            self.selected.clear();
        }
    }

    pub fn rating_range(&self) -> (f64, f64) {
        self.rating
    }

    pub fn set_rating(&mut self, low: f64, high: f64) {
        self.rating = (low, high);
    }

    pub fn reset_rating(&mut self) {
        self.rating = (RATING_MIN, RATING_MAX);
    }

    /// Turn the draft into the command that applies it
    ///
    /// Rating bounds are rounded to one decimal and validated.
    pub fn commit(self) -> Result<FilterCommand> {
        Ok(match self.kind {
            PickerKind::Countries => FilterCommand::SetCountries(self.selected.into_iter().collect()),
            PickerKind::RoadTypes => FilterCommand::SetRoadTypes(self.selected.into_iter().collect()),
            PickerKind::Rating => {
                let interval = RatingInterval::rounded(self.rating.0, self.rating.1)?;
                FilterCommand::SetRatingInterval {
                    low: interval.low(),
                    high: interval.high(),
                }
            }
        })
    }
}
