//! Filter state, snapshots and change detection

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::rating::RatingInterval;
use crate::Result;

/// One complete set of filter values
///
/// Sets make comparison order-independent: `[A, B]` equals `[B, A]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterSnapshot {
    pub countries: BTreeSet<String>,
    pub road_types: BTreeSet<String>,
    pub rating: RatingInterval,
}

/// Which filter dimensions differ between two snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ChangeKind {
    pub countries: bool,
    pub road_types: bool,
    pub rating: bool,
}

impl ChangeKind {
    pub fn between(previous: &FilterSnapshot, current: &FilterSnapshot) -> Self {
        Self {
            countries: previous.countries != current.countries,
            road_types: previous.road_types != current.road_types,
            rating: previous.rating != current.rating,
        }
    }

    /// True if at least one dimension changed
    pub fn any(&self) -> bool {
        self.countries || self.road_types || self.rating
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = [
            (self.countries, "countries"),
            (self.road_types, "road types"),
            (self.rating, "rating"),
        ]
        .into_iter()
        .filter(|(changed, _)| *changed)
        .map(|(_, name)| name)
        .collect();

        if names.is_empty() {
            write!(f, "nothing")
        } else {
            write!(f, "{}", names.join(", "))
        }
    }
}

/// A committed filter mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterCommand {
    SetCountries(Vec<String>),
    SetRoadTypes(Vec<String>),
    SetRatingInterval { low: f64, high: f64 },
}

/// Current filter values plus the snapshot last applied
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    current: FilterSnapshot,
    previous: FilterSnapshot,
}

impl FilterState {
    /// Empty countries, empty road types, full rating domain
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &FilterSnapshot {
        &self.current
    }

    pub fn previous(&self) -> &FilterSnapshot {
        &self.previous
    }

    pub fn set_countries<I, S>(&mut self, countries: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.current.countries = countries.into_iter().map(Into::into).collect();
    }

    pub fn set_road_types<I, S>(&mut self, road_types: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.current.road_types = road_types.into_iter().map(Into::into).collect();
    }

    /// Set the rating interval, rejecting values outside the rating domain
    ///
    /// On error the current interval is left unchanged.
    pub fn set_rating_interval(&mut self, low: f64, high: f64) -> Result<()> {
        self.current.rating = RatingInterval::new(low, high)?;
        Ok(())
    }

    /// Apply a committed command to the current values
    pub fn apply_command(&mut self, command: FilterCommand) -> Result<()> {
        match command {
            FilterCommand::SetCountries(countries) => self.set_countries(countries),
            FilterCommand::SetRoadTypes(road_types) => self.set_road_types(road_types),
            FilterCommand::SetRatingInterval { low, high } => {
                self.set_rating_interval(low, high)?
            }
        }
        Ok(())
    }

    /// Changes between the last applied snapshot and the current values
    pub fn change_kind(&self) -> ChangeKind {
        ChangeKind::between(&self.previous, &self.current)
    }

    /// Record the current values as applied and return what changed
    pub fn take_changes(&mut self) -> ChangeKind {
        let changes = self.change_kind();
        self.previous = self.current.clone();
        changes
    }
}
