//! Filter state and visible-set derivation
//!
//! This module owns the three independent filter dimensions (countries, road
//! types, rating interval) together with the snapshot of what was last
//! applied, and derives the visible subset of the route store from them.
//!
//! # Architecture
//!
//! - [`state`] - `FilterState`, snapshots, change detection and commands
//! - [`rating`] - the rating interval and its boundary rule
//! - [`engine`] - the apply step and the `VisibleSet` it produces
//!
//! # Pipeline contract
//!
//! Applying compares the current filters with the previous snapshot, then
//! overwrites the snapshot, and only then decides whether anything needs to be
//! recomputed. Repeated identical submissions are therefore no-ops.

pub mod engine;
pub mod rating;
pub mod state;

#[cfg(test)]
pub mod tests;

pub use engine::{FilterOutcome, VisibleSet, apply, select_visible};
pub use rating::RatingInterval;
pub use state::{ChangeKind, FilterCommand, FilterSnapshot, FilterState};
