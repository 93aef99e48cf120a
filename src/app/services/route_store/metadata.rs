//! Route store loading statistics
//!
//! This module defines the per-country build result and the aggregate
//! statistics of a full load.

use std::time::Duration;

/// Result of building one country into the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountryBuild {
    /// Routes inserted into the index
    pub routes_loaded: usize,

    /// Records dropped because their geometry was missing or undecodable
    pub records_skipped: usize,

    /// Records dropped because their id was already taken
    pub duplicates_skipped: usize,

    /// The country was already present and nothing was inserted
    pub already_loaded: bool,
}

/// Statistics about a load across countries
#[derive(Debug, Clone)]
pub struct LoadStats {
    /// Number of countries a load was issued for
    pub countries_requested: usize,

    /// Number of countries whose data arrived and was built
    pub countries_loaded: usize,

    /// Number of countries whose load failed
    pub countries_failed: usize,

    /// Number of routes inserted into the store
    pub routes_loaded: usize,

    /// Number of records skipped for bad geometry
    pub records_skipped: usize,

    /// Number of records skipped for duplicate ids
    pub duplicates_skipped: usize,

    /// Time taken by the load
    pub load_duration: Duration,

    /// Any errors encountered during loading
    pub errors: Vec<String>,
}

impl LoadStats {
    /// Create new empty load statistics
    pub fn new() -> Self {
        Self {
            countries_requested: 0,
            countries_loaded: 0,
            countries_failed: 0,
            routes_loaded: 0,
            records_skipped: 0,
            duplicates_skipped: 0,
            load_duration: Duration::ZERO,
            errors: Vec::new(),
        }
    }

    /// Fold one country's build result into the totals
    pub fn record_build(&mut self, build: &CountryBuild) {
        if !build.already_loaded {
            self.countries_loaded += 1;
        }
        self.routes_loaded += build.routes_loaded;
        self.records_skipped += build.records_skipped;
        self.duplicates_skipped += build.duplicates_skipped;
    }

    /// Record a failed country load
    pub fn record_failure(&mut self, country: &str, error: impl std::fmt::Display) {
        self.countries_failed += 1;
        self.errors.push(format!("{}: {}", country, error));
    }

    /// Fold another set of statistics into this one
    pub fn merge(&mut self, other: &LoadStats) {
        self.countries_requested += other.countries_requested;
        self.countries_loaded += other.countries_loaded;
        self.countries_failed += other.countries_failed;
        self.routes_loaded += other.routes_loaded;
        self.records_skipped += other.records_skipped;
        self.duplicates_skipped += other.duplicates_skipped;
        self.load_duration += other.load_duration;
        self.errors.extend(other.errors.iter().cloned());
    }

    /// Check if any errors occurred during loading
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get a summary string of the loading process
    pub fn summary(&self) -> String {
        format!(
            "Loaded {} of {} countries ({} failed), {} routes ({} records skipped, {} duplicates) in {:.2}s",
            self.countries_loaded,
            self.countries_requested,
            self.countries_failed,
            self.routes_loaded,
            self.records_skipped,
            self.duplicates_skipped,
            self.load_duration.as_secs_f64()
        )
    }
}

impl Default for LoadStats {
    fn default() -> Self {
        Self::new()
    }
}
