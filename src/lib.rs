//! Route Browser Library
//!
//! A Rust library for browsing road-trip routes grouped by country and road
//! type, filtering them by country, road type and rating, keeping a map
//! surface in sync with the filtered set, and exporting that set as GPX.
//!
//! This library provides tools for:
//! - Loading per-country route files concurrently, tolerating failed countries
//! - Indexing routes as country -> road type -> rating-ordered routes
//! - Deriving the visible subset from three independent filter dimensions
//! - Reconciling map overlays against the visible subset with minimal churn
//! - Writing GPX 1.1 track files for the visible routes

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod filter_engine;
        pub mod gpx_export;
        pub mod overlay_sync;
        pub mod route_store;
        pub mod selection;
        pub mod session;
    }
    pub mod adapters {
        pub mod data_source;
        pub mod headless_map;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Country, GeoPoint, RawRouteRecord, Route};
pub use app::services::filter_engine::{FilterCommand, FilterState, RatingInterval, VisibleSet};
pub use app::services::overlay_sync::{MapSurface, OverlayHandle, OverlayRegistry, Region};
pub use app::services::route_store::RouteStore;
pub use app::services::session::Session;
pub use config::Config;

/// Result type alias for the route browser
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for route loading, filtering, reconciliation and export
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON decoding error
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// A country's route data could not be obtained
    #[error("Data source error for '{country}': {message}")]
    DataSource { country: String, message: String },

    /// HTTP transport error
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// Encoded route geometry could not be decoded
    #[error("Polyline decoding failed for route '{route}': {message}")]
    Polyline { route: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Export was requested with no visible routes
    #[error("Nothing to export: no routes match the current filters")]
    NothingToExport,

    /// The visible set references a route that has no registered overlay
    #[error("No overlay registered for route '{route_id}' (route store and overlay registry out of sync)")]
    UnregisteredOverlay { route_id: String },

    /// Rating interval outside the rating domain or inverted
    #[error("Invalid rating interval [{low}, {high}]")]
    InvalidRatingInterval { low: f64, high: f64 },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }

    /// Create a data source error for one country
    pub fn data_source(country: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataSource {
            country: country.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP error with context
    pub fn http(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Http {
            message: message.into(),
            source,
        }
    }

    /// Create a polyline decoding error
    pub fn polyline(route: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Polyline {
            route: route.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an unregistered overlay error
    pub fn unregistered_overlay(route_id: impl Into<String>) -> Self {
        Self::UnregisteredOverlay {
            route_id: route_id.into(),
        }
    }

    /// Create an invalid rating interval error
    pub fn invalid_rating_interval(low: f64, high: f64) -> Self {
        Self::InvalidRatingInterval { low, high }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON decoding failed".to_string(),
            source: error,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Http {
            message: "HTTP request failed".to_string(),
            source: error,
        }
    }
}
