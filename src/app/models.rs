//! Data models for route browsing
//!
//! This module contains the raw route record as published per country, the
//! normalized immutable `Route` built from it, and the country catalogue entry.

use crate::constants::{self, POLYLINE_PRECISION, RATING_MAX, RATING_MIN, UNKNOWN_ROAD_TYPE};
use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Write as _;
use std::sync::LazyLock;

// =============================================================================
// Country
// =============================================================================

/// A country from the source catalogue
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    /// Display name, also the data file stem
    pub name: String,

    /// Numeric source code used for downloads and id derivation
    pub code: String,
}

impl Country {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }

    /// Every country in the catalogue, in catalogue order
    pub fn catalogue() -> Vec<Country> {
        constants::COUNTRIES
            .iter()
            .map(|(name, code)| Country::new(*name, *code))
            .collect()
    }

    /// Look up a catalogue country by exact name
    pub fn find(name: &str) -> Option<Country> {
        constants::COUNTRIES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(name, code)| Country::new(*name, *code))
    }
}

// =============================================================================
// Raw Route Record
// =============================================================================

/// A route record exactly as published in a country file
///
/// Numeric fields are kept as JSON values because the source mixes strings,
/// numbers and nulls; normalization happens in [`Route::from_raw`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRouteRecord {
    #[serde(default)]
    pub id: Value,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub road_type_name: String,

    #[serde(default)]
    pub rating: Value,

    /// Encoded polyline geometry
    #[serde(default)]
    pub polyline: String,

    /// Length in kilometres
    #[serde(default)]
    pub length: Value,

    #[serde(default)]
    pub comments_count: Value,

    /// Path relative to the route link base
    #[serde(default)]
    pub url: String,
}

impl RawRouteRecord {
    /// Source id, if the record carries a usable one
    pub fn source_id(&self) -> Option<String> {
        match &self.id {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

// =============================================================================
// Route
// =============================================================================

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A normalized route; immutable once loaded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Unique across the whole dataset
    pub id: String,
    pub country_name: String,
    pub road_type_name: String,
    /// Always within `[RATING_MIN, RATING_MAX]`
    pub rating: f64,
    #[serde(skip)]
    pub geometry: Vec<GeoPoint>,
    pub length_km: f64,
    pub title: String,
    pub comments_count: u64,
    pub source_url: String,
}

impl Route {
    /// Build a route from a raw record of the given country
    ///
    /// Ratings and ids are recovered locally; only undecodable geometry is an error.
    pub fn from_raw(raw: &RawRouteRecord, country: &Country) -> Result<Self> {
        let id = raw
            .source_id()
            .unwrap_or_else(|| derive_route_id(&country.code, &raw.title));

        let geometry = decode_geometry(&raw.polyline).map_err(|e| Error::polyline(&id, e))?;

        let road_type_name = match raw.road_type_name.trim() {
            "" => UNKNOWN_ROAD_TYPE.to_string(),
            name => name.to_string(),
        };

        Ok(Self {
            id,
            country_name: country.name.clone(),
            road_type_name,
            rating: normalize_rating(&raw.rating),
            geometry,
            length_km: lenient_f64(&raw.length).unwrap_or(0.0),
            title: raw.title.clone(),
            comments_count: lenient_f64(&raw.comments_count)
                .filter(|count| *count >= 0.0)
                .map(|count| count as u64)
                .unwrap_or(0),
            source_url: raw.url.clone(),
        })
    }

    /// Route length in statute miles, rounded to 2 decimals
    pub fn length_miles(&self) -> f64 {
        (self.length_km * constants::KM_TO_MILES * 100.0).round() / 100.0
    }
}

// =============================================================================
// Normalization helpers
// =============================================================================

static LEADING_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("leading float pattern is valid")
});

/// Parse the leading decimal number of a string, ignoring trailing text
fn parse_leading_float(text: &str) -> Option<f64> {
    LEADING_FLOAT
        .find(text)
        .and_then(|m| m.as_str().trim().parse::<f64>().ok())
}

fn lenient_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_leading_float(s),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

/// Normalize a raw rating into `[RATING_MIN, RATING_MAX]`
///
/// Missing or unparsable values become `RATING_MIN`.
pub fn normalize_rating(value: &Value) -> f64 {
    lenient_f64(value)
        .map(|rating| rating.clamp(RATING_MIN, RATING_MAX))
        .unwrap_or(RATING_MIN)
}

/// Derive a stable route id from the country code and title
///
/// Spaces become `-`, ASCII alphanumerics are kept and every other character
/// is written as `_<hex>_`, so distinct titles never share an id.
pub fn derive_route_id(country_code: &str, title: &str) -> String {
    let mut id = format!("{}-", country_code);
    for ch in title.chars() {
        if ch == ' ' {
            id.push('-');
        } else if ch.is_ascii_alphanumeric() {
            id.push(ch);
        } else {
            let _ = write!(id, "_{:x}_", ch as u32);
        }
    }
    id
}

/// Decode an encoded polyline into latitude/longitude pairs
pub fn decode_geometry(encoded: &str) -> std::result::Result<Vec<GeoPoint>, String> {
    let line = polyline::decode_polyline(encoded, POLYLINE_PRECISION).map_err(|e| e.to_string())?;
    Ok(line
        .coords()
        .map(|coord| GeoPoint::new(coord.y, coord.x))
        .collect())
}
