//! Application constants for the route browser
//!
//! This module contains the country catalogue, rating domain, overlay styling
//! thresholds and default values used throughout the route browser.

// =============================================================================
// Country Catalogue
// =============================================================================

/// Countries published by the route source as (name, numeric source code)
///
/// The name doubles as the per-country data file stem (`<name>.json`) and the
/// code is used both for downloads and for deriving route identifiers.
pub const COUNTRIES: &[(&str, &str)] = &[
    ("Albania", "53"),
    ("Andorra", "41"),
    ("Argentina", "49"),
    ("Armenia", "94"),
    ("Australia", "29"),
    ("Austria", "4"),
    ("Belgium", "8"),
    ("Bolivia", "74"),
    ("Bosnia and Herzegovina", "56"),
    ("Botswana", "120"),
    ("Brazil", "50"),
    ("Bulgaria", "47"),
    ("Canada", "24"),
    ("Chile", "48"),
    ("China", "36"),
    ("Colombia", "52"),
    ("Costa Rica", "67"),
    ("Croatia", "31"),
    ("Cyprus", "34"),
    ("Czech Republic", "32"),
    ("Denmark", "18"),
    ("Egypt", "116"),
    ("Estonia", "30"),
    ("Finland", "25"),
    ("France", "6"),
    ("Georgia", "95"),
    ("Germany", "7"),
    ("Greece", "26"),
    ("Guatemala", "63"),
    ("Hungary", "33"),
    ("Iceland", "35"),
    ("India", "44"),
    ("Indonesia", "59"),
    ("Iran", "102"),
    ("Ireland", "22"),
    ("Israel", "57"),
    ("Italy", "12"),
    ("Japan", "109"),
    ("Jordan", "86"),
    ("Kazakhstan", "97"),
    ("Kuwait", "39"),
    ("Kyrgyzstan", "93"),
    ("Laos", "81"),
    ("Latvia", "60"),
    ("Lebanon", "85"),
    ("Lesotho", "139"),
    ("Libya", "114"),
    ("Lithuania", "61"),
    ("Luxembourg", "17"),
    ("Malaysia", "78"),
    ("Mauritius", "164"),
    ("Mexico", "37"),
    ("Moldova", "111"),
    ("Montenegro", "54"),
    ("Morocco", "38"),
    ("Mozambique", "145"),
    ("Namibia", "146"),
    ("Nepal", "107"),
    ("Netherlands", "9"),
    ("New Zealand", "28"),
    ("North Macedonia", "55"),
    ("Norway", "13"),
    ("Oman", "89"),
    ("Pakistan", "43"),
    ("Peru", "62"),
    ("Philippines", "84"),
    ("Poland", "51"),
    ("Portugal", "15"),
    ("Puerto Rico", "163"),
    ("Romania", "46"),
    ("Russia", "2"),
    ("Saudi Arabia", "87"),
    ("Serbia", "161"),
    ("Slovakia", "27"),
    ("Slovenia", "45"),
    ("South Africa", "42"),
    ("Spain", "11"),
    ("Sweden", "19"),
    ("Switzerland", "16"),
    ("Syria", "100"),
    ("Tajikistan", "92"),
    ("Thailand", "80"),
    ("Tunisia", "117"),
    ("Turkey", "21"),
    ("Ukraine", "112"),
    ("United Arab Emirates", "90"),
    ("United Kingdom", "1"),
    ("United States", "23"),
    ("Uruguay", "76"),
    ("Uzbekistan", "104"),
    ("Vietnam", "82"),
    ("Zimbabwe", "159"),
];

// =============================================================================
// Data Source Defaults
// =============================================================================

/// Per-country download endpoint; the numeric country code is appended
pub const DEFAULT_SOURCE_BASE_URL: &str = "https://www.bestbikingroads.com/dcountry.php?code=";

/// Base URL that relative route links are resolved against
pub const DEFAULT_ROUTE_LINK_BASE: &str = "https://www.bestbikingroads.com";

/// Extension of per-country data files
pub const COUNTRY_FILE_EXTENSION: &str = "json";

/// Directory name used under the user data directory
pub const APP_DIR_NAME: &str = "route-browser";

/// Default file name for GPX exports
pub const DEFAULT_EXPORT_FILE_NAME: &str = "filtered_routes.gpx";

/// Default GPX `creator` attribute
pub const DEFAULT_GPX_CREATOR: &str = "Best Biking Roads";

/// Road type bucket for records that carry no road type
pub const UNKNOWN_ROAD_TYPE: &str = "Unknown";

// =============================================================================
// Rating Domain
// =============================================================================

/// Lowest rating a route can have; also the value malformed ratings coerce to
pub const RATING_MIN: f64 = 1.0;

/// Highest rating a route can have; the interval ending here is closed
pub const RATING_MAX: f64 = 5.0;

/// Granularity of committed rating interval bounds
pub const RATING_STEP: f64 = 0.1;

// =============================================================================
// Display
// =============================================================================

/// Kilometres to statute miles
pub const KM_TO_MILES: f64 = 0.621371;

/// Precision used when decoding route polylines
pub const POLYLINE_PRECISION: u32 = 5;

/// Initial camera centre (latitude, longitude) and zoom before any refit
pub const DEFAULT_CAMERA_CENTER: (f64, f64) = (20.0, 0.0);
pub const DEFAULT_CAMERA_ZOOM: u8 = 2;

/// Overlay stroke styling keyed by rating
pub mod overlay_style {
    /// Minimum rating for each colour band, highest first
    pub const RATING_BANDS: &[(f64, &str)] = &[
        (4.3, "#FF0000"), // red
        (3.3, "#0000FF"), // blue
        (2.3, "#660033"), // dark red
    ];

    /// Colour for routes below every band
    pub const DEFAULT_COLOR: &str = "#484848";

    pub const STROKE_WEIGHT: u32 = 4;
    pub const STROKE_OPACITY: f64 = 0.7;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_country_catalogue_is_unique() {
        let names: HashSet<_> = COUNTRIES.iter().map(|(name, _)| *name).collect();
        let codes: HashSet<_> = COUNTRIES.iter().map(|(_, code)| *code).collect();
        assert_eq!(names.len(), COUNTRIES.len());
        assert_eq!(codes.len(), COUNTRIES.len());
    }

    #[test]
    fn test_rating_bands_descend() {
        let thresholds: Vec<f64> = overlay_style::RATING_BANDS.iter().map(|(t, _)| *t).collect();
        assert!(thresholds.windows(2).all(|w| w[0] > w[1]));
        assert!(thresholds.iter().all(|t| (RATING_MIN..=RATING_MAX).contains(t)));
    }
}
