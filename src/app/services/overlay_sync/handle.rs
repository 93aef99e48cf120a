//! Overlay handles and their user-facing behaviour

use geo::{BoundingRect, Coord, LineString};
use serde::Serialize;

use super::Region;
use crate::app::models::Route;
use crate::constants::overlay_style::{
    DEFAULT_COLOR, RATING_BANDS, STROKE_OPACITY, STROKE_WEIGHT,
};

/// Stroke styling of a route overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayStyle {
    pub color: String,
    pub weight: u32,
    pub opacity: f64,
}

impl OverlayStyle {
    /// Style for a route of the given rating
    pub fn for_rating(rating: f64) -> Self {
        let color = RATING_BANDS
            .iter()
            .find(|(threshold, _)| rating >= *threshold)
            .map(|(_, color)| *color)
            .unwrap_or(DEFAULT_COLOR);

        Self {
            color: color.to_string(),
            weight: STROKE_WEIGHT,
            opacity: STROKE_OPACITY,
        }
    }
}

/// Summary panel content shown when an overlay is clicked
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub title: String,
    pub length_km: f64,
    pub length_miles: f64,
    pub road_type: String,
    pub rating: f64,
    pub comments_count: u64,
    pub link: String,
}

impl RouteSummary {
    pub fn for_route(route: &Route, link: &str) -> Self {
        Self {
            title: route.title.clone(),
            length_km: route.length_km,
            length_miles: route.length_miles(),
            road_type: route.road_type_name.clone(),
            rating: route.rating,
            comments_count: route.comments_count,
            link: link.to_string(),
        }
    }

    /// Plain-text rendering of the panel
    pub fn render(&self) -> String {
        format!(
            "{} <{}>\nLength: {} km / {:.2} miles\nType: {}\nRating: {} ({})",
            self.title,
            self.link,
            self.length_km,
            self.length_miles,
            self.road_type,
            self.rating,
            self.comments_count
        )
    }
}

/// A route's graphical representation, created once per route
#[derive(Debug, Clone)]
pub struct OverlayHandle {
    route_id: String,
    line: LineString<f64>,
    style: OverlayStyle,
    summary: RouteSummary,
    link: String,
}

impl OverlayHandle {
    pub fn for_route(route: &Route, link_base: &str) -> Self {
        let link = resolve_link(link_base, &route.source_url);
        let line = route
            .geometry
            .iter()
            .map(|point| Coord {
                x: point.lon,
                y: point.lat,
            })
            .collect::<LineString<f64>>();

        Self {
            route_id: route.id.clone(),
            line,
            style: OverlayStyle::for_rating(route.rating),
            summary: RouteSummary::for_route(route, &link),
            link,
        }
    }

    pub fn route_id(&self) -> &str {
        &self.route_id
    }

    pub fn line(&self) -> &LineString<f64> {
        &self.line
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    pub fn bounding_region(&self) -> Option<Region> {
        self.line.bounding_rect()
    }

    /// Single click opens the summary panel
    pub fn on_click(&self) -> &RouteSummary {
        &self.summary
    }

    /// Double click navigates to the route's external page
    pub fn on_double_click(&self) -> &str {
        &self.link
    }
}

/// Resolve a route path against the link base; absolute URLs pass through
fn resolve_link(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_bands() {
        assert_eq!(OverlayStyle::for_rating(5.0).color, "#FF0000");
        assert_eq!(OverlayStyle::for_rating(4.3).color, "#FF0000");
        assert_eq!(OverlayStyle::for_rating(4.29).color, "#0000FF");
        assert_eq!(OverlayStyle::for_rating(2.3).color, "#660033");
        assert_eq!(OverlayStyle::for_rating(1.0).color, "#484848");
    }

    #[test]
    fn test_resolve_link() {
        assert_eq!(
            resolve_link("https://example.org/", "/france/col"),
            "https://example.org/france/col"
        );
        assert_eq!(
            resolve_link("https://example.org", "https://other.org/x"),
            "https://other.org/x"
        );
    }
}
