//! Browse command: report the routes passing the filters
//!
//! Loads every available country, applies the filter flags through the
//! session pipeline and prints the visible set grouped by country and road
//! type, together with the camera region and load summary.

use super::shared::{CommandStats, build_session, session_stats};
use crate::app::adapters::headless_map::{Camera, HeadlessMap};
use crate::app::services::session::Session;
use crate::cli::args::{Args, BrowseArgs, OutputFormat};
use crate::config::Config;
use crate::{Error, Result};
use colored::Colorize;
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Serialize)]
pub struct BrowseReport {
    pub filters: FilterSummary,
    pub countries: Vec<CountryReport>,
    pub visible_routes: usize,
    pub camera: CameraReport,
    pub load: LoadSummary,
}

#[derive(Debug, Serialize)]
pub struct FilterSummary {
    pub countries: Vec<String>,
    pub road_types: Vec<String>,
    pub rating_low: f64,
    pub rating_high: f64,
}

#[derive(Debug, Serialize)]
pub struct CountryReport {
    pub name: String,
    pub road_types: Vec<RoadTypeReport>,
}

#[derive(Debug, Serialize)]
pub struct RoadTypeReport {
    pub name: String,
    pub count: usize,
    pub routes: Vec<RouteLine>,
}

#[derive(Debug, Serialize)]
pub struct RouteLine {
    pub id: String,
    pub title: String,
    pub rating: f64,
    pub length_km: f64,
    pub color: String,
    pub link: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CameraReport {
    World { lat: f64, lon: f64, zoom: u8 },
    Fitted { min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64 },
}

#[derive(Debug, Serialize)]
pub struct LoadSummary {
    pub countries_loaded: usize,
    pub countries_failed: usize,
    pub routes_loaded: usize,
    pub records_skipped: usize,
    pub errors: Vec<String>,
}

impl BrowseReport {
    /// Snapshot a session into a report
    pub fn from_session(session: &Session<HeadlessMap>, detailed: bool) -> Self {
        let visible = session.visible();
        let current = session.filters().current();

        let countries = visible
            .country_names()
            .map(|country| CountryReport {
                name: country.to_string(),
                road_types: visible
                    .road_types_for(country)
                    .map(|road_type| {
                        let bucket = visible.bucket(country, road_type).unwrap_or_default();
                        RoadTypeReport {
                            name: road_type.to_string(),
                            count: bucket.len(),
                            routes: if detailed {
                                bucket
                                    .iter()
                                    .map(|route| route_line(session, route))
                                    .collect()
                            } else {
                                Vec::new()
                            },
                        }
                    })
                    .collect(),
            })
            .collect();

        let camera = match session.map().camera() {
            Camera::CenterZoom { lat, lon, zoom } => CameraReport::World { lat, lon, zoom },
            Camera::Fitted(region) => CameraReport::Fitted {
                min_lat: region.min().y,
                min_lon: region.min().x,
                max_lat: region.max().y,
                max_lon: region.max().x,
            },
        };

        let load = session.load_stats();
        Self {
            filters: FilterSummary {
                countries: current.countries.iter().cloned().collect(),
                road_types: current.road_types.iter().cloned().collect(),
                rating_low: current.rating.low(),
                rating_high: current.rating.high(),
            },
            countries,
            visible_routes: visible.route_count(),
            camera,
            load: LoadSummary {
                countries_loaded: load.countries_loaded,
                countries_failed: load.countries_failed,
                routes_loaded: load.routes_loaded,
                records_skipped: load.records_skipped,
                errors: load.errors.clone(),
            },
        }
    }
}

fn route_line(session: &Session<HeadlessMap>, route: &crate::Route) -> RouteLine {
    let overlay = session.overlays().get(&route.id);
    RouteLine {
        id: route.id.clone(),
        title: route.title.clone(),
        rating: route.rating,
        length_km: route.length_km,
        color: overlay
            .map(|handle| handle.style().color.clone())
            .unwrap_or_default(),
        link: overlay
            .map(|handle| handle.on_double_click().to_string())
            .unwrap_or_default(),
    }
}

/// Browse command runner
pub async fn run_browse(args: &Args, browse: BrowseArgs, config: &Config) -> Result<CommandStats> {
    debug!("Browse arguments: {:?}", browse);

    let session = build_session(config, &browse.filters, args.show_progress()).await?;
    let report = BrowseReport::from_session(&session, browse.detailed);
    info!("{} routes visible", report.visible_routes);

    match browse.output_format {
        OutputFormat::Human => print_human_report(&report),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| Error::json("Failed to serialize browse report", e))?;
            println!("{}", json);
        }
    }

    Ok(session_stats(&session))
}

fn print_human_report(report: &BrowseReport) {
    println!("\n{}", "Route Browser".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "Filters: countries [{}], road types [{}], rating [{:.1}, {:.1}]",
        report.filters.countries.join(", "),
        report.filters.road_types.join(", "),
        report.filters.rating_low,
        report.filters.rating_high
    );

    if report.countries.is_empty() {
        println!("\n{}", "No routes match the current filters".yellow());
    }

    for country in &report.countries {
        println!("\n{}", country.name.bold());
        for road_type in &country.road_types {
            println!("   • {}: {} routes", road_type.name, road_type.count);
            for route in &road_type.routes {
                println!(
                    "       {:.1}  {} ({} km)  {}",
                    route.rating,
                    route.title,
                    route.length_km,
                    route.link.dimmed()
                );
            }
        }
    }

    println!("\nVisible routes: {}", report.visible_routes);
    match &report.camera {
        CameraReport::World { lat, lon, zoom } => {
            println!("Camera: world view at ({}, {}) zoom {}", lat, lon, zoom)
        }
        CameraReport::Fitted {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        } => println!(
            "Camera: fitted to ({:.4}, {:.4}) - ({:.4}, {:.4})",
            min_lat, min_lon, max_lat, max_lon
        ),
    }

    println!(
        "Loaded {} countries, {} routes ({} records skipped)",
        report.load.countries_loaded, report.load.routes_loaded, report.load.records_skipped
    );
    if report.load.countries_failed > 0 {
        println!(
            "{} {} countries failed to load",
            "⚠".yellow(),
            report.load.countries_failed
        );
        for error in &report.load.errors {
            println!("   • {}", error);
        }
    }
    println!();
}
