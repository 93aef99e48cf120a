//! Shared components for CLI commands
//!
//! This module contains the statistics type every command returns, logging
//! setup, configuration loading and session construction used by the browse
//! and export commands.

use crate::app::adapters::data_source::DirectorySource;
use crate::app::adapters::headless_map::HeadlessMap;
use crate::app::models::Country;
use crate::app::services::session::{PipelineOutcome, Session};
use crate::cli::args::{Args, FilterArgs};
use crate::config::Config;
use crate::{Error, Result};
use std::time::Duration;
use tracing::{debug, info};

/// Command statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct CommandStats {
    /// Number of countries loaded or downloaded
    pub countries_processed: usize,
    /// Number of countries skipped because they were already present
    pub countries_skipped: usize,
    /// Number of routes loaded into the store
    pub routes_loaded: usize,
    /// Number of routes passing the filters
    pub routes_visible: usize,
    /// Number of errors encountered
    pub errors_encountered: usize,
    /// Total processing time
    pub processing_time: Duration,
}

/// Set up structured logging
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("route_browser={}", log_level)));

    let installed = if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    installed.map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration from the file given on the command line, or defaults
pub fn load_configuration(args: &Args) -> Result<Config> {
    let config = match &args.config_file {
        Some(path) => {
            info!("Using config file: {}", path.display());
            Config::load(path)?
        }
        None => {
            info!("No config file given, using defaults");
            Config::default()
        }
    };

    config.validate()?;
    Ok(config)
}

/// Catalogue countries that have a file in the source directory
pub fn available_countries(source: &DirectorySource) -> Vec<Country> {
    Country::catalogue()
        .into_iter()
        .filter(|country| {
            let present = source.country_file(country).is_file();
            if !present {
                debug!("No data file for {}", country.name);
            }
            present
        })
        .collect()
}

/// Load every available country and apply the filter flags
///
/// Road types start as every known road type; the flags are then dispatched
/// one command at a time, each running the pipeline once.
pub async fn build_session(
    config: &Config,
    filters: &FilterArgs,
    show_progress: bool,
) -> Result<Session<HeadlessMap>> {
    filters.validate()?;

    let data_dir = filters
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data_dir.clone());
    let source = DirectorySource::new(&data_dir);

    let countries = available_countries(&source);
    if countries.is_empty() {
        return Err(Error::configuration(format!(
            "No country files found in {}; run `route-browser fetch` first",
            data_dir.display()
        )));
    }

    let mut session = Session::new(config, HeadlessMap::new());
    let stats = session.load_from(&source, &countries, show_progress).await;
    info!("{}", stats.summary());

    session.finish_loading()?;
    for command in filters.commands() {
        if let PipelineOutcome::Rendered { changes, .. } = session.dispatch(command)? {
            debug!("Applied filter change: {}", changes);
        }
    }

    Ok(session)
}

/// Fill command statistics from a loaded session
pub fn session_stats(session: &Session<HeadlessMap>) -> CommandStats {
    let load = session.load_stats();
    CommandStats {
        countries_processed: load.countries_loaded,
        countries_skipped: 0,
        routes_loaded: load.routes_loaded,
        routes_visible: session.visible().route_count(),
        errors_encountered: load.errors.len(),
        processing_time: load.load_duration,
    }
}

/// Format a duration in human-readable form
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 1.0 {
        format!("{}ms", duration.as_millis())
    } else if secs < 60.0 {
        format!("{:.2}s", secs)
    } else {
        format!("{}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_secs(75)), "1m 15s");
    }

    #[test]
    fn test_available_countries_only_lists_present_files() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("France.json"), "[]").unwrap();
        std::fs::write(temp_dir.path().join("Narnia.json"), "[]").unwrap();

        let countries = available_countries(&DirectorySource::new(temp_dir.path()));
        let names: Vec<&str> = countries.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["France"]);
    }

    #[tokio::test]
    async fn test_build_session_requires_country_files() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::default().with_data_dir(temp_dir.path());

        let result = build_session(&config, &FilterArgs::default(), false).await;
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_build_session_applies_filters() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("France.json"),
            r#"[
                {"title": "Col de Vars", "road_type_name": "Mountain", "rating": "4.5", "polyline": "_ibE_seK_seK_seK"},
                {"title": "Corniche", "road_type_name": "Coastal", "rating": 3.1, "polyline": "_ibE_seK"}
            ]"#,
        )
        .unwrap();

        let config = Config::default().with_data_dir(temp_dir.path());
        let filters = FilterArgs {
            countries: Some("France".parse().unwrap()),
            road_types: Some("Mountain".to_string()),
            ..Default::default()
        };

        let session = build_session(&config, &filters, false).await.unwrap();
        let stats = session_stats(&session);
        assert_eq!(stats.routes_loaded, 2);
        assert_eq!(stats.routes_visible, 1);
        assert_eq!(session.map().attached_ids(), vec!["6-Col-de-Vars"]);
    }
}
