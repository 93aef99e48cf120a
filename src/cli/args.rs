//! Command-line argument definitions for the route browser
//!
//! This module defines the CLI interface using the clap derive API: a `fetch`
//! command that downloads country files, and `browse`/`export` commands that
//! load them, apply filters and report or export the visible routes.

use crate::app::models::Country;
use crate::app::services::filter_engine::{FilterCommand, RatingInterval};
use crate::constants::{COUNTRIES, RATING_MAX, RATING_MIN};
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the route browser
///
/// Browses road-trip routes grouped by country and road type, filters them by
/// country, road type and rating, and exports the result as GPX.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "route-browser",
    version,
    about = "Browse, filter and export country road-trip routes",
    long_about = "Downloads per-country route files, indexes routes by country and road type \
                  sorted by rating, applies country, road type and rating filters, and exports \
                  the matching routes as a GPX 1.1 track file."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Download country route files that are not cached yet
    Fetch(FetchArgs),
    /// Load routes, apply filters and report the visible set
    Browse(BrowseArgs),
    /// Load routes, apply filters and write the visible set as GPX
    Export(ExportArgs),
}

/// Arguments for the fetch command
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct FetchArgs {
    /// Directory receiving `<Country>.json` files
    #[arg(
        short = 'o',
        long = "out",
        value_name = "DIR",
        help = "Directory receiving country files (defaults to the configured data directory)"
    )]
    pub out_dir: Option<PathBuf>,

    /// Download URL prefix; the country code is appended
    #[arg(long = "base-url", value_name = "URL", help = "Download URL prefix")]
    pub base_url: Option<String>,

    /// Countries to fetch (comma-separated), all by default
    #[arg(long = "countries", value_name = "LIST", help = "Comma-separated list of countries to fetch")]
    pub countries: Option<CountryList>,
}

/// Filter flags shared by browse and export
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct FilterArgs {
    /// Directory holding `<Country>.json` files
    #[arg(
        short = 'd',
        long = "data",
        value_name = "DIR",
        help = "Directory holding country files (defaults to the configured data directory)"
    )]
    pub data_dir: Option<PathBuf>,

    /// Countries to select (comma-separated)
    ///
    /// Nothing is shown when no country is selected.
    #[arg(long = "countries", value_name = "LIST", help = "Comma-separated list of countries to select")]
    pub countries: Option<CountryList>,

    /// Road types to select (comma-separated), all known road types by default
    #[arg(long = "road-types", value_name = "LIST", help = "Comma-separated list of road types to select")]
    pub road_types: Option<String>,

    /// Lower rating bound (inclusive)
    #[arg(long = "min-rating", value_name = "R", help = "Lower rating bound, inclusive")]
    pub min_rating: Option<f64>,

    /// Upper rating bound (exclusive, inclusive at the top of the scale)
    #[arg(long = "max-rating", value_name = "R", help = "Upper rating bound")]
    pub max_rating: Option<f64>,
}

/// Arguments for the browse command
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct BrowseArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// List individual routes, not just per-bucket counts
    #[arg(long = "detailed", help = "List individual routes")]
    pub detailed: bool,

    /// Output format for the report
    #[arg(long = "format", value_enum, default_value = "human", help = "Output format for the report")]
    pub output_format: OutputFormat,
}

/// Arguments for the export command
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// GPX file to write
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "GPX file to write (defaults to filtered_routes.gpx)"
    )]
    pub output: Option<PathBuf>,
}

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON format for scripting
    Json,
}

/// Wrapper for parsing comma-separated catalogue country lists
#[derive(Debug, Clone, PartialEq)]
pub struct CountryList {
    pub countries: Vec<Country>,
}

impl FromStr for CountryList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let names: Vec<&str> = s
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect();

        if names.is_empty() {
            return Err(Error::configuration("Country list cannot be empty"));
        }

        let countries = names
            .into_iter()
            .map(|name| {
                Country::find(name).ok_or_else(|| {
                    Error::configuration(format!(
                        "Unknown country '{}'. {} countries are available, e.g. {}",
                        name,
                        COUNTRIES.len(),
                        COUNTRIES
                            .iter()
                            .take(5)
                            .map(|(name, _)| *name)
                            .collect::<Vec<_>>()
                            .join(", ")
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CountryList { countries })
    }
}

impl Args {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl FilterArgs {
    /// Validate the filter flags for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(data_dir) = &self.data_dir {
            if !data_dir.is_dir() {
                return Err(Error::configuration(format!(
                    "Data directory does not exist: {}",
                    data_dir.display()
                )));
            }
        }

        if self.min_rating.is_some() || self.max_rating.is_some() {
            let (low, high) = self.rating_bounds();
            RatingInterval::new(low, high)?;
        }

        Ok(())
    }

    /// Rating bounds, defaulting each missing side to the end of the scale
    pub fn rating_bounds(&self) -> (f64, f64) {
        (
            self.min_rating.unwrap_or(RATING_MIN),
            self.max_rating.unwrap_or(RATING_MAX),
        )
    }

    /// Selected country names
    pub fn country_names(&self) -> Vec<String> {
        self.countries
            .as_ref()
            .map(|list| list.countries.iter().map(|c| c.name.clone()).collect())
            .unwrap_or_default()
    }

    /// Selected road types, `None` meaning every known road type
    pub fn road_type_names(&self) -> Option<Vec<String>> {
        self.road_types.as_ref().map(|list| {
            list.split(',')
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect()
        })
    }

    /// Filter commands to dispatch after loading has finished
    pub fn commands(&self) -> Vec<FilterCommand> {
        let mut commands = Vec::new();
        if let Some(road_types) = self.road_type_names() {
            commands.push(FilterCommand::SetRoadTypes(road_types));
        }
        if self.min_rating.is_some() || self.max_rating.is_some() {
            let (low, high) = self.rating_bounds();
            commands.push(FilterCommand::SetRatingInterval { low, high });
        }
        commands.push(FilterCommand::SetCountries(self.country_names()));
        commands
    }
}

impl ExportArgs {
    pub fn validate(&self) -> Result<()> {
        self.filters.validate()?;

        if let Some(output) = &self.output {
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                if !parent.exists() {
                    return Err(Error::configuration(format!(
                        "Output file directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_list_parsing() {
        let list: CountryList = "France, Italy ,".parse().unwrap();
        let names: Vec<&str> = list.countries.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["France", "Italy"]);
        assert_eq!(list.countries[0].code, "6");
    }

    #[test]
    fn test_country_list_rejects_unknown_and_empty() {
        assert!("Atlantis".parse::<CountryList>().is_err());
        assert!(" , ".parse::<CountryList>().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = Args::parse_from(["route-browser", "browse"]);
        assert_eq!(args.get_log_level(), "warn");

        args.verbose = 2;
        assert_eq!(args.get_log_level(), "debug");

        args.quiet = true;
        assert_eq!(args.get_log_level(), "error");
        assert!(!args.show_progress());
    }

    #[test]
    fn test_browse_parsing() {
        let args = Args::parse_from([
            "route-browser",
            "-v",
            "browse",
            "--countries",
            "France,Italy",
            "--road-types",
            "Mountain",
            "--min-rating",
            "3.5",
            "--format",
            "json",
        ]);

        assert_eq!(args.verbose, 1);
        let Some(Commands::Browse(browse)) = args.command else {
            panic!("expected browse command");
        };
        assert_eq!(browse.output_format, OutputFormat::Json);
        assert_eq!(browse.filters.rating_bounds(), (3.5, 5.0));
        assert_eq!(
            browse.filters.road_type_names(),
            Some(vec!["Mountain".to_string()])
        );
    }

    #[test]
    fn test_filter_commands_order() {
        let filters = FilterArgs {
            countries: Some("France".parse().unwrap()),
            max_rating: Some(4.0),
            ..Default::default()
        };

        let commands = filters.commands();
        assert_eq!(
            commands,
            vec![
                FilterCommand::SetRatingInterval {
                    low: 1.0,
                    high: 4.0
                },
                FilterCommand::SetCountries(vec!["France".to_string()]),
            ]
        );
    }

    #[test]
    fn test_filter_validation_rejects_inverted_rating() {
        let filters = FilterArgs {
            min_rating: Some(4.0),
            max_rating: Some(2.0),
            ..Default::default()
        };
        assert!(matches!(
            filters.validate(),
            Err(Error::InvalidRatingInterval { .. })
        ));
    }

    #[test]
    fn test_missing_command_is_allowed() {
        let args = Args::parse_from(["route-browser"]);
        assert!(args.command.is_none());
    }
}
