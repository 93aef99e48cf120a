//! Fetch command: download country route files
//!
//! Every requested country whose file is missing or empty is downloaded and
//! saved as `<out>/<Country>.json`. A failed country is logged and the others
//! carry on.

use super::shared::{CommandStats, format_duration, load_configuration, setup_logging};
use crate::app::adapters::data_source::{DirectorySource, HttpSource};
use crate::app::models::Country;
use crate::cli::args::{Args, FetchArgs};
use crate::config::Config;
use crate::{Error, Result};
use colored::Colorize;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// What happened to one country
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Downloaded { bytes: usize },
    Skipped,
    Failed(String),
}

/// Whether a country file is already present and non-empty
pub async fn already_fetched(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file() && meta.len() > 0)
        .unwrap_or(false)
}

/// Download one country unless it is already present
pub async fn fetch_country(
    source: &HttpSource,
    target: &DirectorySource,
    country: &Country,
) -> FetchOutcome {
    let path = target.country_file(country);
    if already_fetched(&path).await {
        debug!("{} already present, skipping", path.display());
        return FetchOutcome::Skipped;
    }

    let result = async {
        let bytes = source.download_raw(country).await?;
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;
        Ok::<usize, Error>(bytes.len())
    }
    .await;

    match result {
        Ok(bytes) => {
            info!("Saved {} ({} bytes)", path.display(), bytes);
            FetchOutcome::Downloaded { bytes }
        }
        Err(e) => {
            warn!("Failed to fetch {}: {}", country.name, e);
            FetchOutcome::Failed(e.to_string())
        }
    }
}

/// Apply `--out` and `--base-url` on top of the loaded configuration
pub fn apply_overrides(mut config: Config, fetch: &FetchArgs) -> Result<Config> {
    if let Some(out_dir) = &fetch.out_dir {
        config = config.with_data_dir(out_dir);
    }
    if let Some(base_url) = &fetch.base_url {
        config = config.with_source_base_url(base_url);
    }
    config.validate()?;
    Ok(config)
}

/// Fetch command runner
pub async fn run_fetch(args: &Args, fetch: FetchArgs) -> Result<CommandStats> {
    let start_time = Instant::now();
    let config = apply_overrides(load_configuration(args)?, &fetch)?;

    let out_dir = config.data_dir.clone();
    tokio::fs::create_dir_all(&out_dir)
        .await
        .map_err(|e| Error::io(format!("Failed to create {}", out_dir.display()), e))?;

    let source = HttpSource::new(config.source_base_url.clone());
    let target = DirectorySource::new(&out_dir);

    let countries = fetch
        .countries
        .map(|list| list.countries)
        .unwrap_or_else(Country::catalogue);

    info!(
        "Fetching {} countries into {}",
        countries.len(),
        out_dir.display()
    );

    let progress_bar = args.show_progress().then(|| {
        let pb = ProgressBar::new(countries.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    });

    let mut outcomes = stream::iter(&countries)
        .map(|country| {
            let source = &source;
            let target = &target;
            async move { (country, fetch_country(source, target, country).await) }
        })
        .buffer_unordered(config.max_concurrent_loads);

    let mut stats = CommandStats::default();
    let mut failures = Vec::new();
    while let Some((country, outcome)) = outcomes.next().await {
        if let Some(pb) = &progress_bar {
            pb.inc(1);
            pb.set_message(country.name.clone());
        }
        match outcome {
            FetchOutcome::Downloaded { .. } => stats.countries_processed += 1,
            FetchOutcome::Skipped => stats.countries_skipped += 1,
            FetchOutcome::Failed(reason) => {
                stats.errors_encountered += 1;
                failures.push((country.name.clone(), reason));
            }
        }
    }

    if let Some(pb) = &progress_bar {
        pb.finish_and_clear();
    }

    stats.processing_time = start_time.elapsed();

    if !args.quiet {
        println!("\n{}", "Fetch Complete".green().bold());
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("   • Downloaded: {}", stats.countries_processed);
        println!("   • Already present: {}", stats.countries_skipped);
        println!("   • Failed: {}", stats.errors_encountered);
        println!("   • Time: {}", format_duration(stats.processing_time));
        for (name, reason) in &failures {
            println!("   {} {}: {}", "!".yellow(), name, reason);
        }
        println!();
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_configuration() {
        let fetch = FetchArgs {
            out_dir: Some(PathBuf::from("/srv/routes")),
            base_url: Some("http://mirror.local/d?code=".to_string()),
            countries: None,
        };

        let config = apply_overrides(Config::default(), &fetch).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/routes"));
        assert_eq!(config.source_base_url, "http://mirror.local/d?code=");

        let untouched = apply_overrides(Config::default(), &FetchArgs::default()).unwrap();
        assert_eq!(untouched, Config::default());
    }

    #[test]
    fn test_blank_base_url_is_rejected() {
        let fetch = FetchArgs {
            base_url: Some("  ".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            apply_overrides(Config::default(), &fetch),
            Err(Error::Configuration { .. })
        ));
    }

    #[tokio::test]
    async fn test_non_empty_file_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("France.json"), "[]").unwrap();

        // Unroutable base URL: a download attempt would fail
        let source = HttpSource::new("http://127.0.0.1:9/?code=");
        let target = DirectorySource::new(temp_dir.path());

        let outcome = fetch_country(&source, &target, &Country::new("France", "6")).await;
        assert_eq!(outcome, FetchOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_empty_file_is_not_considered_fetched() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Italy.json");
        std::fs::write(&path, "").unwrap();

        assert!(!already_fetched(&path).await);
        assert!(!already_fetched(&temp_dir.path().join("Spain.json")).await);
    }

    #[tokio::test]
    async fn test_failed_download_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let source = HttpSource::new("http://127.0.0.1:9/?code=");
        let target = DirectorySource::new(temp_dir.path());

        let outcome = fetch_country(&source, &target, &Country::new("Italy", "4")).await;
        assert!(matches!(outcome, FetchOutcome::Failed(_)));
        assert!(!temp_dir.path().join("Italy.json").exists());
    }
}
