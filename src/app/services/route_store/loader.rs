//! Concurrent per-country loading
//!
//! One fetch is issued per country; completions are applied to the store one
//! at a time as they arrive, in whatever order the source finishes them.

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;
use tracing::{info, warn};

use super::RouteStore;
use super::metadata::{CountryBuild, LoadStats};
use crate::Result;
use crate::app::adapters::data_source::DataSource;
use crate::app::models::{Country, RawRouteRecord};
use crate::app::services::overlay_sync::OverlayRegistry;

impl RouteStore {
    /// Load every given country from `source` into the store
    ///
    /// Up to `max_concurrent` fetches run at once. A failed country is logged,
    /// recorded in the returned statistics and left absent from the store; it
    /// never stops the other countries from loading.
    ///
    /// # Arguments
    /// * `source` - Where country records come from
    /// * `countries` - Countries to load
    /// * `overlays` - Registry receiving one overlay per inserted route
    /// * `max_concurrent` - Fetch concurrency limit
    /// * `show_progress` - Whether to display a progress bar
    pub async fn load_all<S: DataSource>(
        &mut self,
        source: &S,
        countries: &[Country],
        overlays: &mut OverlayRegistry,
        max_concurrent: usize,
        show_progress: bool,
    ) -> LoadStats {
        info!(
            "Loading {} countries from {}",
            countries.len(),
            source.describe()
        );

        let start_time = Instant::now();
        let mut stats = LoadStats::new();
        stats.countries_requested = countries.len();

        let progress_bar = show_progress.then(|| {
            let pb = ProgressBar::new(countries.len() as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            pb.set_message("Loading countries...");
            pb
        });

        let mut completions = stream::iter(countries)
            .map(|country| async move { (country, source.fetch_country(country).await) })
            .buffer_unordered(max_concurrent.max(1));

        while let Some((country, result)) = completions.next().await {
            if let Some(pb) = &progress_bar {
                pb.inc(1);
                pb.set_message(format!("Loaded {}", country.name));
            }
            self.apply_country_result(country, result, overlays, &mut stats);
        }

        if let Some(pb) = &progress_bar {
            pb.finish_with_message("Country loading complete");
        }

        stats.load_duration = start_time.elapsed();
        info!("{}", stats.summary());

        stats
    }

    /// Apply one country's fetch result, recording the outcome in `stats`
    ///
    /// This is the load boundary: fetch errors end here as a warning and a
    /// statistics entry.
    pub fn apply_country_result(
        &mut self,
        country: &Country,
        result: Result<Vec<RawRouteRecord>>,
        overlays: &mut OverlayRegistry,
        stats: &mut LoadStats,
    ) -> Option<CountryBuild> {
        match result {
            Ok(records) => {
                let build = self.build_country(country, &records, overlays);
                info!(
                    "Loaded {}: {} routes from {} records",
                    country.name,
                    build.routes_loaded,
                    records.len()
                );
                stats.record_build(&build);
                Some(build)
            }
            Err(e) => {
                warn!("Failed to load {}: {}", country.name, e);
                stats.record_failure(&country.name, &e);
                None
            }
        }
    }
}
