//! Application session: one owner for all browsing state
//!
//! The session owns the route store, overlay registry, filter state, the
//! current visible set and the map surface. Every filter mutation goes through
//! [`Session::dispatch`], which runs the apply-then-reconcile pipeline exactly
//! once. [`run_event_loop`] feeds a session from a channel one event at a
//! time, so concurrent triggers are queued rather than interleaved.

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::app::adapters::data_source::DataSource;
use crate::app::models::{Country, RawRouteRecord, Route};
use crate::app::services::filter_engine::{self, ChangeKind, FilterCommand, FilterState, VisibleSet};
use crate::app::services::gpx_export;
use crate::app::services::overlay_sync::{self, MapSurface, OverlayRegistry, Region};
use crate::app::services::route_store::{LoadStats, RouteStore};
use crate::config::Config;
use crate::{Error, Result};

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// No filter dimension changed; nothing was recomputed or touched
    Skipped,

    /// The visible set was recomputed and the surface reconciled
    Rendered {
        changes: ChangeKind,
        added: Vec<String>,
        removed: Vec<String>,
        refit: Option<Region>,
    },
}

impl PipelineOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, PipelineOutcome::Skipped)
    }
}

/// Browsing state plus the map surface it drives
#[derive(Debug)]
pub struct Session<M: MapSurface> {
    store: RouteStore,
    overlays: OverlayRegistry,
    filters: FilterState,
    visible: VisibleSet,
    map: M,
    load_stats: LoadStats,
    gpx_creator: String,
    max_concurrent_loads: usize,
}

impl<M: MapSurface> Session<M> {
    /// Empty session: no routes, nothing selected, full rating interval
    pub fn new(config: &Config, map: M) -> Self {
        Self {
            store: RouteStore::new(),
            overlays: OverlayRegistry::new(config.route_link_base.clone()),
            filters: FilterState::new(),
            visible: VisibleSet::default(),
            map,
            load_stats: LoadStats::new(),
            gpx_creator: config.gpx_creator.clone(),
            max_concurrent_loads: config.max_concurrent_loads,
        }
    }

    /// Load countries from a source directly, without going through events
    ///
    /// Does not run the pipeline; call [`Session::finish_loading`] afterwards.
    pub async fn load_from<S: DataSource>(
        &mut self,
        source: &S,
        countries: &[Country],
        show_progress: bool,
    ) -> &LoadStats {
        let stats = self
            .store
            .load_all(
                source,
                countries,
                &mut self.overlays,
                self.max_concurrent_loads,
                show_progress,
            )
            .await;
        self.load_stats.merge(&stats);
        &self.load_stats
    }

    /// Apply one country's load completion
    pub fn country_loaded(&mut self, country: &Country, result: Result<Vec<RawRouteRecord>>) {
        self.load_stats.countries_requested += 1;
        self.store
            .apply_country_result(country, result, &mut self.overlays, &mut self.load_stats);
    }

    /// Select every known road type and run the pipeline
    pub fn finish_loading(&mut self) -> Result<PipelineOutcome> {
        let road_types = self.store.known_road_types().map(str::to_string).collect();
        info!(
            "Loading finished: {} routes in {} countries",
            self.store.route_count(),
            self.store.country_count()
        );
        self.dispatch(FilterCommand::SetRoadTypes(road_types))
    }

    /// Apply one filter mutation and run the pipeline once
    ///
    /// # Errors
    /// * `Error::InvalidRatingInterval` if the command carries a bad interval;
    ///   nothing is changed in that case
    /// * `Error::UnregisteredOverlay` if the store and registry disagree
    pub fn dispatch(&mut self, command: FilterCommand) -> Result<PipelineOutcome> {
        debug!("Dispatching {:?}", command);
        self.filters.apply_command(command)?;
        self.run_pipeline()
    }

    fn run_pipeline(&mut self) -> Result<PipelineOutcome> {
        let Some(outcome) = filter_engine::apply(&self.store, &mut self.filters) else {
            return Ok(PipelineOutcome::Skipped);
        };

        let refit = outcome.countries_changed();
        let report =
            overlay_sync::reconcile(&outcome.visible, &self.overlays, &mut self.map, refit)?;
        self.visible = outcome.visible;

        info!(
            "Pipeline ran for {}: {} routes visible",
            outcome.changes,
            self.visible.route_count()
        );

        Ok(PipelineOutcome::Rendered {
            changes: outcome.changes,
            added: report.added,
            removed: report.removed,
            refit: report.camera,
        })
    }

    /// Render the visible routes as GPX
    ///
    /// # Errors
    /// * `Error::NothingToExport` if nothing is visible
    pub fn export_gpx(&self) -> Result<String> {
        gpx_export::export_gpx(self.visible_routes(), &self.gpx_creator)
    }

    /// Visible routes in country, road type, then rating order
    pub fn visible_routes(&self) -> Vec<&Route> {
        self.visible.routes().map(Arc::as_ref).collect()
    }

    pub fn store(&self) -> &RouteStore {
        &self.store
    }

    pub fn overlays(&self) -> &OverlayRegistry {
        &self.overlays
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn visible(&self) -> &VisibleSet {
        &self.visible
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn load_stats(&self) -> &LoadStats {
        &self.load_stats
    }

    /// Handle one event; returns the pipeline outcome if the pipeline ran
    pub fn handle_event(&mut self, event: SessionEvent) -> Result<Option<PipelineOutcome>> {
        match event {
            SessionEvent::CountryLoaded { country, result } => {
                self.country_loaded(&country, result);
                Ok(None)
            }
            SessionEvent::LoadingFinished => self.finish_loading().map(Some),
            SessionEvent::Filter(command) => self.dispatch(command).map(Some),
            SessionEvent::Export { reply } => {
                if reply.send(self.export_gpx()).is_err() {
                    debug!("Export requester went away");
                }
                Ok(None)
            }
        }
    }
}

// =============================================================================
// Event loop
// =============================================================================

/// Something that mutates or reads the session
#[derive(Debug)]
pub enum SessionEvent {
    /// A country's fetch completed
    CountryLoaded {
        country: Country,
        result: Result<Vec<RawRouteRecord>>,
    },

    /// Every issued fetch has completed
    LoadingFinished,

    /// A committed filter mutation
    Filter(FilterCommand),

    /// Export the visible set as GPX
    Export {
        reply: oneshot::Sender<Result<String>>,
    },
}

/// Process events one at a time until every sender is dropped
///
/// Rejected filter commands are logged and skipped. An overlay invariant
/// violation stops the loop.
pub async fn run_event_loop<M: MapSurface>(
    mut session: Session<M>,
    mut events: mpsc::Receiver<SessionEvent>,
) -> Result<Session<M>> {
    while let Some(event) = events.recv().await {
        match session.handle_event(event) {
            Ok(_) => {}
            Err(e @ Error::InvalidRatingInterval { .. }) => {
                warn!("Rejected filter command: {}", e);
            }
            Err(e) => return Err(e),
        }
    }
    debug!("Event channel closed, stopping session loop");
    Ok(session)
}

/// Fetch countries concurrently, posting each completion as an event
///
/// Sends [`SessionEvent::LoadingFinished`] once every fetch has completed.
pub fn spawn_loads<S>(
    source: Arc<S>,
    countries: Vec<Country>,
    max_concurrent: usize,
    events: mpsc::Sender<SessionEvent>,
) -> JoinHandle<()>
where
    S: DataSource + 'static,
{
    tokio::spawn(async move {
        let mut completions = stream::iter(countries)
            .map(|country| {
                let source = Arc::clone(&source);
                async move {
                    let result = source.fetch_country(&country).await;
                    (country, result)
                }
            })
            .buffer_unordered(max_concurrent.max(1));

        while let Some((country, result)) = completions.next().await {
            if events
                .send(SessionEvent::CountryLoaded { country, result })
                .await
                .is_err()
            {
                warn!("Session loop stopped before loading finished");
                return;
            }
        }

        if events.send(SessionEvent::LoadingFinished).await.is_err() {
            warn!("Session loop stopped before loading finished");
        }
    })
}
