//! The main entry point: an explicitly constructed observation model that
//! plans viewport queries, fetches and validates observation data, and
//! publishes the resulting station table, status and errors to subscribers.

use crate::error::HavaintoError;
use crate::observations::error::ObservationDataError;
use crate::observations::fetcher::ObservationFetcher;
use crate::observations::table::{build_station_table, StationTable};
use crate::polling::PollingController;
use crate::query::planner::{QueryPlan, QueryPlanner};
use crate::query::region::fmi_coverage;
use crate::store::store::{ObservationStore, StationObservations};
use crate::types::coordinates::{CoordinateBoundaries, CoordinateSpan, LatLon};
use crate::types::status::ModelStatus;
use bon::bon;
use log::info;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};

const DEFAULT_BASE_URL: &str = "https://ilmaproxy.herokuapp.com/1/observations";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(600);
const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

// Everything a query cycle needs; shared between the facade, the polling
// schedule and spawned cycles.
pub(crate) struct ModelCore {
    planner: QueryPlanner,
    fetcher: ObservationFetcher,
    store: ObservationStore,
}

impl ModelCore {
    /// Runs one full query cycle for `viewport`: plan, fetch, build the
    /// table, publish. Error policy is applied to the store before the
    /// error is handed back to the caller.
    pub(crate) async fn run_cycle(
        self: Arc<Self>,
        viewport: CoordinateBoundaries,
    ) -> Result<(), ObservationDataError> {
        let url = match self.planner.plan(viewport) {
            QueryPlan::OutsideRegion => {
                info!("Viewport is outside the supported region; skipping query");
                self.store.set_region_available(false);
                self.store.clear_table();
                return Ok(());
            }
            QueryPlan::Fetch { url } => url,
        };

        self.store.set_region_available(true);
        self.store.begin_query();
        let result = self.fetcher.fetch(&url).await;
        match &result {
            Ok(_) => {}
            Err(error) => {
                // Undecodable data counts as "no observations" and resets
                // the table; HTTP and transport failures keep the previous
                // data.
                if error.clears_table() {
                    self.store.clear_table();
                }
                if !error.is_silent() {
                    self.store.publish_error(error.detailed_message());
                }
            }
        }
        let outcome = result.map(|raw| {
            let table = build_station_table(raw);
            info!("Received observations for {} stations", table.len());
            self.store.replace_table(table);
        });
        self.store.finish_query();
        outcome
    }
}

/// A reactive model of recent weather observations for a map viewport.
///
/// The model owns all shared state; construct one instance and hand it to
/// whatever consumes it — there are no process-wide singletons. Feed it
/// viewport changes with [`set_viewport`](ObservationModel::set_viewport),
/// control background polling with [`resume`](ObservationModel::resume) and
/// [`pause`](ObservationModel::pause), and consume results through the
/// three subscription channels (table, status, errors) or per-station
/// [`station`](ObservationModel::station) handles.
///
/// Overlapping fetches caused by rapid viewport changes are not ordered:
/// the last fetch to *complete* wins, regardless of which viewport is
/// newer. At the 10-minute polling cadence this trades strict ordering for
/// simplicity.
///
/// # Examples
///
/// ```no_run
/// use havainto::{CoordinateSpan, LatLon, ObservationModel};
///
/// # async fn run() -> Result<(), havainto::HavaintoError> {
/// let model = ObservationModel::builder().build()?;
/// let mut observations = model.subscribe();
///
/// model.set_viewport(LatLon(60.2, 25.0), CoordinateSpan::new(0.6, 1.0));
/// model.resume();
///
/// observations.changed().await.ok();
/// for (station, history) in observations.borrow().iter() {
///     println!("{}: {} readings", station, history.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct ObservationModel {
    core: Arc<ModelCore>,
    poller: PollingController,
}

#[bon]
impl ObservationModel {
    /// Builds a model.
    ///
    /// All parameters are optional:
    ///
    /// * `.base_url(String)`: the observation service endpoint. Defaults to
    ///   the FMI open-data proxy.
    /// * `.region(CoordinateBoundaries)`: the supported query region.
    ///   Defaults to the proxy's Finnish coverage area.
    /// * `.poll_interval(Duration)`: re-query cadence while resumed.
    ///   Defaults to 600 seconds.
    /// * `.fetch_timeout(Duration)`: per-request HTTP timeout. Defaults to
    ///   30 seconds; a timeout surfaces like any transport error.
    ///
    /// # Errors
    ///
    /// Returns [`HavaintoError::ClientBuild`] when the HTTP client cannot
    /// be constructed.
    #[builder]
    pub fn new(
        base_url: Option<String>,
        region: Option<CoordinateBoundaries>,
        poll_interval: Option<Duration>,
        fetch_timeout: Option<Duration>,
    ) -> Result<Self, HavaintoError> {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let region = region.unwrap_or_else(fmi_coverage);
        let poll_interval = poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL);
        let fetch_timeout = fetch_timeout.unwrap_or(DEFAULT_FETCH_TIMEOUT);

        let core = Arc::new(ModelCore {
            planner: QueryPlanner::new(base_url, region),
            fetcher: ObservationFetcher::new(fetch_timeout)
                .map_err(HavaintoError::ClientBuild)?,
            store: ObservationStore::new(),
        });
        let poller = PollingController::new(Arc::clone(&core), poll_interval);
        Ok(Self { core, poller })
    }

    /// Records a viewport change from its center and span.
    ///
    /// While polling is active this triggers an immediate re-query; while
    /// paused the viewport is only recorded and the next
    /// [`resume`](ObservationModel::resume) uses it.
    pub fn set_viewport(&self, center: LatLon, span: CoordinateSpan) {
        self.set_viewport_bounds(CoordinateBoundaries::around(center, span));
    }

    /// Same as [`set_viewport`](ObservationModel::set_viewport) with
    /// precomputed boundaries.
    pub fn set_viewport_bounds(&self, viewport: CoordinateBoundaries) {
        self.poller.set_viewport(viewport);
    }

    /// Starts background polling: queries the latest viewport immediately,
    /// then on every poll tick and viewport change.
    pub fn resume(&self) {
        self.poller.resume();
    }

    /// Stops scheduled polling. An in-flight fetch still completes and its
    /// result is applied.
    pub fn pause(&self) {
        self.poller.pause();
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_active()
    }

    /// Runs one query cycle for the latest recorded viewport and waits for
    /// it. Does nothing when no viewport has been recorded yet.
    ///
    /// Store updates and error events are published exactly as for a
    /// scheduled cycle; the returned error is a convenience for callers
    /// that drive fetches manually.
    pub async fn query_now(&self) -> Result<(), HavaintoError> {
        match self.poller.viewport() {
            Some(viewport) => Arc::clone(&self.core)
                .run_cycle(viewport)
                .await
                .map_err(HavaintoError::from),
            None => Ok(()),
        }
    }

    /// A snapshot of the current station table.
    pub fn table(&self) -> Arc<StationTable> {
        self.core.store.table()
    }

    pub fn status(&self) -> ModelStatus {
        self.core.store.status()
    }

    /// Subscribes to station-table replacements.
    pub fn subscribe(&self) -> watch::Receiver<Arc<StationTable>> {
        self.core.store.subscribe()
    }

    /// Subscribes to status transitions.
    pub fn subscribe_status(&self) -> watch::Receiver<ModelStatus> {
        self.core.store.subscribe_status()
    }

    /// Subscribes to one-shot error messages.
    pub fn subscribe_errors(&self) -> broadcast::Receiver<String> {
        self.core.store.subscribe_errors()
    }

    /// A live handle to one station's observation history; empty while the
    /// station is unknown, updated on every fetch.
    pub fn station(&self, location_id: &str) -> StationObservations {
        self.core.store.station(location_id)
    }
}
