//! Owns the model's shared state — the station table, the derived status and
//! transient error events — and publishes every change over three
//! independent channels.

use crate::observations::table::StationTable;
use crate::types::observation::Observation;
use crate::types::status::ModelStatus;
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, watch};

const ERROR_CHANNEL_CAPACITY: usize = 16;

// The shared mutable tuple behind a single mutex; status derives from it.
#[derive(Debug)]
struct QueryState {
    in_flight: u32,
    region_available: bool,
}

/// Holds the latest [`StationTable`], the derived [`ModelStatus`] and the
/// error event channel.
///
/// The table is replaced wholesale on every completed fetch cycle and never
/// mutated in place, so a subscriber always observes a consistent snapshot.
/// Error messages are one-shot events, not retained state.
pub struct ObservationStore {
    table_tx: watch::Sender<Arc<StationTable>>,
    status_tx: watch::Sender<ModelStatus>,
    error_tx: broadcast::Sender<String>,
    state: Mutex<QueryState>,
}

impl ObservationStore {
    pub fn new() -> Self {
        let (table_tx, _) = watch::channel(Arc::new(StationTable::new()));
        let (status_tx, _) = watch::channel(ModelStatus::Ready);
        let (error_tx, _) = broadcast::channel(ERROR_CHANNEL_CAPACITY);
        Self {
            table_tx,
            status_tx,
            error_tx,
            state: Mutex::new(QueryState {
                in_flight: 0,
                region_available: true,
            }),
        }
    }

    /// A snapshot of the current table.
    pub fn table(&self) -> Arc<StationTable> {
        self.table_tx.borrow().clone()
    }

    pub fn status(&self) -> ModelStatus {
        *self.status_tx.borrow()
    }

    /// Subscribes to full-table replacements. Every completed fetch cycle
    /// notifies, including ones that produced an identical or empty table.
    pub fn subscribe(&self) -> watch::Receiver<Arc<StationTable>> {
        self.table_tx.subscribe()
    }

    /// Subscribes to status changes. Only actual transitions notify.
    pub fn subscribe_status(&self) -> watch::Receiver<ModelStatus> {
        self.status_tx.subscribe()
    }

    /// Subscribes to one-shot error messages.
    pub fn subscribe_errors(&self) -> broadcast::Receiver<String> {
        self.error_tx.subscribe()
    }

    /// A live handle to one station's observation history.
    pub fn station(&self, location_id: &str) -> StationObservations {
        StationObservations {
            location_id: location_id.to_string(),
            table_rx: self.table_tx.subscribe(),
        }
    }

    /// Replaces the table wholesale and notifies all table subscribers.
    pub fn replace_table(&self, table: StationTable) {
        self.table_tx.send_replace(Arc::new(table));
    }

    pub fn clear_table(&self) {
        self.replace_table(StationTable::new());
    }

    /// Publishes a one-shot error event. Having no subscribers is fine.
    pub fn publish_error(&self, message: String) {
        let _ = self.error_tx.send(message);
    }

    /// Marks one fetch as in flight; status shows `Querying` until the
    /// matching [`finish_query`](ObservationStore::finish_query).
    pub fn begin_query(&self) {
        let mut state = self.state.lock().unwrap();
        state.in_flight += 1;
        self.publish_status(&state);
    }

    pub fn finish_query(&self) {
        let mut state = self.state.lock().unwrap();
        state.in_flight = state.in_flight.saturating_sub(1);
        self.publish_status(&state);
    }

    /// Records whether the latest viewport overlaps the supported region.
    pub fn set_region_available(&self, available: bool) {
        let mut state = self.state.lock().unwrap();
        state.region_available = available;
        self.publish_status(&state);
    }

    fn publish_status(&self, state: &QueryState) {
        let next = if state.in_flight > 0 {
            ModelStatus::Querying
        } else if !state.region_available {
            ModelStatus::RegionNotAvailable
        } else {
            ModelStatus::Ready
        };
        self.status_tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}

impl Default for ObservationStore {
    fn default() -> Self {
        Self::new()
    }
}

/// A live-updating view of one station's observation history.
///
/// [`current`](StationObservations::current) returns the history under the
/// latest table (empty when the station is unknown);
/// [`changed`](StationObservations::changed) resolves whenever a new table
/// arrives, so a detail view stays current across fetches.
pub struct StationObservations {
    location_id: String,
    table_rx: watch::Receiver<Arc<StationTable>>,
}

impl StationObservations {
    pub fn location_id(&self) -> &str {
        &self.location_id
    }

    pub fn current(&self) -> Vec<Observation> {
        self.table_rx
            .borrow()
            .get(&self.location_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Waits for the next table replacement. Errors when the owning model is
    /// gone.
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.table_rx.changed().await
    }
}
