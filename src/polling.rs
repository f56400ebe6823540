//! The pause/resume-able re-query schedule. While active, the latest
//! viewport is re-queried at a fixed interval and immediately on every
//! viewport change; while paused, viewport changes are only recorded.

use crate::model::ModelCore;
use crate::types::coordinates::CoordinateBoundaries;
use log::debug;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub(crate) struct PollingController {
    core: Arc<ModelCore>,
    poll_interval: Duration,
    viewport_tx: watch::Sender<Option<CoordinateBoundaries>>,
    schedule: Mutex<Option<JoinHandle<()>>>,
}

impl PollingController {
    pub(crate) fn new(core: Arc<ModelCore>, poll_interval: Duration) -> Self {
        let (viewport_tx, _) = watch::channel(None);
        Self {
            core,
            poll_interval,
            viewport_tx,
            schedule: Mutex::new(None),
        }
    }

    /// Records the latest viewport. The active schedule reacts to the change
    /// immediately; a paused one picks it up on the next resume.
    pub(crate) fn set_viewport(&self, viewport: CoordinateBoundaries) {
        self.viewport_tx.send_replace(Some(viewport));
    }

    pub(crate) fn viewport(&self) -> Option<CoordinateBoundaries> {
        *self.viewport_tx.borrow()
    }

    pub(crate) fn is_active(&self) -> bool {
        self.schedule.lock().unwrap().is_some()
    }

    /// Starts the schedule: one query right away with the latest recorded
    /// viewport, then again every poll interval and on every viewport
    /// change. Calling resume while already active restarts the schedule.
    ///
    /// Each query cycle runs as its own task, so rapid viewport changes do
    /// not serialize behind one another; completion order decides which
    /// result lands last in the store.
    pub(crate) fn resume(&self) {
        let mut schedule = self.schedule.lock().unwrap();
        if let Some(previous) = schedule.take() {
            previous.abort();
        }

        let core = Arc::clone(&self.core);
        let mut viewport_rx = self.viewport_tx.subscribe();
        let poll_interval = self.poll_interval;
        *schedule = Some(tokio::spawn(async move {
            // The first tick completes immediately, which gives resume its
            // query-now semantics.
            let mut ticker = tokio::time::interval(poll_interval);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Some(viewport) = *viewport_rx.borrow() {
                            tokio::spawn(Arc::clone(&core).run_cycle(viewport));
                        }
                    }
                    changed = viewport_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let viewport = *viewport_rx.borrow_and_update();
                        if let Some(viewport) = viewport {
                            debug!("Viewport changed while polling; querying immediately");
                            tokio::spawn(Arc::clone(&core).run_cycle(viewport));
                        }
                        ticker.reset();
                    }
                }
            }
        }));
    }

    /// Stops future scheduled queries. An in-flight fetch is not cancelled;
    /// its result still lands in the store when it completes.
    pub(crate) fn pause(&self) {
        if let Some(schedule) = self.schedule.lock().unwrap().take() {
            schedule.abort();
        }
    }
}

impl Drop for PollingController {
    fn drop(&mut self) {
        self.pause();
    }
}
