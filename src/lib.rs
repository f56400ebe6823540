//! A reactive model of recent weather observations from Finnish
//! Meteorological Institute stations.
//!
//! Feed the [`ObservationModel`] the map viewport as it changes; it decides
//! whether the viewport overlaps the supported query region, fetches and
//! validates observation data for the clipped boundaries, keeps a
//! per-station chronological history, and publishes data, status and error
//! updates over independent subscription channels. Background polling keeps
//! the data fresh while the model is resumed.

pub mod display;
mod error;
mod model;
mod observations;
mod polling;
mod query;
mod store;
mod types;

pub use error::HavaintoError;
pub use model::ObservationModel;

pub use observations::error::ObservationDataError;
pub use observations::table::{build_station_table, latest, RawResponse, StationTable};

pub use query::planner::{QueryPlan, QueryPlanner};
pub use query::region::fmi_coverage;

pub use store::store::{ObservationStore, StationObservations};

pub use types::coordinates::{CoordinateBoundaries, CoordinateSpan, LatLon};
pub use types::observation::{Observation, RawRecord};
pub use types::status::ModelStatus;
