use crate::observations::error::ObservationDataError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HavaintoError {
    #[error(transparent)]
    ObservationData(#[from] ObservationDataError),

    #[error("Failed to construct the HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}
