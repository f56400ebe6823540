use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObservationDataError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("Getting observation data failed for {url}. Response code {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// A 400-range reply. Logged at the fetch site but never surfaced to
    /// error subscribers; the service rejects malformed bounding boxes this
    /// way and there is nothing for the user to act on.
    #[error("Request rejected for {url}. Response code {status}")]
    ClientStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Bad data received from {url}")]
    BadPayload {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ObservationDataError {
    /// True for failures that are logged only, never published to error
    /// subscribers.
    pub fn is_silent(&self) -> bool {
        matches!(self, ObservationDataError::ClientStatus { .. })
    }

    /// True for failures after which the station table is reset to empty
    /// instead of keeping the previous data.
    pub fn clears_table(&self) -> bool {
        matches!(self, ObservationDataError::BadPayload { .. })
    }

    /// The display message followed by the source chain, so error events
    /// carry the underlying cause (DNS failure, refused connection,
    /// timeout, decode error) and not just which step failed.
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut message = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}
