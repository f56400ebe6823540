//! HTTP layer: one GET against the planned request URL, with the response
//! status taxonomy the rest of the model's error policy hangs off.

use crate::observations::error::ObservationDataError;
use crate::observations::table::RawResponse;
use log::{info, warn};
use reqwest::Client;
use std::time::Duration;

/// Fetches raw observation payloads over HTTP.
///
/// Holds one reusable [`reqwest::Client`] configured with a request timeout;
/// a timed-out fetch surfaces like any other transport failure.
pub struct ObservationFetcher {
    client: Client,
}

impl ObservationFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Runs one fetch cycle's network half.
    ///
    /// Status handling:
    /// - 2xx: decode the body as `{ stationId: [ { field: value } ] }`.
    /// - 400-499: [`ObservationDataError::ClientStatus`], logged only.
    /// - anything else: [`ObservationDataError::HttpStatus`].
    /// - undecodable body: [`ObservationDataError::BadPayload`].
    pub async fn fetch(&self, url: &str) -> Result<RawResponse, ObservationDataError> {
        info!("Loading observations from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ObservationDataError::NetworkRequest(url.to_string(), e))?;

        let status = response.status();
        if status.is_client_error() {
            warn!("Got reply with response code {} from {}", status, url);
            return Err(ObservationDataError::ClientStatus {
                url: url.to_string(),
                status,
            });
        }
        if !status.is_success() {
            warn!("Observation request to {} failed with status {}", url, status);
            return Err(ObservationDataError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ObservationDataError::NetworkRequest(url.to_string(), e))?;

        serde_json::from_slice::<RawResponse>(&body).map_err(|e| {
            warn!("Bad observation payload from {}: {}", url, e);
            ObservationDataError::BadPayload {
                url: url.to_string(),
                source: e,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn stub_server(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let reply = format!(
                    "{status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(reply.as_bytes()).await;
            }
        });
        format!("http://{}/1/observations", addr)
    }

    #[tokio::test]
    async fn decodes_a_well_formed_response() {
        let url = stub_server(
            "HTTP/1.1 200 OK",
            r#"{"s1": [{"stationName": "Harmaja", "lat": "60.105", "long": "24.975"}]}"#,
        )
        .await;

        let fetcher = ObservationFetcher::new(Duration::from_secs(5)).unwrap();
        let raw = fetcher.fetch(&url).await.unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(raw["s1"][0]["stationName"], "Harmaja");
    }

    #[tokio::test]
    async fn client_error_is_the_silent_variant() {
        let url = stub_server("HTTP/1.1 404 Not Found", "").await;
        let fetcher = ObservationFetcher::new(Duration::from_secs(5)).unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(err.is_silent());
        assert!(!err.clears_table());
    }

    #[tokio::test]
    async fn server_error_is_surfaced() {
        let url = stub_server("HTTP/1.1 503 Service Unavailable", "").await;
        let fetcher = ObservationFetcher::new(Duration::from_secs(5)).unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, ObservationDataError::HttpStatus { .. }));
        assert!(!err.is_silent());
        assert!(!err.clears_table());
    }

    #[tokio::test]
    async fn non_json_body_is_bad_payload() {
        let url = stub_server("HTTP/1.1 200 OK", "<html>definitely not json</html>").await;
        let fetcher = ObservationFetcher::new(Duration::from_secs(5)).unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, ObservationDataError::BadPayload { .. }));
        assert!(err.clears_table());
    }

    #[tokio::test]
    async fn wrong_json_shape_is_bad_payload() {
        // Valid JSON, but values are not string-keyed record lists.
        let url = stub_server("HTTP/1.1 200 OK", r#"{"s1": "nope"}"#).await;
        let fetcher = ObservationFetcher::new(Duration::from_secs(5)).unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, ObservationDataError::BadPayload { .. }));
    }

    #[tokio::test]
    async fn connection_refusal_is_a_network_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = ObservationFetcher::new(Duration::from_secs(5)).unwrap();
        let err = fetcher
            .fetch(&format!("http://{}/1/observations", addr))
            .await
            .unwrap_err();
        assert!(matches!(err, ObservationDataError::NetworkRequest(_, _)));
    }
}
