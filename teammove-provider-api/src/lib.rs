//! Ride source backed by the Teammove REST API.
//!
//! Every endpoint answers with the `{ "success": bool, "data": ..., "error": ... }`
//! envelope; requests carry the organiser's JWT as a bearer token.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::{DeserializeOwned, IgnoredAny};

use teammove_core::{
    model::{CandidateRide, EventId, EventMeta},
    ports::{PortError, RideSource},
};

/// Local development server address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8787";

/// Response envelope shared by all API endpoints.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

/// Payload of `GET /api/events`.
#[derive(Debug, Deserialize)]
struct EventList {
    events: Vec<EventMeta>,
}

impl<T> Envelope<T> {
    fn into_data(self) -> Result<T, PortError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(PortError::Api("response carried no data".to_owned())),
            (false, _) => Err(PortError::Api(
                self.error.unwrap_or_else(|| "request failed".to_owned()),
            )),
        }
    }
}

/// Events and rides fetched from a Teammove deployment.
pub struct ApiRideSource {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiRideSource {
    /// Create a source for the deployment at `base_url`, authenticating with `token` when given.
    #[must_use]
    pub fn new(client: Client, base_url: &str, token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token,
        }
    }

    fn events_url(&self) -> String {
        format!("{}/api/events", self.base_url)
    }

    fn rides_url(&self, event: &EventId) -> String {
        format!("{}/api/events/{}/rides", self.base_url, event.0)
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let request = self.client.get(url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl RideSource for ApiRideSource {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn events(&self) -> Result<Vec<EventMeta>, PortError> {
        let EventList { events } = fetch_envelope(self.get(&self.events_url()), None).await?;
        tracing::debug!(count = events.len(), "fetched events");
        Ok(events)
    }

    async fn rides(&self, event: &EventId) -> Result<Vec<CandidateRide>, PortError> {
        let rides: Vec<CandidateRide> =
            fetch_envelope(self.get(&self.rides_url(event)), Some(event)).await?;
        tracing::debug!(event = %event, count = rides.len(), "fetched rides");
        Ok(rides)
    }
}

/// Build a shareable API-backed ride source.
#[must_use]
pub fn source(client: Client, base_url: &str, token: Option<String>) -> Arc<dyn RideSource> {
    Arc::new(ApiRideSource::new(client, base_url, token))
}

/// Map statuses with a dedicated meaning to their error.
fn status_error(status: StatusCode, event: Option<&EventId>) -> Option<PortError> {
    match (status, event) {
        (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => Some(PortError::Unauthorized),
        (StatusCode::NOT_FOUND, Some(event)) => Some(PortError::EventNotFound(event.clone())),
        _ => None,
    }
}

// Fetch and unwrap an API envelope with status handling.
async fn fetch_envelope<T: DeserializeOwned>(
    req: RequestBuilder,
    event: Option<&EventId>,
) -> Result<T, PortError> {
    let response = req.send().await?;
    let status = response.status();

    if let Some(err) = status_error(status, event) {
        return Err(err);
    }

    if !status.is_success() {
        let message = response
            .json::<Envelope<IgnoredAny>>()
            .await
            .ok()
            .and_then(|envelope| envelope.error)
            .unwrap_or_else(|| status.to_string());
        tracing::warn!(%status, %message, "API request failed");
        return Err(PortError::Api(message));
    }

    let body = response.bytes().await?;
    decode_envelope(&body)
}

// Decode failures are reported as such, not as transport errors.
fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<T, PortError> {
    serde_json::from_slice::<Envelope<T>>(body)?.into_data()
}
