//! Traits describing ride source capabilities and shared error type.

use std::io::Error as IoError;

use async_trait::async_trait;
use reqwest::Error as ReqwestError;
use serde_json::Error as JsonError;

use crate::model::{CandidateRide, EventId, EventMeta};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while loading events and rides.
pub enum PortError {
    /// Network layer failed.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// Payload could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] JsonError),
    /// Reading a local snapshot failed.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),
    /// Credentials are missing or were rejected.
    #[error("Unauthorized")]
    Unauthorized,
    /// Requested event does not exist.
    #[error("Event not found: {0}")]
    EventNotFound(EventId),
    /// Backend reported a failure.
    #[error("API error: {0}")]
    Api(String),
    /// Internal source error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[async_trait]
/// Trait for backends supplying events and their ride snapshots.
///
/// Each call returns a consistent snapshot; matching never observes a ride
/// list while it is being mutated.
pub trait RideSource: Send + Sync {
    /// Short human-readable name of the backend, used in logs and the UI.
    fn name(&self) -> &str;

    /// List the events visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the backend request fails.
    async fn events(&self) -> Result<Vec<EventMeta>, PortError>;

    /// Fetch the rides offered for an event.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the backend request fails or the event is unknown.
    async fn rides(&self, event: &EventId) -> Result<Vec<CandidateRide>, PortError>;
}
