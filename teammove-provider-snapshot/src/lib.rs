//! Ride source backed by a JSON snapshot document.
//!
//! The document lists events and the rides offered for them:
//!
//! ```json
//! {
//!   "events": [{ "id": "e1", "name": "Gala", "date": "2026-06-01", "location": "75016 Paris" }],
//!   "rides": [{ "event_id": "e1", "id": "r1", "participant_id": "p1",
//!               "first_name": "Ana", "last_name": "Lopez",
//!               "departure_address": "5 Rue, 69000 Lyon", "available_seats": 3 }]
//! }
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use teammove_core::{
    model::{CandidateRide, EventId, EventMeta},
    ports::{PortError, RideSource},
};

/// Snapshot document layout.
#[derive(Debug, Deserialize)]
struct Snapshot {
    #[serde(default)]
    events: Vec<EventMeta>,
    #[serde(default)]
    rides: Vec<SnapshotRide>,
}

/// Ride entry tagged with the event it belongs to.
#[derive(Debug, Deserialize)]
struct SnapshotRide {
    event_id: EventId,
    #[serde(flatten)]
    ride: CandidateRide,
}

/// Events and rides held in memory from a snapshot document.
pub struct SnapshotRideSource {
    name: String,
    events: Vec<EventMeta>,
    rides: Vec<SnapshotRide>,
}

impl SnapshotRideSource {
    /// Parse a snapshot document.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::Decode`] when the document is not a valid snapshot.
    pub fn from_json_str(name: &str, json: &str) -> Result<Self, PortError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;

        let orphans = snapshot
            .rides
            .iter()
            .filter(|entry| !snapshot.events.iter().any(|event| event.id == entry.event_id))
            .count();
        if orphans > 0 {
            tracing::warn!(orphans, "snapshot holds rides for unknown events");
        }

        tracing::info!(
            source = name,
            events = snapshot.events.len(),
            rides = snapshot.rides.len(),
            "loaded ride snapshot"
        );

        Ok(Self {
            name: name.to_owned(),
            events: snapshot.events,
            rides: snapshot.rides,
        })
    }

    /// Read and parse a snapshot document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::Io`] when the file cannot be read and
    /// [`PortError::Decode`] when its content is not a valid snapshot.
    pub fn from_path(path: &Path) -> Result<Self, PortError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&path.display().to_string(), &json)
    }
}

#[async_trait]
impl RideSource for SnapshotRideSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn events(&self) -> Result<Vec<EventMeta>, PortError> {
        Ok(self.events.clone())
    }

    async fn rides(&self, event: &EventId) -> Result<Vec<CandidateRide>, PortError> {
        if !self.events.iter().any(|known| &known.id == event) {
            return Err(PortError::EventNotFound(event.clone()));
        }

        Ok(self
            .rides
            .iter()
            .filter(|entry| &entry.event_id == event)
            .map(|entry| entry.ride.clone())
            .collect())
    }
}

/// Load a snapshot file as a shareable ride source.
///
/// # Errors
///
/// Returns a [`PortError`] when the file cannot be read or parsed.
pub fn source(path: &Path) -> Result<Arc<dyn RideSource>, PortError> {
    Ok(Arc::new(SnapshotRideSource::from_path(path)?))
}
