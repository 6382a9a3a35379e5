//! High-level service facade over a ride source.

use std::cmp::Reverse;
use std::sync::Arc;

use crate::locality::Locality;
use crate::matching::match_passenger_with_drivers;
use crate::model::{CandidateRide, EventId, EventMeta, MatchRecord, RideStats, RideStatus};
use crate::ports::{PortError, RideSource};

/// Ranked drivers and seat statistics computed from one ride snapshot.
#[derive(Debug, Clone)]
pub struct EventMatches {
    /// Drivers ranked for the passenger.
    pub matches: Vec<MatchRecord>,
    /// Seat totals over the active rides of the same snapshot.
    pub stats: RideStats,
}

/// Public entry point for listing events and matching passengers with drivers.
pub struct TeammoveService {
    source: Arc<dyn RideSource>,
}

impl TeammoveService {
    /// Create a new service bound to the provided ride source.
    #[must_use]
    pub fn new(source: Arc<dyn RideSource>) -> Self {
        Self { source }
    }

    /// Name of the underlying ride source.
    #[must_use]
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// List events, most recent first.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the source request fails.
    pub async fn events(&self) -> Result<Vec<EventMeta>, PortError> {
        let mut events = self.source.events().await?;
        events.sort_by_key(|event| Reverse((event.date, event.time.clone())));
        Ok(events)
    }

    /// Rank the active rides of an event for a passenger departing from `passenger_address`.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the event is unknown or the source request fails.
    pub async fn match_for_event(
        &self,
        event: &EventId,
        passenger_address: &str,
    ) -> Result<Vec<MatchRecord>, PortError> {
        let rides = self.active_rides(event).await?;
        let matches = match_passenger_with_drivers(passenger_address, &rides);
        tracing::info!(
            event = %event,
            rides = rides.len(),
            matches = matches.len(),
            "matched passenger"
        );
        Ok(matches)
    }

    /// Rank drivers and aggregate seat statistics from a single fetch of the event's rides.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the event is unknown or the source request fails.
    pub async fn match_with_stats(
        &self,
        event: &EventId,
        passenger_address: &str,
    ) -> Result<EventMatches, PortError> {
        let rides = self.active_rides(event).await?;
        let stats = RideStats::from_rides(&rides);
        let matches = match_passenger_with_drivers(passenger_address, &rides);
        tracing::info!(
            event = %event,
            rides = rides.len(),
            matches = matches.len(),
            "matched passenger with stats"
        );
        Ok(EventMatches { matches, stats })
    }

    /// Seat statistics over the active rides of an event.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the event is unknown or the source request fails.
    pub async fn ride_stats(&self, event: &EventId) -> Result<RideStats, PortError> {
        let rides = self.source.rides(event).await?;
        Ok(RideStats::from_rides(&rides))
    }

    /// Locality extracted from a passenger address.
    #[must_use]
    pub fn passenger_locality(passenger_address: &str) -> Locality {
        Locality::of(passenger_address)
    }

    async fn active_rides(&self, event: &EventId) -> Result<Vec<CandidateRide>, PortError> {
        let rides = self.source.rides(event).await?;
        let total = rides.len();
        let active: Vec<CandidateRide> = rides
            .into_iter()
            .filter(|ride| ride.status == RideStatus::Active)
            .collect();
        if active.len() < total {
            tracing::debug!(
                event = %event,
                skipped = total - active.len(),
                "ignored inactive rides"
            );
        }
        Ok(active)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use super::*;
    use crate::model::{EventStatus, ParticipantId, ProximityTier, RideId};

    struct InMemorySource {
        events: Vec<EventMeta>,
        rides: HashMap<EventId, Vec<CandidateRide>>,
        ride_fetches: AtomicUsize,
    }

    #[async_trait]
    impl RideSource for InMemorySource {
        fn name(&self) -> &str {
            "memory"
        }

        async fn events(&self) -> Result<Vec<EventMeta>, PortError> {
            Ok(self.events.clone())
        }

        async fn rides(&self, event: &EventId) -> Result<Vec<CandidateRide>, PortError> {
            self.ride_fetches.fetch_add(1, Ordering::SeqCst);
            self.rides
                .get(event)
                .cloned()
                .ok_or_else(|| PortError::EventNotFound(event.clone()))
        }
    }

    fn event(id: &str, date: (i32, u32, u32)) -> EventMeta {
        EventMeta {
            id: EventId(id.to_owned()),
            name: format!("Event {id}"),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("valid date"),
            time: Some("09:00".to_owned()),
            location: "Stade, 75016 Paris".to_owned(),
            status: EventStatus::Active,
        }
    }

    fn ride(id: &str, departure: &str, seats: i32, status: RideStatus) -> CandidateRide {
        CandidateRide {
            id: RideId(id.to_owned()),
            participant_id: ParticipantId(format!("p-{id}")),
            first_name: "Paul".to_owned(),
            last_name: "Durand".to_owned(),
            departure_address: departure.to_owned(),
            available_seats: seats,
            total_seats: Some(4),
            status,
        }
    }

    fn source() -> Arc<InMemorySource> {
        let gala = EventId("gala".to_owned());
        let rides = vec![
            ride("lyon", "5 Rue, 69000 Lyon", 3, RideStatus::Active),
            ride("cancelled", "1 Rue, 75001 Paris", 3, RideStatus::Cancelled),
            ride("paris", "20 Avenue, 75001 Paris", 2, RideStatus::Active),
            ride("full", "1 Rue, 75002 Paris", 0, RideStatus::Active),
        ];
        let source = InMemorySource {
            events: vec![event("kickoff", (2026, 1, 10)), event("gala", (2026, 6, 1))],
            rides: HashMap::from([(gala, rides)]),
            ride_fetches: AtomicUsize::new(0),
        };
        Arc::new(source)
    }

    fn service() -> TeammoveService {
        TeammoveService::new(source())
    }

    #[tokio::test]
    async fn events_are_listed_most_recent_first() {
        let events = service().events().await.expect("events load");
        let ids: Vec<&str> = events.iter().map(|event| event.id.0.as_str()).collect();
        assert_eq!(ids, ["gala", "kickoff"]);
    }

    #[tokio::test]
    async fn matching_skips_inactive_and_full_rides() {
        let matches = service()
            .match_for_event(&EventId("gala".to_owned()), "10 Rue de Paris, 75001 Paris")
            .await
            .expect("match succeeds");

        let ids: Vec<&str> = matches.iter().map(|record| record.ride_id.0.as_str()).collect();
        assert_eq!(ids, ["paris", "lyon"]);
        assert_eq!(
            matches.first().map(|record| record.tier),
            Some(ProximityTier::SameCity)
        );
    }

    #[tokio::test]
    async fn empty_address_still_matches() {
        let matches = service()
            .match_for_event(&EventId("gala".to_owned()), "")
            .await
            .expect("match succeeds");
        assert_eq!(matches.len(), 2);
    }

    #[tokio::test]
    async fn unknown_event_is_reported() {
        let result = service()
            .match_for_event(&EventId("missing".to_owned()), "75001 Paris")
            .await;
        assert!(matches!(result, Err(PortError::EventNotFound(id)) if id.0 == "missing"));
    }

    #[tokio::test]
    async fn stats_cover_active_rides() {
        let stats = service()
            .ride_stats(&EventId("gala".to_owned()))
            .await
            .expect("stats load");
        assert_eq!(stats.total_rides, 3);
        assert_eq!(stats.total_seats, 12);
        assert_eq!(stats.available_seats, 5);
    }

    #[tokio::test]
    async fn matches_and_stats_share_one_fetch() {
        let source = source();
        let service = TeammoveService::new(Arc::clone(&source) as Arc<dyn RideSource>);

        let result = service
            .match_with_stats(&EventId("gala".to_owned()), "10 Rue de Paris, 75001 Paris")
            .await
            .expect("match succeeds");

        assert_eq!(source.ride_fetches.load(Ordering::SeqCst), 1);
        let ids: Vec<&str> = result.matches.iter().map(|record| record.ride_id.0.as_str()).collect();
        assert_eq!(ids, ["paris", "lyon"]);
        assert_eq!(
            result.stats,
            RideStats {
                total_rides: 3,
                total_seats: 12,
                available_seats: 5,
            }
        );
    }

    #[test]
    fn passenger_locality_is_extracted() {
        let locality = TeammoveService::passenger_locality("10 Rue, 69003 Lyon");
        assert_eq!(locality.city.as_deref(), Some("lyon"));
        assert_eq!(locality.zone.as_deref(), Some("69"));
    }
}
