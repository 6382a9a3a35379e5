//! Domain data structures for events, ride snapshots, and match results.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Identifier for an event organised by a company or association.
pub struct EventId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Identifier for a ride offered by a driver.
pub struct RideId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Identifier for an event participant (driver or passenger).
pub struct ParticipantId(pub String);

impl fmt::Display for EventId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl fmt::Display for RideId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Lifecycle state of an event.
pub enum EventStatus {
    /// Event is upcoming or running.
    #[default]
    Active,
    /// Event was called off.
    Cancelled,
    /// Event took place.
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Metadata describing an event participants carpool to.
pub struct EventMeta {
    /// Unique identifier.
    pub id: EventId,
    /// Display name.
    pub name: String,
    /// Calendar day of the event.
    pub date: NaiveDate,
    /// Start time as entered by the organiser, e.g. `"18:30"`.
    #[serde(default)]
    pub time: Option<String>,
    /// Venue address.
    pub location: String,
    /// Lifecycle state.
    #[serde(default)]
    pub status: EventStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Lifecycle state of a ride.
pub enum RideStatus {
    /// Ride is open for bookings.
    #[default]
    Active,
    /// Ride took place.
    Completed,
    /// Driver withdrew the ride.
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Read-only snapshot of a ride offered by a driver, as supplied by the storage layer.
pub struct CandidateRide {
    /// Ride identifier.
    pub id: RideId,
    /// Participant driving the car.
    pub participant_id: ParticipantId,
    /// Driver first name.
    pub first_name: String,
    /// Driver last name.
    pub last_name: String,
    /// Free-text departure address.
    pub departure_address: String,
    /// Seats still free. Zero or negative means the ride is full.
    pub available_seats: i32,
    /// Seats offered in total, when known.
    #[serde(default)]
    pub total_seats: Option<i32>,
    /// Lifecycle state; snapshots without one are treated as active.
    #[serde(default)]
    pub status: RideStatus,
}

impl CandidateRide {
    /// Driver display name, `"<first> <last>"`.
    #[must_use]
    pub fn driver_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether the ride still accepts passengers.
    #[must_use]
    pub fn has_free_seats(&self) -> bool {
        self.available_seats > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Coarse proximity bucket of a ride relative to a passenger.
///
/// The derived ordering is the ranking order: closer tiers sort first.
pub enum ProximityTier {
    /// Departure city matches the passenger's city.
    SameCity,
    /// Postal-code zone matches, city does not.
    SameZone,
    /// Nothing in common, or locality unknown.
    Other,
}

impl fmt::Display for ProximityTier {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slug = match self {
            ProximityTier::SameCity => "same_city",
            ProximityTier::SameZone => "same_zone",
            ProximityTier::Other => "other",
        };
        write!(formatter, "{slug}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Ranked driver option presented to a passenger.
pub struct MatchRecord {
    /// Ride the passenger could book.
    pub ride_id: RideId,
    /// Driver of the ride.
    pub driver_id: ParticipantId,
    /// Driver display name.
    pub driver_name: String,
    /// Proximity tier of the ride's departure.
    #[serde(rename = "distance")]
    pub tier: ProximityTier,
    /// Seats still free on the ride.
    pub available_seats: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Seat totals over the active rides of an event.
pub struct RideStats {
    /// Number of active rides.
    pub total_rides: usize,
    /// Seats offered across active rides.
    pub total_seats: i64,
    /// Seats still free across active rides.
    pub available_seats: i64,
}

impl RideStats {
    /// Aggregate the active rides of a snapshot. Rides without a seat total count as zero.
    #[must_use]
    pub fn from_rides(rides: &[CandidateRide]) -> Self {
        rides
            .iter()
            .filter(|ride| ride.status == RideStatus::Active)
            .fold(Self::default(), |stats, ride| Self {
                total_rides: stats.total_rides + 1,
                total_seats: stats.total_seats + i64::from(ride.total_seats.unwrap_or(0)),
                available_seats: stats.available_seats + i64::from(ride.available_seats),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ride(id: &str, available: i32, total: Option<i32>, status: RideStatus) -> CandidateRide {
        CandidateRide {
            id: RideId(id.to_owned()),
            participant_id: ParticipantId(format!("driver-{id}")),
            first_name: "Jeanne".to_owned(),
            last_name: "Martin".to_owned(),
            departure_address: "1 Rue, 75001 Paris".to_owned(),
            available_seats: available,
            total_seats: total,
            status,
        }
    }

    #[test]
    fn snapshot_without_optional_fields_defaults_to_active() {
        let json = r#"{
            "id": "r1",
            "participant_id": "p1",
            "first_name": "Ana",
            "last_name": "Lopez",
            "departure_address": "5 Rue, 69000 Lyon",
            "available_seats": 3
        }"#;
        let ride: CandidateRide = serde_json::from_str(json).expect("valid ride json");
        assert_eq!(ride.status, RideStatus::Active);
        assert_eq!(ride.total_seats, None);
        assert_eq!(ride.driver_name(), "Ana Lopez");
    }

    #[test]
    fn match_record_uses_api_field_names() {
        let record = MatchRecord {
            ride_id: RideId("r1".to_owned()),
            driver_id: ParticipantId("p1".to_owned()),
            driver_name: "Ana Lopez".to_owned(),
            tier: ProximityTier::SameZone,
            available_seats: 2,
        };
        let value = serde_json::to_value(&record).expect("serializable record");
        assert_eq!(value["rideId"], "r1");
        assert_eq!(value["driverId"], "p1");
        assert_eq!(value["distance"], "same_zone");
        assert_eq!(value["availableSeats"], 2);
    }

    #[test]
    fn tiers_order_closest_first() {
        assert!(ProximityTier::SameCity < ProximityTier::SameZone);
        assert!(ProximityTier::SameZone < ProximityTier::Other);
        assert_eq!(ProximityTier::SameCity.to_string(), "same_city");
    }

    #[test]
    fn stats_only_count_active_rides() {
        let rides = [
            ride("a", 2, Some(4), RideStatus::Active),
            ride("b", 0, Some(3), RideStatus::Active),
            ride("c", 5, Some(5), RideStatus::Cancelled),
            ride("d", 1, None, RideStatus::Active),
        ];
        let stats = RideStats::from_rides(&rides);
        assert_eq!(
            stats,
            RideStats {
                total_rides: 3,
                total_seats: 7,
                available_seats: 3,
            }
        );
    }
}
