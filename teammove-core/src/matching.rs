//! Ranking of candidate rides for a passenger by departure proximity.

use crate::locality::Locality;
use crate::model::{CandidateRide, MatchRecord};
use crate::proximity::classify;

/// Rank the rides a passenger could book, closest departures first.
///
/// Full rides (no free seat) are skipped. Every other ride yields one
/// [`MatchRecord`]; records are grouped by tier (same city, same zone, other)
/// and keep their input order within a tier, so callers can pre-sort the
/// snapshot by recency or priority. Addresses without usable locality simply
/// land in the last tier.
#[must_use]
pub fn match_passenger_with_drivers(
    passenger_address: &str,
    rides: &[CandidateRide],
) -> Vec<MatchRecord> {
    let passenger = Locality::of(passenger_address);

    let mut matches: Vec<MatchRecord> = rides
        .iter()
        .filter(|ride| ride.has_free_seats())
        .map(|ride| {
            let departure = Locality::of(&ride.departure_address);
            MatchRecord {
                ride_id: ride.id.clone(),
                driver_id: ride.participant_id.clone(),
                driver_name: ride.driver_name(),
                tier: classify(&passenger, &departure),
                available_seats: ride.available_seats,
            }
        })
        .collect();

    // `sort_by_key` is stable: equal tiers keep the snapshot order.
    matches.sort_by_key(|record| record.tier);

    tracing::debug!(
        candidates = rides.len(),
        matches = matches.len(),
        passenger_city = passenger.city.as_deref().unwrap_or("-"),
        passenger_zone = passenger.zone.as_deref().unwrap_or("-"),
        "ranked rides for passenger"
    );

    matches
}
