//! Pairwise proximity checks between addresses and postal codes.

use crate::locality::{Locality, extract_city, extract_zone};
use crate::model::ProximityTier;

/// Rough distance reported for identical postal codes.
pub const SAME_CODE_KM: u32 = 0;
/// Rough distance reported for postal codes sharing a zone.
pub const SAME_ZONE_KM: u32 = 30;
/// Rough distance reported for postal codes in different zones.
pub const OTHER_ZONE_KM: u32 = 100;

/// Whether both addresses resolve to the same city.
#[must_use]
pub fn is_same_city(first: &str, second: &str) -> bool {
    same_token(extract_city(first).as_deref(), extract_city(second).as_deref())
}

/// Whether both addresses resolve to the same postal zone.
#[must_use]
pub fn is_same_zone(first: &str, second: &str) -> bool {
    same_token(extract_zone(first).as_deref(), extract_zone(second).as_deref())
}

/// Coarse distance in kilometres between two postal codes.
///
/// This is a three-step placeholder, not a geometric distance: identical codes
/// are [`SAME_CODE_KM`] apart, codes sharing their two-digit prefix
/// [`SAME_ZONE_KM`], anything else [`OTHER_ZONE_KM`].
#[must_use]
pub fn estimate_distance(first_code: &str, second_code: &str) -> u32 {
    if first_code == second_code {
        return SAME_CODE_KM;
    }

    let zone_len = 2;
    if first_code
        .chars()
        .take(zone_len)
        .eq(second_code.chars().take(zone_len))
    {
        SAME_ZONE_KM
    } else {
        OTHER_ZONE_KM
    }
}

/// Assign the proximity tier of a ride departure relative to a passenger.
#[must_use]
pub fn classify(passenger: &Locality, departure: &Locality) -> ProximityTier {
    if same_token(passenger.city.as_deref(), departure.city.as_deref()) {
        ProximityTier::SameCity
    } else if same_token(passenger.zone.as_deref(), departure.zone.as_deref()) {
        ProximityTier::SameZone
    } else {
        ProximityTier::Other
    }
}

fn same_token(first: Option<&str>, second: Option<&str>) -> bool {
    matches!((first, second), (Some(lhs), Some(rhs)) if lhs == rhs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_city_ignores_case_and_street() {
        assert!(is_same_city("1 Rue A, 75001 PARIS", "99 Avenue B, 75016 Paris"));
        assert!(!is_same_city("75001 Paris", "69001 Lyon"));
    }

    #[test]
    fn unknown_city_never_matches() {
        assert!(!is_same_city("", ""));
        assert!(!is_same_city("Paris 75001", "Paris 75001"));
    }

    #[test]
    fn same_zone_compares_prefixes() {
        assert!(is_same_zone("75001 Paris", "75020 Paris"));
        assert!(!is_same_zone("75001 Paris", "92100 Boulogne"));
        assert!(!is_same_zone("Paris", "Paris"));
    }

    #[test]
    fn distance_has_three_steps() {
        assert_eq!(estimate_distance("75001", "75001"), 0);
        assert_eq!(estimate_distance("75001", "75015"), 30);
        assert_eq!(estimate_distance("75001", "69001"), 100);
        assert_eq!(estimate_distance("7", "7"), 0);
    }

    #[test]
    fn city_outranks_zone() {
        let passenger = Locality::of("10 Rue de Paris, 75001 Paris");
        assert_eq!(
            classify(&passenger, &Locality::of("20 Avenue, 75001 Paris")),
            ProximityTier::SameCity
        );
        assert_eq!(
            classify(&passenger, &Locality::of("Quai, 75019 Pantin")),
            ProximityTier::SameZone
        );
        assert_eq!(
            classify(&passenger, &Locality::of("5 Rue, 69000 Lyon")),
            ProximityTier::Other
        );
        assert_eq!(classify(&Locality::of(""), &passenger), ProximityTier::Other);
    }
}
