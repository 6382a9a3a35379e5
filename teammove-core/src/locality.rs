//! Best-effort city and zone extraction from free-text postal addresses.
//!
//! Addresses are expected in the French convention where the city follows the
//! five-digit postal code (`"12 Rue X, 75001 Paris"`). Nothing is validated
//! against a registry: `"99999 Nowhere"` yields zone `"99"` and city `"nowhere"`.

use std::sync::LazyLock;

use regex::Regex;

// ASCII word boundaries: a letter such as `É` right after the digits does not hide the code.
static POSTAL_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)[0-9]{5}(?-u:\b)").expect("postal code pattern is valid")
});

/// Number of leading postal code digits forming a zone.
const ZONE_LEN: usize = 2;

/// Extract the zone of an address: the first two digits of its first postal code.
///
/// Returns `None` when the address holds no five-digit run.
#[must_use]
pub fn extract_zone(address: &str) -> Option<String> {
    let postal_code = POSTAL_CODE.find(address)?;
    postal_code.as_str().get(..ZONE_LEN).map(str::to_owned)
}

/// Extract the lower-cased city name of an address.
///
/// With a postal code present, the city is the text right after it, cut at the
/// first comma or hyphen. Without one, the last comma-separated segment is used.
/// An empty candidate in either case yields `None`.
#[must_use]
pub fn extract_city(address: &str) -> Option<String> {
    if address.is_empty() {
        return None;
    }

    let candidate = match POSTAL_CODE.find(address) {
        Some(postal_code) => city_after_postal_code(address.get(postal_code.end()..)?),
        None => city_from_last_segment(address),
    };

    Some(candidate).filter(|city| !city.is_empty())
}

fn city_after_postal_code(rest: &str) -> String {
    rest.split([',', '-'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

fn city_from_last_segment(address: &str) -> String {
    let last_segment = address.rsplit(',').next().unwrap_or_default();
    let lowered = last_segment.trim().to_lowercase();
    POSTAL_CODE.replace_all(&lowered, "").trim().to_owned()
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// City and zone extracted from one address.
pub struct Locality {
    /// Lower-cased city name, if any could be extracted.
    pub city: Option<String>,
    /// Two-digit postal zone, if the address holds a postal code.
    pub zone: Option<String>,
}

/// Most specific locality information known for an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalityToken<'locality> {
    /// A city name.
    City(&'locality str),
    /// A postal zone.
    Zone(&'locality str),
    /// Extraction failed.
    Unknown,
}

impl Locality {
    /// Extract city and zone from an address.
    #[must_use]
    pub fn of(address: &str) -> Self {
        Self {
            city: extract_city(address),
            zone: extract_zone(address),
        }
    }

    /// The city when known, else the zone.
    #[must_use]
    pub fn token(&self) -> LocalityToken<'_> {
        match (self.city.as_deref(), self.zone.as_deref()) {
            (Some(city), _) => LocalityToken::City(city),
            (None, Some(zone)) => LocalityToken::Zone(zone),
            (None, None) => LocalityToken::Unknown,
        }
    }
}
