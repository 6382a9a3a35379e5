//! Core types and service wiring for the teammove carpool coordinator.

/// Locality extraction from free-text postal addresses.
pub mod locality;
/// Ranking of candidate rides for a passenger.
pub mod matching;
/// Domain models and identifiers shared by all ride sources.
pub mod model;
/// Traits describing the ride source interfaces.
pub mod ports;
/// Proximity comparison between two addresses.
pub mod proximity;
/// High-level service facade used by clients.
pub mod service;

pub use locality::*;
pub use matching::*;
pub use model::*;
pub use ports::*;
pub use proximity::*;
pub use service::*;
