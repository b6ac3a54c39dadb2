use chrono::Weekday;
use thiserror::Error;

/// Errors produced by the pure parts of the engine.
///
/// Per-item lookup failures are stored inside [`crate::geocode::GeocodeResult`], so the enum
/// stays `Clone` and comparable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Need at least {required} points, found {found}")]
    InsufficientPoints { required: usize, found: usize },
    #[error("Path has no waypoints to remove")]
    EmptyPath,
    #[error("Malformed time: {0:?}")]
    MalformedTime(String),
    #[error("Frequency for {weekday} must be positive, got {minutes}")]
    NonPositiveFrequency { weekday: Weekday, minutes: i64 },
    #[error("Address lookup failed: {0}")]
    ResolverFailure(String),
    #[error("Address lookup timed out after {0:?}")]
    ResolverTimeout(std::time::Duration),
    #[error("Waypoint {index} has no coordinate")]
    MissingCoordinate { index: usize },
    #[error("Coordinate out of range: {latitude}, {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
    #[error("Invalid stop time for {stop_id}: {reason}")]
    InvalidStopTime { stop_id: String, reason: String },
    #[error("Directions request failed: {0}")]
    DirectionsFailure(String),
}
