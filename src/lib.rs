pub mod directions;
pub mod error;
pub mod export;
pub mod geocode;
pub mod gtfs;
pub mod path;
pub mod schedule;
pub mod shared;

pub use error::Error;

pub mod prelude {
    pub use crate::{
        Error,
        directions::{Directions, DirectionsProvider, Leg, RouteRequest, TravelMode},
        geocode::{Config as GeocodeConfig, GeocodeResult, Resolver, resolve_all, resolve_all_with},
        gtfs::GtfsReader,
        path::{Path, ShapeRecord, Waypoint},
        schedule::{ExpandedStopTime, FrequencySpec, StopTimeBaseline, expand},
        shared::{Coordinate, Distance, Duration, Time, cumulative, distance},
    };
}
