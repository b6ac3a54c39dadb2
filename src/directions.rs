use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    path::{MIN_ROUTE_POINTS, Path},
    shared::geo::{Coordinate, Distance},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

/// A turn-by-turn request: origin, destination and ordered stopovers in between.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub waypoints: Vec<Coordinate>,
    pub mode: TravelMode,
}

impl RouteRequest {
    /// Uses the first waypoint as origin, the last as destination and everything between
    /// as stopovers.
    pub fn from_path(path: &Path, mode: TravelMode) -> Result<Self, Error> {
        let coordinates: Vec<Coordinate> = path.coordinates().copied().collect();
        match coordinates.as_slice() {
            [origin, waypoints @ .., destination] => Ok(Self {
                origin: *origin,
                destination: *destination,
                waypoints: waypoints.to_vec(),
                mode,
            }),
            _ => Err(Error::InsufficientPoints {
                required: MIN_ROUTE_POINTS,
                found: coordinates.len(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    pub distance: Distance,
}

/// What a directions provider returns: the road-following polyline and one leg per hop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directions {
    pub polyline: Vec<Coordinate>,
    pub legs: Vec<Leg>,
}

impl Directions {
    /// Distance as reported by the provider, which follows the road network and is
    /// usually longer than the great-circle distance along the polyline.
    pub fn total_distance(&self) -> Distance {
        self.legs.iter().map(|leg| leg.distance).sum()
    }

    pub fn into_path(self) -> Path {
        self.polyline.into_iter().collect()
    }
}

/// External turn-by-turn service. Nothing in this crate implements it; callers plug in
/// whichever provider they have credentials for.
pub trait DirectionsProvider {
    fn route(
        &self,
        request: &RouteRequest,
    ) -> impl Future<Output = Result<Directions, Error>> + Send;
}

#[test]
fn request_needs_two_points() {
    let path = Path::new().with(Coordinate::new(1.0, 1.0));
    assert_eq!(
        RouteRequest::from_path(&path, TravelMode::Driving),
        Err(Error::InsufficientPoints {
            required: 2,
            found: 1
        })
    );
}
