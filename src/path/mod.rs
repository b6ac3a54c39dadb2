use std::{sync::Arc, time::Instant};

use tracing::debug;

use crate::{
    Error,
    geocode::GeocodeResult,
    shared::geo::{Coordinate, Distance, cumulative},
};

/// A route needs at least a start and an end.
pub const MIN_ROUTE_POINTS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub coordinate: Coordinate,
    /// Display label, e.g. the address a search resolved from.
    pub label: Option<Arc<str>>,
}

impl From<Coordinate> for Waypoint {
    fn from(coordinate: Coordinate) -> Self {
        Self::new(coordinate)
    }
}

impl Waypoint {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<Arc<str>>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// One row of a GTFS `shapes.txt`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeRecord {
    pub shape_id: Arc<str>,
    /// Contiguous, starting at 1.
    pub sequence: u32,
    pub coordinate: Coordinate,
    pub distance_traveled: Distance,
}

/// An ordered, growable sequence of waypoints describing one route geometry.
///
/// Distances are never cached. Every call to [`Path::finalize`] or [`Path::distances`]
/// recomputes them from the current waypoints, so the path can keep changing between
/// calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    waypoints: Vec<Waypoint>,
}

impl Path {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn append(&mut self, waypoint: impl Into<Waypoint>) {
        self.waypoints.push(waypoint.into());
    }

    pub fn with(mut self, waypoint: impl Into<Waypoint>) -> Self {
        self.append(waypoint);
        self
    }

    pub fn remove_last(&mut self) -> Result<Waypoint, Error> {
        self.waypoints.pop().ok_or(Error::EmptyPath)
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn coordinates(&self) -> impl Iterator<Item = &Coordinate> {
        self.waypoints.iter().map(|waypoint| &waypoint.coordinate)
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn distances(&self) -> Vec<Distance> {
        cumulative(self.coordinates())
    }

    pub fn total_distance(&self) -> Distance {
        self.distances().last().copied().unwrap_or_default()
    }

    /// Emits one [`ShapeRecord`] per waypoint, all sharing `shape_id`.
    pub fn finalize(&self, shape_id: impl Into<Arc<str>>) -> Result<Vec<ShapeRecord>, Error> {
        if self.waypoints.len() < MIN_ROUTE_POINTS {
            return Err(Error::InsufficientPoints {
                required: MIN_ROUTE_POINTS,
                found: self.waypoints.len(),
            });
        }
        let now = Instant::now();
        let shape_id = shape_id.into();
        let records: Vec<ShapeRecord> = self
            .waypoints
            .iter()
            .zip(self.distances())
            .enumerate()
            .map(|(i, (waypoint, distance_traveled))| ShapeRecord {
                shape_id: shape_id.clone(),
                sequence: i as u32 + 1,
                coordinate: waypoint.coordinate,
                distance_traveled,
            })
            .collect();
        debug!(
            "Finalizing shape {} with {} points took {:?}",
            shape_id,
            records.len(),
            now.elapsed()
        );
        Ok(records)
    }

    /// Rebuilds a path from stored shape rows. Rows are ordered by sequence first, so the
    /// input may come back from storage in any order.
    pub fn from_shapes<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ShapeRecord>,
    {
        let mut records: Vec<&ShapeRecord> = records.into_iter().collect();
        records.sort_by_key(|record| record.sequence);
        Self {
            waypoints: records
                .into_iter()
                .map(|record| Waypoint::new(record.coordinate))
                .collect(),
        }
    }

    /// Builds a path from geocoded addresses, labelling each waypoint with its address.
    ///
    /// Fails on the first address that did not resolve.
    pub fn from_geocoded(addresses: &[String], results: &[GeocodeResult]) -> Result<Self, Error> {
        let mut path = Self::new();
        for result in results {
            let coordinate = result.coordinate.ok_or(Error::MissingCoordinate {
                index: result.input_index,
            })?;
            let mut waypoint = Waypoint::new(coordinate);
            if let Some(address) = addresses.get(result.input_index) {
                waypoint = waypoint.with_label(address.as_str());
            }
            path.append(waypoint);
        }
        Ok(path)
    }
}

impl FromIterator<Waypoint> for Path {
    fn from_iter<T: IntoIterator<Item = Waypoint>>(iter: T) -> Self {
        Self {
            waypoints: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<Coordinate> for Path {
    fn from_iter<T: IntoIterator<Item = Coordinate>>(iter: T) -> Self {
        iter.into_iter().map(Waypoint::new).collect()
    }
}

#[test]
fn remove_last_on_empty_path() {
    let mut path = Path::new();
    assert_eq!(path.remove_last(), Err(Error::EmptyPath));
}

#[test]
fn finalize_is_repeatable() {
    let mut path: Path = [Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0)]
        .into_iter()
        .collect();
    let first = path.finalize("r1").unwrap();
    assert_eq!(first, path.finalize("r1").unwrap());

    path.append(Coordinate::new(1.0, 1.0));
    let second = path.finalize("r1").unwrap();
    assert_eq!(second.len(), 3);
    assert_eq!(second[..2], first[..]);
}
