use serde::de::DeserializeOwned;
use std::{
    collections::{HashMap, HashSet},
    fs::File,
    io::{self, Read},
    path::PathBuf,
    time::Instant,
};
use thiserror::Error;
use tracing::debug;
use zip::{ZipArchive, read::ZipFile};

use crate::{
    path::ShapeRecord,
    schedule::StopTimeBaseline,
    shared::{
        geo::{Coordinate, Distance},
        time::Time,
    },
};

mod config;
pub mod models;
pub use config::*;
use models::*;

/// Stop name used when a stop time references a stop missing from `stops.txt`.
pub const UNKNOWN_STOP_NAME: &str = "N/A";

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not find file with name: {0}")]
    FileNotFound(String),
    #[error("No stop times for trip: {0}")]
    TripNotFound(String),
    #[error("No points for shape: {0}")]
    ShapeNotFound(String),
    #[error(transparent)]
    Engine(#[from] crate::Error),
}

#[derive(Debug, Default)]
pub enum StorageType {
    #[default]
    None,
    Zip(PathBuf),
    Directory(PathBuf),
}

/// Streams the tables this crate needs out of a GTFS feed, either zipped or extracted.
#[derive(Debug, Default)]
pub struct GtfsReader {
    config: Config,
    storage: StorageType,
}

impl GtfsReader {
    pub fn new(config: self::Config) -> Self {
        Self {
            config,
            storage: Default::default(),
        }
    }

    pub fn from_zip(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage = StorageType::Zip(path.into());
        self
    }

    pub fn from_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage = StorageType::Directory(path.into());
        self
    }

    pub fn stream_stops<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsStop)),
    {
        self.stream(&self.config.stops_file_name, f)
    }

    pub fn stream_stop_times<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsStopTime)),
    {
        self.stream(&self.config.stop_times_file_name, f)
    }

    pub fn stream_shapes<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsShape)),
    {
        self.stream(&self.config.shapes_file_name, f)
    }

    pub fn stream_trips<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsTrip)),
    {
        self.stream(&self.config.trips_file_name, f)
    }

    /// All trip ids of a route, in feed order.
    pub fn trips_for_route(&self, route_id: &str) -> Result<Vec<String>, self::Error> {
        let mut trips = Vec::new();
        self.stream_trips(|(_, trip)| {
            if trip.route_id == route_id {
                trips.push(trip.trip_id);
            }
        })?;
        Ok(trips)
    }

    /// The first trip of a route for each `service_id`, in feed order.
    ///
    /// Trips sharing a service pattern only differ by start time, so one of them is enough
    /// to seed a frequency-based timetable.
    pub fn trips_by_service(&self, route_id: &str) -> Result<Vec<GtfsTrip>, self::Error> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut trips = Vec::new();
        self.stream_trips(|(_, trip)| {
            if trip.route_id == route_id && seen.insert(trip.service_id.clone()) {
                trips.push(trip);
            }
        })?;
        Ok(trips)
    }

    /// The baseline stop times of one trip, ordered by `stop_sequence`.
    ///
    /// Stops with neither an arrival nor a departure time are left out.
    pub fn trip_baseline(&self, trip_id: &str) -> Result<Vec<StopTimeBaseline>, self::Error> {
        debug!("Loading baseline for trip {trip_id}...");
        let now = Instant::now();

        let mut stop_names: HashMap<String, String> = HashMap::new();
        self.stream_stops(|(_, stop)| {
            if let Some(name) = stop.stop_name {
                stop_names.insert(stop.stop_id, name);
            }
        })?;

        let mut stop_times: Vec<GtfsStopTime> = Vec::new();
        self.stream_stop_times(|(_, stop_time)| {
            if stop_time.trip_id == trip_id {
                stop_times.push(stop_time);
            }
        })?;
        if stop_times.is_empty() {
            return Err(self::Error::TripNotFound(trip_id.to_string()));
        }
        stop_times.sort_by_key(|stop_time| stop_time.stop_sequence);

        // Non-timepoint stops carry no times of their own.
        stop_times.retain(|stop_time| {
            let timed = non_empty(&stop_time.arrival_time).is_some()
                || non_empty(&stop_time.departure_time).is_some();
            if !timed {
                debug!("Skipping untimed stop {} on trip {trip_id}", stop_time.stop_id);
            }
            timed
        });

        let baseline = stop_times
            .into_iter()
            .map(|stop_time| -> Result<StopTimeBaseline, self::Error> {
                let departure = non_empty(&stop_time.departure_time);
                let arrival = non_empty(&stop_time.arrival_time)
                    .or(departure)
                    .unwrap_or_default();
                let arrival = Time::from_gtfs(arrival)?;
                let departure = match departure {
                    Some(departure) => Time::from_gtfs(departure)?,
                    None => arrival,
                };
                let name = stop_names
                    .get(&stop_time.stop_id)
                    .map(String::as_str)
                    .unwrap_or(UNKNOWN_STOP_NAME);
                Ok(StopTimeBaseline::new(
                    stop_time.stop_id.as_str(),
                    name,
                    arrival,
                    departure,
                )?)
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Loading baseline for trip {trip_id} took {:?}", now.elapsed());
        Ok(baseline)
    }

    /// Every point of one shape, ordered by `shape_pt_sequence`.
    pub fn shapes(&self, shape_id: &str) -> Result<Vec<ShapeRecord>, self::Error> {
        let mut shapes: Vec<ShapeRecord> = Vec::new();
        self.stream_shapes(|(_, shape)| {
            if shape.shape_id == shape_id {
                shapes.push(shape.into());
            }
        })?;
        if shapes.is_empty() {
            return Err(self::Error::ShapeNotFound(shape_id.to_string()));
        }
        shapes.sort_by_key(|shape| shape.sequence);
        Ok(shapes)
    }

    fn stream<T, F>(&self, file_name: &str, f: F) -> Result<(), self::Error>
    where
        T: DeserializeOwned,
        F: FnMut((usize, T)),
    {
        match &self.storage {
            StorageType::None => Ok(()),
            StorageType::Zip(path) => {
                let zip_file = File::open(path)?;
                let mut archive = ZipArchive::new(zip_file)?;
                let file = get_file(&mut archive, file_name)?;
                stream_csv(file, f)
            }
            StorageType::Directory(path) => {
                let path = path.join(file_name);
                if !path.is_file() {
                    return Err(self::Error::FileNotFound(file_name.to_string()));
                }
                stream_csv(File::open(path)?, f)
            }
        }
    }
}

/// Parses `shapes.txt` content from any reader, e.g. an uploaded file.
///
/// Rows keep their file order. Missing `shape_dist_traveled` values read as zero.
pub fn read_shapes<R: Read>(reader: R) -> Result<Vec<ShapeRecord>, self::Error> {
    let mut shapes = Vec::new();
    stream_csv(reader, |(_, shape): (usize, GtfsShape)| shapes.push(shape.into()))?;
    Ok(shapes)
}

impl From<GtfsShape> for ShapeRecord {
    fn from(value: GtfsShape) -> Self {
        Self {
            shape_id: value.shape_id.into(),
            sequence: value.shape_pt_sequence,
            coordinate: Coordinate::new(value.shape_pt_lat, value.shape_pt_lon),
            distance_traveled: Distance::from_kilometers(
                value.shape_dist_traveled.unwrap_or_default(),
            ),
        }
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

fn stream_csv<R, T, F>(reader: R, mut f: F) -> Result<(), self::Error>
where
    R: Read,
    T: DeserializeOwned,
    F: FnMut((usize, T)),
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    for (i, row) in reader.deserialize().enumerate() {
        f((i, row?));
    }
    Ok(())
}

fn get_file<'a>(
    archive: &'a mut ZipArchive<File>,
    name: &'a str,
) -> Result<ZipFile<'a, File>, self::Error> {
    let index = archive
        .index_for_name(name)
        .ok_or(self::Error::FileNotFound(name.to_string()))?;
    let file = archive.by_index(index)?;
    Ok(file)
}
