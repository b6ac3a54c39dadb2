use csv::{Terminator, Writer, WriterBuilder};

use crate::{
    path::ShapeRecord,
    schedule::{ExpandedStopTime, weekday_name},
};

use super::{Error, into_string};

pub const SHAPES_HEADER: [&str; 5] = [
    "shape_id",
    "shape_pt_lat",
    "shape_pt_lon",
    "shape_pt_sequence",
    "shape_dist_traveled",
];

pub const STOP_TIMES_HEADER: [&str; 5] = [
    "stop_id",
    "stop_name",
    "weekday",
    "arrival_time",
    "departure_time",
];

/// Renders a GTFS `shapes.txt`. Distances are kilometers with four decimals.
pub fn to_delimited_shapes(records: &[ShapeRecord]) -> Result<String, Error> {
    let mut writer = writer();
    writer.write_record(SHAPES_HEADER)?;
    for record in records {
        writer.write_record([
            record.shape_id.to_string(),
            record.coordinate.latitude.to_string(),
            record.coordinate.longitude.to_string(),
            record.sequence.to_string(),
            format!("{:.4}", record.distance_traveled.as_kilometers()),
        ])?;
    }
    finish(writer)
}

pub fn to_delimited_stop_times(stop_times: &[ExpandedStopTime]) -> Result<String, Error> {
    let mut writer = writer();
    writer.write_record(STOP_TIMES_HEADER)?;
    for stop_time in stop_times {
        let arrival = stop_time.arrival_time.to_string();
        let departure = stop_time.departure_time.to_string();
        writer.write_record([
            &*stop_time.stop_id,
            &*stop_time.stop_name,
            weekday_name(stop_time.weekday),
            arrival.as_str(),
            departure.as_str(),
        ])?;
    }
    finish(writer)
}

fn writer() -> Writer<Vec<u8>> {
    WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String, Error> {
    let bytes = writer
        .into_inner()
        .map_err(|err| Error::Io(err.into_error()))?;
    into_string(bytes)
}
