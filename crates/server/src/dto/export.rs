use routesmith::{
    Error,
    path::{Path, Waypoint},
    shared::Coordinate,
};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct WaypointDto {
    pub latitude: f64,
    pub longitude: f64,
    pub label: Option<String>,
}

impl TryFrom<WaypointDto> for Waypoint {
    type Error = Error;

    fn try_from(value: WaypointDto) -> Result<Self, Self::Error> {
        let waypoint = Waypoint::new(Coordinate::try_new(value.latitude, value.longitude)?);
        Ok(match value.label {
            Some(label) => waypoint.with_label(label),
            None => waypoint,
        })
    }
}

pub fn path_from(waypoints: Vec<WaypointDto>) -> Result<Path, Error> {
    let mut path = Path::new();
    for waypoint in waypoints {
        path.append(Waypoint::try_from(waypoint)?);
    }
    Ok(path)
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShapeRequest {
    pub shape_id: String,
    pub waypoints: Vec<WaypointDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub waypoints: Vec<WaypointDto>,
}
