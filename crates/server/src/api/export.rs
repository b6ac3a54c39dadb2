use super::{bad_request, internal_error, text};
use crate::dto::{ExportRequest, ShapeRequest, path_from};
use axum::{Json, http::StatusCode, response::Response};
use routesmith::export;

pub async fn shapes(Json(request): Json<ShapeRequest>) -> Result<Response, StatusCode> {
    let path = path_from(request.waypoints).map_err(bad_request("Invalid waypoint"))?;
    let records = path
        .finalize(request.shape_id)
        .map_err(bad_request("Failed to finalize path"))?;
    let body =
        export::to_delimited_shapes(&records).map_err(internal_error("Failed to write shapes"))?;
    Ok(text("text/csv; charset=utf-8", body))
}

pub async fn gpx(Json(request): Json<ExportRequest>) -> Result<Response, StatusCode> {
    let path = path_from(request.waypoints).map_err(bad_request("Invalid waypoint"))?;
    let body = export::to_track_xml(&path, &request.title, &request.description)
        .map_err(internal_error("Failed to write gpx"))?;
    Ok(text("application/gpx+xml", body))
}

pub async fn kml(Json(request): Json<ExportRequest>) -> Result<Response, StatusCode> {
    let path = path_from(request.waypoints).map_err(bad_request("Invalid waypoint"))?;
    let body = export::to_placemark_xml(&path, &request.title, &request.description)
        .map_err(internal_error("Failed to write kml"))?;
    Ok(text("application/vnd.google-earth.kml+xml", body))
}
