use super::{bad_request, internal_error, text};
use crate::dto::TimetableRequest;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use routesmith::{export, schedule};

pub async fn timetable(Json(request): Json<TimetableRequest>) -> Result<Response, StatusCode> {
    let expanded = schedule::expand(&request.baseline, &request.frequency)
        .map_err(bad_request("Failed to expand timetable"))?;
    Ok(Json(expanded).into_response())
}

pub async fn timetable_csv(Json(request): Json<TimetableRequest>) -> Result<Response, StatusCode> {
    let expanded = schedule::expand(&request.baseline, &request.frequency)
        .map_err(bad_request("Failed to expand timetable"))?;
    let body = export::to_delimited_stop_times(&expanded)
        .map_err(internal_error("Failed to write stop times"))?;
    Ok(text("text/csv; charset=utf-8", body))
}
