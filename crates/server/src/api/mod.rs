mod export;
mod geocode;
mod timetable;
pub use export::*;
pub use geocode::*;
pub use timetable::*;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::fmt::Display;
use tracing::error;

fn bad_request(context: &str) -> impl FnOnce(routesmith::Error) -> StatusCode + '_ {
    move |err| {
        error!("{context}: {err}");
        StatusCode::BAD_REQUEST
    }
}

fn internal_error<E: Display>(context: &str) -> impl FnOnce(E) -> StatusCode + '_ {
    move |err| {
        error!("{context}: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn text(content_type: &'static str, body: String) -> Response {
    ([(header::CONTENT_TYPE, content_type)], body).into_response()
}
