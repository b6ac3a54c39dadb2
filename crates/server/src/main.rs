mod api;
mod dto;
mod resolver;
mod state;

use crate::state::AppState;
use axum::routing::post;
use std::sync::Arc;
use tracing::info;

const PORT: u32 = 3000;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    info!("Starting server...");
    let port = std::env::var("PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(PORT);
    let state = Arc::new(AppState::from_env().unwrap());

    let app = axum::Router::new()
        .route("/shapes", post(api::shapes))
        .route("/export/gpx", post(api::gpx))
        .route("/export/kml", post(api::kml))
        .route("/timetable", post(api::timetable))
        .route("/timetable.csv", post(api::timetable_csv))
        .route("/geocode", post(api::geocode))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .unwrap();
    info!("Listening to port {port}");
    axum::serve(listener, app).await.unwrap();
}
