use crate::{dto::GeocodeRequest, state::AppState};
use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use routesmith::geocode;
use std::sync::Arc;

pub async fn geocode(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GeocodeRequest>,
) -> Response {
    let results =
        geocode::resolve_all_with(&request.addresses, &state.resolver, &state.geocode_config)
            .await;
    Json(results).into_response()
}
