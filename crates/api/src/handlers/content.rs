//! Static storefront content and the travel-time estimate.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use dealership_core::content::{legal_page, SERVICES};
use dealership_core::error::CoreError;
use dealership_core::geo::{estimate_travel, Coordinates};
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/services
pub async fn list_services() -> impl IntoResponse {
    Json(DataResponse { data: SERVICES })
}

/// GET /api/v1/legal/{page}
pub async fn get_legal_page(Path(page): Path<String>) -> AppResult<impl IntoResponse> {
    let page = legal_page(&page).ok_or(CoreError::NotFoundByKey {
        entity: "LegalPage",
        key: page,
    })?;
    Ok(Json(DataResponse { data: page }))
}

#[derive(Debug, Deserialize)]
pub struct TravelParams {
    pub lat: f64,
    pub lng: f64,
}

/// GET /api/v1/travel-estimate?lat=&lng=
///
/// Approximate road distance and driving time from the visitor to the
/// dealership.
pub async fn travel_estimate(
    State(state): State<AppState>,
    Query(params): Query<TravelParams>,
) -> AppResult<impl IntoResponse> {
    let from = Coordinates::new(params.lat, params.lng)?;
    let estimate = estimate_travel(from, state.config.dealership_location);
    Ok(Json(DataResponse { data: estimate }))
}
