//! Public catalog routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Vehicle catalog routes mounted at `/vehicles`.
///
/// ```text
/// GET /          -> list_vehicles
/// GET /facets    -> vehicle_facets
/// GET /{slug}    -> get_vehicle
/// ```
pub fn vehicles_router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_vehicles))
        .route("/facets", get(catalog::vehicle_facets))
        .route("/{slug}", get(catalog::get_vehicle))
}

/// Gear catalog routes mounted at `/gear`.
///
/// ```text
/// GET /          -> list_gear
/// GET /facets    -> gear_facets
/// GET /{slug}    -> get_gear
/// ```
pub fn gear_router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_gear))
        .route("/facets", get(catalog::gear_facets))
        .route("/{slug}", get(catalog::get_gear))
}
