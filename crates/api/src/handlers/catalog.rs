//! Public storefront catalog: vehicles, gear and the home page selection.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use dealership_core::catalog::{apply, facets};
use dealership_core::error::CoreError;
use dealership_db::models::gear::GearProductView;
use dealership_db::models::vehicle::Vehicle;
use dealership_db::repositories::{GearProductRepo, VehicleRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::query::CatalogParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of featured vehicles shown on the home page.
const HOME_FEATURED_VEHICLES: i64 = 6;

/// Number of featured gear products shown on the home page.
const HOME_FEATURED_GEAR: i64 = 8;

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub featured_vehicles: Vec<Vehicle>,
    pub featured_gear: Vec<GearProductView>,
}

/// GET /api/v1/home
pub async fn home(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let (vehicles, gear) = tokio::try_join!(
        VehicleRepo::list_featured(&state.pool, HOME_FEATURED_VEHICLES),
        GearProductRepo::list_featured(&state.pool, HOME_FEATURED_GEAR),
    )?;

    Ok(Json(DataResponse {
        data: HomeResponse {
            featured_vehicles: vehicles,
            featured_gear: gear.into_iter().map(GearProductView::from).collect(),
        },
    }))
}

// ---------------------------------------------------------------------------
// Vehicles
// ---------------------------------------------------------------------------

/// GET /api/v1/vehicles
///
/// Available and reserved vehicles, narrowed by the catalog query parameters.
pub async fn list_vehicles(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> AppResult<impl IntoResponse> {
    let (filter, sort) = params.into_filter()?;
    let vehicles = VehicleRepo::list_public(&state.pool).await?;

    Ok(Json(DataResponse {
        data: apply(vehicles, &filter, sort),
    }))
}

/// GET /api/v1/vehicles/facets
pub async fn vehicle_facets(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let vehicles = VehicleRepo::list_public(&state.pool).await?;
    Ok(Json(DataResponse {
        data: facets(&vehicles),
    }))
}

/// GET /api/v1/vehicles/{slug}
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let vehicle = VehicleRepo::find_public_by_slug(&state.pool, &slug)
        .await?
        .ok_or(CoreError::NotFoundByKey {
            entity: "Vehicle",
            key: slug,
        })?;

    Ok(Json(DataResponse { data: vehicle }))
}

// ---------------------------------------------------------------------------
// Gear
// ---------------------------------------------------------------------------

/// GET /api/v1/gear
///
/// Active gear products with their discount badge, narrowed by the catalog
/// query parameters.
pub async fn list_gear(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> AppResult<impl IntoResponse> {
    let (filter, sort) = params.into_filter()?;
    let products = GearProductRepo::list_active(&state.pool).await?;

    let views: Vec<GearProductView> = apply(products, &filter, sort)
        .into_iter()
        .map(GearProductView::from)
        .collect();

    Ok(Json(DataResponse { data: views }))
}

/// GET /api/v1/gear/facets
pub async fn gear_facets(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let products = GearProductRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse {
        data: facets(&products),
    }))
}

/// GET /api/v1/gear/{slug}
pub async fn get_gear(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let product = GearProductRepo::find_active_by_slug(&state.pool, &slug)
        .await?
        .ok_or(CoreError::NotFoundByKey {
            entity: "GearProduct",
            key: slug,
        })?;

    Ok(Json(DataResponse {
        data: GearProductView::from(product),
    }))
}
