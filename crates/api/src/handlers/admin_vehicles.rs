//! Admin CRUD for vehicle listings.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use dealership_core::error::CoreError;
use dealership_core::pricing::validate_price;
use dealership_core::slug::is_valid_slug;
use dealership_core::types::DbId;
use dealership_db::models::status::VehicleStatus;
use dealership_db::models::vehicle::{CreateVehicle, UpdateVehicle};
use dealership_db::repositories::VehicleRepo;

use crate::error::{AppError, AppResult};
use crate::query::StatusParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Oldest model year accepted for a listing.
const MIN_YEAR: i32 = 1900;

/// Newest model year accepted for a listing.
const MAX_YEAR: i32 = 2100;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Vehicle",
        id,
    })
}

fn check_slug(slug: &str) -> Result<(), CoreError> {
    if !is_valid_slug(slug) {
        return Err(CoreError::Validation(format!(
            "Invalid slug '{slug}': use lowercase letters, digits and hyphens"
        )));
    }
    Ok(())
}

fn check_numbers(
    year: Option<i32>,
    price_cents: Option<i64>,
    mileage_km: Option<i32>,
) -> Result<(), CoreError> {
    if year.is_some_and(|y| !(MIN_YEAR..=MAX_YEAR).contains(&y)) {
        return Err(CoreError::Validation(format!(
            "year must be between {MIN_YEAR} and {MAX_YEAR}"
        )));
    }
    if let Some(price) = price_cents {
        validate_price("price_cents", price)?;
    }
    if mileage_km.is_some_and(|m| m < 0) {
        return Err(CoreError::Validation("mileage_km must not be negative".into()));
    }
    Ok(())
}

/// Engine displacement and power are optional but strictly positive when set.
fn check_specs(engine_cc: Option<i32>, power_hp: Option<i32>) -> Result<(), CoreError> {
    if engine_cc.is_some_and(|cc| cc <= 0) {
        return Err(CoreError::Validation("engine_cc must be positive".into()));
    }
    if power_hp.is_some_and(|hp| hp <= 0) {
        return Err(CoreError::Validation("power_hp must be positive".into()));
    }
    Ok(())
}

fn validate_create(input: &CreateVehicle) -> Result<(), CoreError> {
    if input.brand.trim().is_empty() || input.model.trim().is_empty() {
        return Err(CoreError::Validation("brand and model are required".into()));
    }
    check_numbers(Some(input.year), Some(input.price_cents), Some(input.mileage_km))?;
    check_specs(input.engine_cc, input.power_hp)?;
    check_slug(&input.resolved_slug())
}

fn validate_update(input: &UpdateVehicle) -> Result<(), CoreError> {
    if input.brand.as_deref().is_some_and(|b| b.trim().is_empty())
        || input.model.as_deref().is_some_and(|m| m.trim().is_empty())
    {
        return Err(CoreError::Validation("brand and model must not be blank".into()));
    }
    check_numbers(input.year, input.price_cents, input.mileage_km)?;
    check_specs(input.engine_cc.flatten(), input.power_hp.flatten())?;
    match &input.slug {
        Some(slug) => check_slug(slug),
        None => Ok(()),
    }
}

/// GET /api/v1/admin/vehicles
///
/// All listings regardless of status, optionally filtered by `?status=`.
pub async fn list_vehicles(
    State(state): State<AppState>,
    Query(params): Query<StatusParams>,
) -> AppResult<impl IntoResponse> {
    let status = params.parse::<VehicleStatus>()?;
    let vehicles = VehicleRepo::list(&state.pool, status).await?;
    Ok(Json(DataResponse { data: vehicles }))
}

/// POST /api/v1/admin/vehicles
pub async fn create_vehicle(
    State(state): State<AppState>,
    Json(input): Json<CreateVehicle>,
) -> AppResult<impl IntoResponse> {
    validate_create(&input)?;
    let vehicle = VehicleRepo::create(&state.pool, &input).await?;

    tracing::info!(vehicle_id = vehicle.id, slug = %vehicle.slug, "Vehicle created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: vehicle })))
}

/// GET /api/v1/admin/vehicles/{id}
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let vehicle = VehicleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: vehicle }))
}

/// PUT /api/v1/admin/vehicles/{id}
pub async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVehicle>,
) -> AppResult<impl IntoResponse> {
    validate_update(&input)?;
    let vehicle = VehicleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(vehicle_id = id, status = %vehicle.status, "Vehicle updated");

    Ok(Json(DataResponse { data: vehicle }))
}

/// DELETE /api/v1/admin/vehicles/{id}
pub async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !VehicleRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(vehicle_id = id, "Vehicle deleted");
    Ok(StatusCode::NO_CONTENT)
}
