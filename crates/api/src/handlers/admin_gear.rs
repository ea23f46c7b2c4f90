//! Admin CRUD for gear products.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use dealership_core::error::CoreError;
use dealership_core::pricing::validate_price;
use dealership_core::slug::is_valid_slug;
use dealership_core::types::{Cents, DbId};
use dealership_db::models::gear::{CreateGearProduct, GearProductView, UpdateGearProduct};
use dealership_db::models::status::GearStatus;
use dealership_db::repositories::GearProductRepo;

use crate::error::{AppError, AppResult};
use crate::query::StatusParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "GearProduct",
        id,
    })
}

fn check_prices(price: Option<Cents>, compare: Option<Cents>) -> Result<(), CoreError> {
    if let Some(price) = price {
        validate_price("price_cents", price)?;
    }
    if let Some(compare) = compare {
        validate_price("compare_price_cents", compare)?;
    }
    Ok(())
}

fn validate_create(input: &CreateGearProduct) -> Result<(), CoreError> {
    if input.title.trim().is_empty() || input.category.trim().is_empty() {
        return Err(CoreError::Validation("title and category are required".into()));
    }
    check_prices(Some(input.price_cents), input.compare_price_cents)?;
    let slug = input.resolved_slug();
    if !is_valid_slug(&slug) {
        return Err(CoreError::Validation(format!("Invalid slug '{slug}'")));
    }
    Ok(())
}

fn validate_update(input: &UpdateGearProduct) -> Result<(), CoreError> {
    if input.title.as_deref().is_some_and(|t| t.trim().is_empty())
        || input.category.as_deref().is_some_and(|c| c.trim().is_empty())
    {
        return Err(CoreError::Validation("title and category must not be blank".into()));
    }
    check_prices(input.price_cents, input.compare_price_cents.flatten())?;
    if let Some(slug) = input.slug.as_deref().filter(|s| !is_valid_slug(s)) {
        return Err(CoreError::Validation(format!("Invalid slug '{slug}'")));
    }
    Ok(())
}

/// GET /api/v1/admin/gear
pub async fn list_gear(
    State(state): State<AppState>,
    Query(params): Query<StatusParams>,
) -> AppResult<impl IntoResponse> {
    let status = params.parse::<GearStatus>()?;
    let products: Vec<GearProductView> = GearProductRepo::list(&state.pool, status)
        .await?
        .into_iter()
        .map(GearProductView::from)
        .collect();
    Ok(Json(DataResponse { data: products }))
}

/// POST /api/v1/admin/gear
///
/// New products are drafts unless a status is given.
pub async fn create_gear(
    State(state): State<AppState>,
    Json(input): Json<CreateGearProduct>,
) -> AppResult<impl IntoResponse> {
    validate_create(&input)?;
    let product = GearProductRepo::create(&state.pool, &input).await?;

    tracing::info!(gear_id = product.id, slug = %product.slug, "Gear product created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: GearProductView::from(product),
        }),
    ))
}

/// GET /api/v1/admin/gear/{id}
pub async fn get_gear(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let product = GearProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse {
        data: GearProductView::from(product),
    }))
}

/// PUT /api/v1/admin/gear/{id}
pub async fn update_gear(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGearProduct>,
) -> AppResult<impl IntoResponse> {
    validate_update(&input)?;
    let product = GearProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(gear_id = id, status = %product.status, "Gear product updated");

    Ok(Json(DataResponse {
        data: GearProductView::from(product),
    }))
}

/// DELETE /api/v1/admin/gear/{id}
pub async fn delete_gear(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !GearProductRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(gear_id = id, "Gear product deleted");
    Ok(StatusCode::NO_CONTENT)
}
