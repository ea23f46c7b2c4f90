//! Admin lead pipeline.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use dealership_core::error::CoreError;
use dealership_core::types::DbId;
use dealership_db::models::lead::UpdateLead;
use dealership_db::models::status::LeadStatus;
use dealership_db::repositories::LeadRepo;

use crate::error::{AppError, AppResult};
use crate::query::StatusParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Lead", id })
}

/// GET /api/v1/admin/leads
///
/// Newest first, optionally restricted to one status with `?status=`.
pub async fn list_leads(
    State(state): State<AppState>,
    Query(params): Query<StatusParams>,
) -> AppResult<impl IntoResponse> {
    let status = params.parse::<LeadStatus>()?;
    let leads = LeadRepo::list(&state.pool, status).await?;
    Ok(Json(DataResponse { data: leads }))
}

/// GET /api/v1/admin/leads/{id}
pub async fn get_lead(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let lead = LeadRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: lead }))
}

/// PUT /api/v1/admin/leads/{id}
///
/// Move a lead to any status and/or replace its notes.
pub async fn update_lead(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLead>,
) -> AppResult<impl IntoResponse> {
    let lead = LeadRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(lead_id = id, status = %lead.status, "Lead updated");

    Ok(Json(DataResponse { data: lead }))
}

/// DELETE /api/v1/admin/leads/{id}
pub async fn delete_lead(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !LeadRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(lead_id = id, "Lead deleted");
    Ok(StatusCode::NO_CONTENT)
}
