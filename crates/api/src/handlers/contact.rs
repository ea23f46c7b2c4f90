//! Public contact form.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use dealership_core::error::CoreError;
use dealership_core::types::DbId;
use dealership_db::models::lead::{CreateLead, Lead, DEFAULT_LEAD_SOURCE};
use dealership_db::repositories::{LeadRepo, VehicleRepo};
use dealership_notify::templates::{lead_notification, LeadContact};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(max = 200))]
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
    pub vehicle_id: Option<DbId>,
    #[validate(length(max = 100))]
    pub interest: Option<String>,
    #[validate(length(max = 50))]
    pub source: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// POST /api/v1/contact
///
/// Record a lead with status `new_lead` and notify the dealership. The
/// notification is best effort: a delivery failure is logged and the lead
/// is still accepted.
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(input): Json<ContactRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if input.first_name.trim().is_empty()
        || input.last_name.trim().is_empty()
        || input.message.trim().is_empty()
    {
        return Err(CoreError::Validation("Name and message must not be blank".into()).into());
    }

    let vehicle = match input.vehicle_id {
        Some(id) => Some(VehicleRepo::find_by_id(&state.pool, id).await?.ok_or(
            CoreError::Validation(format!("Vehicle {id} does not exist")),
        )?),
        None => None,
    };

    let lead = LeadRepo::create(
        &state.pool,
        &CreateLead {
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            email: input.email.trim().to_string(),
            phone: non_blank(input.phone),
            subject: non_blank(input.subject),
            message: input.message.trim().to_string(),
            vehicle_id: input.vehicle_id,
            interest: non_blank(input.interest),
            source: non_blank(input.source).unwrap_or_else(|| DEFAULT_LEAD_SOURCE.to_string()),
        },
    )
    .await?;

    tracing::info!(lead_id = lead.id, source = %lead.source, "Lead created");

    let vehicle_title = vehicle.map(|v| format!("{} {} ({})", v.brand, v.model, v.year));
    spawn_lead_notification(&state, &lead, vehicle_title);

    Ok((StatusCode::CREATED, Json(DataResponse { data: lead })))
}

fn spawn_lead_notification(state: &AppState, lead: &Lead, vehicle: Option<String>) {
    let message = lead_notification(
        &state.config.merchant_email,
        &LeadContact {
            full_name: lead.full_name(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            subject: lead.subject.clone(),
            message: lead.message.clone(),
            vehicle,
            interest: lead.interest.clone(),
        },
    );
    let mailer = state.mailer.clone();
    let lead_id = lead.id;

    tokio::spawn(async move {
        if let Err(e) = mailer.send(&message).await {
            tracing::warn!(lead_id, error = %e, "Lead notification email failed");
        }
    });
}
