//! Lead (contact request) model and DTOs.

use dealership_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::double_option;
use super::status::LeadStatus;

/// Default `source` for leads created by the public contact form.
pub const DEFAULT_LEAD_SOURCE: &str = "website";

/// A row from the `leads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lead {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub vehicle_id: Option<DbId>,
    pub interest: Option<String>,
    pub source: String,
    pub status: LeadStatus,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Lead {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// DTO for inserting a lead. New leads always start as `new_lead`.
#[derive(Debug, Clone)]
pub struct CreateLead {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub vehicle_id: Option<DbId>,
    pub interest: Option<String>,
    pub source: String,
}

/// DTO for the admin lead editor. `"notes": null` clears the notes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLead {
    pub status: Option<LeadStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}
