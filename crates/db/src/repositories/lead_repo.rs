//! Repository for the `leads` table.

use dealership_core::types::DbId;
use sqlx::PgPool;

use crate::models::lead::{CreateLead, Lead, UpdateLead};
use crate::models::status::LeadStatus;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, first_name, last_name, email, phone, subject, message, vehicle_id, \
    interest, source, status, notes, created_at, updated_at";

/// Provides CRUD operations for leads.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a new lead with status `new_lead`.
    pub async fn create(pool: &PgPool, input: &CreateLead) -> Result<Lead, sqlx::Error> {
        let query = format!(
            "INSERT INTO leads \
                 (first_name, last_name, email, phone, subject, message, vehicle_id, \
                  interest, source) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.subject)
            .bind(&input.message)
            .bind(input.vehicle_id)
            .bind(&input.interest)
            .bind(&input.source)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE id = $1");
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List leads newest first, optionally restricted to one pipeline stage.
    pub async fn list(pool: &PgPool, status: Option<LeadStatus>) -> Result<Vec<Lead>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leads \
             WHERE ($1::lead_status IS NULL OR status = $1) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Lead>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leads ORDER BY created_at DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update the pipeline status and/or internal notes. `Some(None)`
    /// clears the notes.
    ///
    /// Transitions are free-form: any status can follow any other.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLead,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!(
            "UPDATE leads SET \
                 status = COALESCE($2, status), \
                 notes = CASE WHEN $3 THEN $4 ELSE notes END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(input.status)
            .bind(input.notes.is_some())
            .bind(input.notes.as_ref().and_then(|v| v.as_deref()))
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<(LeadStatus, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (LeadStatus, i64)>(
            "SELECT status, COUNT(*) FROM leads GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }
}
