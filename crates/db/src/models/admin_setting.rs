//! Admin settings row (single shared password).

use dealership_core::types::Timestamp;
use sqlx::FromRow;

/// The single row of the `admin_settings` table.
#[derive(Debug, Clone, FromRow)]
pub struct AdminSetting {
    pub id: i16,
    /// SHA-256 hex digest of the admin password; `None` until first changed.
    pub password_hash: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
