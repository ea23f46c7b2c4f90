//! Repository for the single-row `admin_settings` table.

use sqlx::PgPool;

use crate::models::admin_setting::AdminSetting;

const COLUMNS: &str = "id, password_hash, created_at, updated_at";

/// Provides access to the stored admin password hash.
pub struct AdminSettingRepo;

impl AdminSettingRepo {
    /// Fetch the settings row. The migration seeds it, so `None` only occurs
    /// on a hand-modified database.
    pub async fn get(pool: &PgPool) -> Result<Option<AdminSetting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_settings WHERE id = 1");
        sqlx::query_as::<_, AdminSetting>(&query)
            .fetch_optional(pool)
            .await
    }

    /// The stored password hash, if the password was ever changed.
    pub async fn get_password_hash(pool: &PgPool) -> Result<Option<String>, sqlx::Error> {
        Ok(Self::get(pool).await?.and_then(|s| s.password_hash))
    }

    /// Replace the stored password hash (upserting the settings row).
    pub async fn set_password_hash(
        pool: &PgPool,
        password_hash: &str,
    ) -> Result<AdminSetting, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_settings (id, password_hash) VALUES (1, $1) \
             ON CONFLICT (id) DO UPDATE SET password_hash = EXCLUDED.password_hash \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminSetting>(&query)
            .bind(password_hash)
            .fetch_one(pool)
            .await
    }
}
