//! Repository for the `vehicles` table.

use dealership_core::types::DbId;
use sqlx::PgPool;

use crate::models::status::VehicleStatus;
use crate::models::vehicle::{CreateVehicle, UpdateVehicle, Vehicle};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, slug, brand, model, year, category, price_cents, mileage_km, \
    engine_cc, power_hp, license_category, color, description, images, \
    cover_image, status, is_featured, created_at, updated_at";

/// Statuses visible on the public site.
const PUBLIC_FILTER: &str = "status IN ('available', 'reserved')";

/// Provides CRUD operations for vehicle listings.
pub struct VehicleRepo;

impl VehicleRepo {
    /// Insert a new vehicle, returning the created row.
    ///
    /// The slug and cover image fall back to their derived defaults (see
    /// [`CreateVehicle::resolved_slug`]). A duplicate slug violates
    /// `uq_vehicles_slug`.
    pub async fn create(pool: &PgPool, input: &CreateVehicle) -> Result<Vehicle, sqlx::Error> {
        let query = format!(
            "INSERT INTO vehicles \
                 (slug, brand, model, year, category, price_cents, mileage_km, engine_cc, \
                  power_hp, license_category, color, description, images, cover_image, \
                  status, is_featured) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, \
                     COALESCE($15, 'available'::vehicle_status), $16) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(input.resolved_slug())
            .bind(&input.brand)
            .bind(&input.model)
            .bind(input.year)
            .bind(&input.category)
            .bind(input.price_cents)
            .bind(input.mileage_km)
            .bind(input.engine_cc)
            .bind(input.power_hp)
            .bind(&input.license_category)
            .bind(&input.color)
            .bind(&input.description)
            .bind(&input.images)
            .bind(input.resolved_cover_image())
            .bind(input.status)
            .bind(input.is_featured)
            .fetch_one(pool)
            .await
    }

    /// Find a vehicle by its internal ID, whatever its status.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Vehicle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vehicles WHERE id = $1");
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a publicly visible vehicle by slug (available or reserved).
    pub async fn find_public_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Vehicle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vehicles WHERE slug = $1 AND {PUBLIC_FILTER}");
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List all vehicles for the admin panel, newest first, optionally
    /// restricted to one status.
    pub async fn list(
        pool: &PgPool,
        status: Option<VehicleStatus>,
    ) -> Result<Vec<Vehicle>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vehicles \
             WHERE ($1::vehicle_status IS NULL OR status = $1) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// The full public catalog. Filtering and sorting happen in memory.
    pub async fn list_public(pool: &PgPool) -> Result<Vec<Vehicle>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vehicles WHERE {PUBLIC_FILTER} \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Vehicle>(&query).fetch_all(pool).await
    }

    /// Featured vehicles still on sale, for the home page.
    pub async fn list_featured(pool: &PgPool, limit: i64) -> Result<Vec<Vehicle>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vehicles \
             WHERE is_featured AND status = 'available' \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Partially update a vehicle. Only non-`None` fields are applied;
    /// `Some(None)` on a nullable column sets it to NULL.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVehicle,
    ) -> Result<Option<Vehicle>, sqlx::Error> {
        let query = format!(
            "UPDATE vehicles SET \
                 slug = COALESCE($2, slug), \
                 brand = COALESCE($3, brand), \
                 model = COALESCE($4, model), \
                 year = COALESCE($5, year), \
                 category = CASE WHEN $6 THEN $7 ELSE category END, \
                 price_cents = COALESCE($8, price_cents), \
                 mileage_km = COALESCE($9, mileage_km), \
                 engine_cc = CASE WHEN $10 THEN $11 ELSE engine_cc END, \
                 power_hp = CASE WHEN $12 THEN $13 ELSE power_hp END, \
                 license_category = CASE WHEN $14 THEN $15 ELSE license_category END, \
                 color = CASE WHEN $16 THEN $17 ELSE color END, \
                 description = CASE WHEN $18 THEN $19 ELSE description END, \
                 images = COALESCE($20, images), \
                 cover_image = CASE WHEN $21 THEN $22 ELSE cover_image END, \
                 status = COALESCE($23, status), \
                 is_featured = COALESCE($24, is_featured) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(id)
            .bind(&input.slug)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(input.year)
            .bind(input.category.is_some())
            .bind(input.category.as_ref().and_then(|v| v.as_deref()))
            .bind(input.price_cents)
            .bind(input.mileage_km)
            .bind(input.engine_cc.is_some())
            .bind(input.engine_cc.flatten())
            .bind(input.power_hp.is_some())
            .bind(input.power_hp.flatten())
            .bind(input.license_category.is_some())
            .bind(input.license_category.as_ref().and_then(|v| v.as_deref()))
            .bind(input.color.is_some())
            .bind(input.color.as_ref().and_then(|v| v.as_deref()))
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(|v| v.as_deref()))
            .bind(&input.images)
            .bind(input.cover_image.is_some())
            .bind(input.cover_image.as_ref().and_then(|v| v.as_deref()))
            .bind(input.status)
            .bind(input.is_featured)
            .fetch_optional(pool)
            .await
    }

    /// Delete a vehicle. Returns `true` if a row was removed.
    ///
    /// Leads referencing the vehicle keep their row with `vehicle_id` cleared.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of vehicles per status (statuses with no rows are omitted).
    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<(VehicleStatus, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (VehicleStatus, i64)>(
            "SELECT status, COUNT(*) FROM vehicles GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }
}
