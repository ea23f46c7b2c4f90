//! Repository for the `gear_products` table.

use dealership_core::types::DbId;
use sqlx::PgPool;

use crate::models::gear::{CreateGearProduct, GearProduct, UpdateGearProduct};
use crate::models::status::GearStatus;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, slug, title, brand, category, product_type, description, price_cents, \
    compare_price_cents, images, cover_image, sizes, status, is_featured, \
    created_at, updated_at";

/// Provides CRUD operations for gear products.
pub struct GearProductRepo;

impl GearProductRepo {
    /// Insert a new product, returning the created row. New products are
    /// drafts unless a status is given.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGearProduct,
    ) -> Result<GearProduct, sqlx::Error> {
        let query = format!(
            "INSERT INTO gear_products \
                 (slug, title, brand, category, product_type, description, price_cents, \
                  compare_price_cents, images, cover_image, sizes, status, is_featured) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, \
                     COALESCE($12, 'draft'::gear_status), $13) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GearProduct>(&query)
            .bind(input.resolved_slug())
            .bind(&input.title)
            .bind(&input.brand)
            .bind(&input.category)
            .bind(&input.product_type)
            .bind(&input.description)
            .bind(input.price_cents)
            .bind(input.compare_price_cents)
            .bind(&input.images)
            .bind(input.resolved_cover_image())
            .bind(&input.sizes)
            .bind(input.status)
            .bind(input.is_featured)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GearProduct>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gear_products WHERE id = $1");
        sqlx::query_as::<_, GearProduct>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active product by slug.
    pub async fn find_active_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<GearProduct>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM gear_products WHERE slug = $1 AND status = 'active'");
        sqlx::query_as::<_, GearProduct>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the active products among `ids`. Unknown or inactive ids are
    /// silently absent from the result.
    pub async fn find_active_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<GearProduct>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM gear_products \
             WHERE id = ANY($1) AND status = 'active'"
        );
        sqlx::query_as::<_, GearProduct>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List all products for the admin panel, optionally by status.
    pub async fn list(
        pool: &PgPool,
        status: Option<GearStatus>,
    ) -> Result<Vec<GearProduct>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM gear_products \
             WHERE ($1::gear_status IS NULL OR status = $1) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, GearProduct>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// The full active catalog. Filtering and sorting happen in memory.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<GearProduct>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM gear_products WHERE status = 'active' \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, GearProduct>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn list_featured(pool: &PgPool, limit: i64) -> Result<Vec<GearProduct>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM gear_products \
             WHERE is_featured AND status = 'active' \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, GearProduct>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Partially update a product. Only non-`None` fields are applied;
    /// `Some(None)` on a nullable column sets it to NULL.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGearProduct,
    ) -> Result<Option<GearProduct>, sqlx::Error> {
        let query = format!(
            "UPDATE gear_products SET \
                 slug = COALESCE($2, slug), \
                 title = COALESCE($3, title), \
                 brand = CASE WHEN $4 THEN $5 ELSE brand END, \
                 category = COALESCE($6, category), \
                 product_type = CASE WHEN $7 THEN $8 ELSE product_type END, \
                 description = CASE WHEN $9 THEN $10 ELSE description END, \
                 price_cents = COALESCE($11, price_cents), \
                 compare_price_cents = CASE WHEN $12 THEN $13 ELSE compare_price_cents END, \
                 images = COALESCE($14, images), \
                 cover_image = CASE WHEN $15 THEN $16 ELSE cover_image END, \
                 sizes = COALESCE($17, sizes), \
                 status = COALESCE($18, status), \
                 is_featured = COALESCE($19, is_featured) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GearProduct>(&query)
            .bind(id)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(input.brand.is_some())
            .bind(input.brand.as_ref().and_then(|v| v.as_deref()))
            .bind(&input.category)
            .bind(input.product_type.is_some())
            .bind(input.product_type.as_ref().and_then(|v| v.as_deref()))
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(|v| v.as_deref()))
            .bind(input.price_cents)
            .bind(input.compare_price_cents.is_some())
            .bind(input.compare_price_cents.flatten())
            .bind(&input.images)
            .bind(input.cover_image.is_some())
            .bind(input.cover_image.as_ref().and_then(|v| v.as_deref()))
            .bind(&input.sizes)
            .bind(input.status)
            .bind(input.is_featured)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM gear_products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<(GearStatus, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (GearStatus, i64)>(
            "SELECT status, COUNT(*) FROM gear_products GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }
}
