//! Gear product model, DTOs and the public view with discount badge.

use dealership_core::catalog::CatalogItem;
use dealership_core::pricing::discount_percent;
use dealership_core::slug::slugify;
use dealership_core::types::{Cents, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::double_option;
use super::status::GearStatus;

/// A row from the `gear_products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GearProduct {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub brand: Option<String>,
    pub category: String,
    pub product_type: Option<String>,
    pub description: Option<String>,
    pub price_cents: Cents,
    pub compare_price_cents: Option<Cents>,
    pub images: Vec<String>,
    pub cover_image: Option<String>,
    pub sizes: Vec<String>,
    pub status: GearStatus,
    pub is_featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CatalogItem for GearProduct {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn price_cents(&self) -> Cents {
        self.price_cents
    }

    fn is_featured(&self) -> bool {
        self.is_featured
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

/// Gear product as exposed by the storefront.
///
/// `discount_percent` is present only when the compare-at price is strictly
/// higher than the price.
#[derive(Debug, Clone, Serialize)]
pub struct GearProductView {
    #[serde(flatten)]
    pub product: GearProduct,
    pub discount_percent: Option<u8>,
}

impl From<GearProduct> for GearProductView {
    fn from(product: GearProduct) -> Self {
        let discount_percent = discount_percent(product.price_cents, product.compare_price_cents);
        Self {
            product,
            discount_percent,
        }
    }
}

/// DTO for creating a gear product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGearProduct {
    /// Derived from the title when omitted.
    pub slug: Option<String>,
    pub title: String,
    pub brand: Option<String>,
    pub category: String,
    pub product_type: Option<String>,
    pub description: Option<String>,
    pub price_cents: Cents,
    pub compare_price_cents: Option<Cents>,
    #[serde(default)]
    pub images: Vec<String>,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    pub status: Option<GearStatus>,
    #[serde(default)]
    pub is_featured: bool,
}

impl CreateGearProduct {
    pub fn resolved_slug(&self) -> String {
        match &self.slug {
            Some(slug) if !slug.trim().is_empty() => slug.trim().to_string(),
            _ => slugify(&self.title),
        }
    }

    pub fn resolved_cover_image(&self) -> Option<String> {
        self.cover_image
            .clone()
            .or_else(|| self.images.first().cloned())
    }
}

/// DTO for partially updating a gear product.
///
/// Absent fields are left unchanged; `null` clears a nullable column, e.g.
/// `{"compare_price_cents": null}` removes the discount badge.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGearProduct {
    pub slug: Option<String>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub brand: Option<Option<String>>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub product_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub price_cents: Option<Cents>,
    #[serde(default, deserialize_with = "double_option")]
    pub compare_price_cents: Option<Option<Cents>>,
    pub images: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub cover_image: Option<Option<String>>,
    pub sizes: Option<Vec<String>>,
    pub status: Option<GearStatus>,
    pub is_featured: Option<bool>,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn product(price: Cents, compare: Option<Cents>) -> GearProduct {
        GearProduct {
            id: 1,
            slug: "jacket".into(),
            title: "Jacket".into(),
            brand: None,
            category: "jackets".into(),
            product_type: None,
            description: None,
            price_cents: price,
            compare_price_cents: compare,
            images: vec![],
            cover_image: None,
            sizes: vec!["M".into()],
            status: GearStatus::Active,
            is_featured: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn view_shows_discount_only_when_compare_is_higher() {
        let view = GearProductView::from(product(15_000, Some(20_000)));
        assert_eq!(view.discount_percent, Some(25));

        let view = GearProductView::from(product(20_000, Some(20_000)));
        assert_eq!(view.discount_percent, None);

        let view = GearProductView::from(product(20_000, Some(18_000)));
        assert_eq!(view.discount_percent, None);
    }

    #[test]
    fn view_serializes_flat() {
        let json = serde_json::to_value(GearProductView::from(product(15_000, Some(20_000))))
            .unwrap();
        assert_eq!(json["title"], "Jacket");
        assert_eq!(json["discount_percent"], 25);
        assert_eq!(json["status"], "active");
    }
}
