//! Vehicle listing model and DTOs.

use dealership_core::catalog::CatalogItem;
use dealership_core::slug::vehicle_slug;
use dealership_core::types::{Cents, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::double_option;
use super::status::VehicleStatus;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `vehicles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vehicle {
    pub id: DbId,
    pub slug: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub category: Option<String>,
    pub price_cents: Cents,
    pub mileage_km: i32,
    pub engine_cc: Option<i32>,
    pub power_hp: Option<i32>,
    pub license_category: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub cover_image: Option<String>,
    pub status: VehicleStatus,
    pub is_featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CatalogItem for Vehicle {
    fn title(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    fn brand(&self) -> Option<&str> {
        Some(&self.brand)
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
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

    fn engine_cc(&self) -> Option<i32> {
        self.engine_cc
    }

    fn year(&self) -> Option<i32> {
        Some(self.year)
    }

    fn mileage_km(&self) -> Option<i32> {
        Some(self.mileage_km)
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for creating a vehicle listing.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVehicle {
    /// Derived from brand, model and year when omitted.
    pub slug: Option<String>,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub category: Option<String>,
    pub price_cents: Cents,
    #[serde(default)]
    pub mileage_km: i32,
    pub engine_cc: Option<i32>,
    pub power_hp: Option<i32>,
    pub license_category: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    /// Defaults to the first image when omitted.
    pub cover_image: Option<String>,
    pub status: Option<VehicleStatus>,
    #[serde(default)]
    pub is_featured: bool,
}

impl CreateVehicle {
    pub fn resolved_slug(&self) -> String {
        match &self.slug {
            Some(slug) if !slug.trim().is_empty() => slug.trim().to_string(),
            _ => vehicle_slug(&self.brand, &self.model, self.year),
        }
    }

    pub fn resolved_cover_image(&self) -> Option<String> {
        self.cover_image
            .clone()
            .or_else(|| self.images.first().cloned())
    }
}

/// DTO for partially updating a vehicle listing.
///
/// Absent fields are left unchanged. Nullable columns use
/// `Option<Option<T>>` so that an explicit `null` clears them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVehicle {
    pub slug: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub category: Option<Option<String>>,
    pub price_cents: Option<Cents>,
    pub mileage_km: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub engine_cc: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub power_hp: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub license_category: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub color: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub images: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub cover_image: Option<Option<String>>,
    pub status: Option<VehicleStatus>,
    pub is_featured: Option<bool>,
}
