//! Shared query parameter types for API handlers.

use std::str::FromStr;

use dealership_core::catalog::{parse_brand_list, CatalogFilter, SortKey};
use dealership_core::error::CoreError;
use dealership_core::types::Cents;
use serde::Deserialize;

/// Catalog facet and sort parameters.
///
/// `?brand=Ducati,KTM&min_price_cents=500000&max_price_cents=1500000&min_cc=600&category=roadster&featured=true&sort=price_asc`
#[derive(Debug, Default, Deserialize)]
pub struct CatalogParams {
    pub brand: Option<String>,
    pub min_price_cents: Option<Cents>,
    pub max_price_cents: Option<Cents>,
    pub min_cc: Option<i32>,
    pub max_cc: Option<i32>,
    pub category: Option<String>,
    #[serde(default)]
    pub featured: bool,
    pub sort: Option<String>,
}

impl CatalogParams {
    /// Build a validated filter and sort order from the raw parameters.
    pub fn into_filter(self) -> Result<(CatalogFilter, SortKey), CoreError> {
        let filter = CatalogFilter {
            brands: self.brand.as_deref().map(parse_brand_list).unwrap_or_default(),
            min_price_cents: self.min_price_cents,
            max_price_cents: self.max_price_cents,
            min_engine_cc: self.min_cc,
            max_engine_cc: self.max_cc,
            category: self
                .category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            featured_only: self.featured,
        };
        filter.validate()?;

        let sort = match self.sort.as_deref().map(str::trim) {
            None | Some("") => SortKey::default(),
            Some(raw) => raw.parse()?,
        };

        Ok((filter, sort))
    }
}

/// Optional `?status=` filter for admin list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct StatusParams {
    pub status: Option<String>,
}

impl StatusParams {
    /// Parse the status into the given enum; empty means "no filter".
    pub fn parse<S>(&self) -> Result<Option<S>, CoreError>
    where
        S: FromStr<Err = CoreError>,
    {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some),
        }
    }
}
