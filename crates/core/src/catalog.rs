//! Catalog filtering, sorting and facet extraction.
//!
//! The storefront fetches a full public collection (vehicles or gear) and
//! narrows it in memory. Collections are small (dozens to low hundreds of
//! items) so every operation here is a plain linear scan followed by a
//! stable sort.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::{Cents, Timestamp};

// ---------------------------------------------------------------------------
// CatalogItem
// ---------------------------------------------------------------------------

/// Read-only view of a catalog entry used by the filter and sort functions.
///
/// Implemented by vehicle listings and gear products in the db crate.
pub trait CatalogItem {
    fn title(&self) -> String;
    fn brand(&self) -> Option<&str>;
    fn category(&self) -> Option<&str>;
    fn price_cents(&self) -> Cents;
    fn is_featured(&self) -> bool;
    fn created_at(&self) -> Timestamp;

    fn engine_cc(&self) -> Option<i32> {
        None
    }

    fn year(&self) -> Option<i32> {
        None
    }

    fn mileage_km(&self) -> Option<i32> {
        None
    }
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Facet selection applied to a catalog.
///
/// Empty / `None` facets match everything. Ranges are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Lower-cased brand names; empty means "any brand".
    pub brands: BTreeSet<String>,
    pub min_price_cents: Option<Cents>,
    pub max_price_cents: Option<Cents>,
    pub min_engine_cc: Option<i32>,
    pub max_engine_cc: Option<i32>,
    pub category: Option<String>,
    pub featured_only: bool,
}

impl CatalogFilter {
    /// Reject inverted ranges (`min > max`).
    pub fn validate(&self) -> Result<(), CoreError> {
        if let (Some(min), Some(max)) = (self.min_price_cents, self.max_price_cents) {
            if min > max {
                return Err(CoreError::Validation(format!(
                    "min_price ({min}) must not exceed max_price ({max})"
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.min_engine_cc, self.max_engine_cc) {
            if min > max {
                return Err(CoreError::Validation(format!(
                    "min_engine_cc ({min}) must not exceed max_engine_cc ({max})"
                )));
            }
        }
        Ok(())
    }

    /// Whether a single item satisfies every selected facet.
    pub fn matches<T: CatalogItem>(&self, item: &T) -> bool {
        if self.featured_only && !item.is_featured() {
            return false;
        }

        if !self.brands.is_empty() {
            let brand = item.brand().map(str::to_lowercase);
            match brand {
                Some(b) if self.brands.contains(&b) => {}
                _ => return false,
            }
        }

        let price = item.price_cents();
        if self.min_price_cents.is_some_and(|min| price < min) {
            return false;
        }
        if self.max_price_cents.is_some_and(|max| price > max) {
            return false;
        }

        if self.min_engine_cc.is_some() || self.max_engine_cc.is_some() {
            let Some(cc) = item.engine_cc() else {
                return false;
            };
            if self.min_engine_cc.is_some_and(|min| cc < min) {
                return false;
            }
            if self.max_engine_cc.is_some_and(|max| cc > max) {
                return false;
            }
        }

        if let Some(category) = &self.category {
            match item.category() {
                Some(c) if c.eq_ignore_ascii_case(category) => {}
                _ => return false,
            }
        }

        true
    }
}

/// Split a comma-separated brand facet (`"Ducati,KTM"`) into a lower-cased set.
pub fn parse_brand_list(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(|b| b.trim().to_lowercase())
        .filter(|b| !b.is_empty())
        .collect()
}

// ---------------------------------------------------------------------------
// Sort
// ---------------------------------------------------------------------------

/// Sort order selectable from the catalog UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    PriceAsc,
    PriceDesc,
    YearDesc,
    MileageAsc,
    TitleAsc,
}

impl SortKey {
    pub const ALL: &'static [SortKey] = &[
        SortKey::Newest,
        SortKey::Oldest,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::YearDesc,
        SortKey::MileageAsc,
        SortKey::TitleAsc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::PriceAsc => "price_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::YearDesc => "year_desc",
            SortKey::MileageAsc => "mileage_asc",
            SortKey::TitleAsc => "title_asc",
        }
    }

    fn compare<T: CatalogItem>(self, a: &T, b: &T) -> Ordering {
        match self {
            SortKey::Newest => b.created_at().cmp(&a.created_at()),
            SortKey::Oldest => a.created_at().cmp(&b.created_at()),
            SortKey::PriceAsc => a.price_cents().cmp(&b.price_cents()),
            SortKey::PriceDesc => b.price_cents().cmp(&a.price_cents()),
            // Items without a year / mileage sort last.
            SortKey::YearDesc => cmp_missing_last(b.year(), a.year(), true),
            SortKey::MileageAsc => cmp_missing_last(a.mileage_km(), b.mileage_km(), false),
            SortKey::TitleAsc => a.title().to_lowercase().cmp(&b.title().to_lowercase()),
        }
    }
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = SortKey::ALL.iter().map(|k| k.as_str()).collect();
                CoreError::Validation(format!(
                    "Unknown sort '{s}'. Must be one of: {}",
                    valid.join(", ")
                ))
            })
    }
}

/// Compare optional values, keeping `None` after every `Some`.
///
/// `swapped` is true when the caller already swapped the operands to get a
/// descending order, in which case the `None` placement is swapped back.
fn cmp_missing_last(a: Option<i32>, b: Option<i32>, swapped: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (None, None) => Ordering::Equal,
        (Some(_), None) if swapped => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) if swapped => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
    }
}

/// Filter then sort a catalog collection.
pub fn apply<T: CatalogItem>(items: Vec<T>, filter: &CatalogFilter, sort: SortKey) -> Vec<T> {
    let mut selected: Vec<T> = items.into_iter().filter(|i| filter.matches(i)).collect();
    selected.sort_by(|a, b| sort.compare(a, b));
    selected
}

// ---------------------------------------------------------------------------
// Facets
// ---------------------------------------------------------------------------

/// Values available for each facet across a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogFacets {
    pub brands: Vec<String>,
    pub categories: Vec<String>,
    pub min_price_cents: Option<Cents>,
    pub max_price_cents: Option<Cents>,
}

/// Collect distinct brands, categories and the price bounds of a collection.
pub fn facets<T: CatalogItem>(items: &[T]) -> CatalogFacets {
    let brands: BTreeSet<String> = items
        .iter()
        .filter_map(|i| i.brand().map(str::to_string))
        .collect();
    let categories: BTreeSet<String> = items
        .iter()
        .filter_map(|i| i.category().map(str::to_string))
        .collect();

    CatalogFacets {
        brands: brands.into_iter().collect(),
        categories: categories.into_iter().collect(),
        min_price_cents: items.iter().map(CatalogItem::price_cents).min(),
        max_price_cents: items.iter().map(CatalogItem::price_cents).max(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
