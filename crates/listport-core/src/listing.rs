//! Marketplace-side listing types.
//!
//! These are the normalized shapes the fetcher produces from the marketplace
//! lookup API. They are immutable once built; the pipeline only reads them.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Canonical marketplace product identifier: a 10-character alphanumeric
/// token such as `"B09BWFX1L6"`.
///
/// Construction does not validate the token; the identifier extractor is the
/// only producer of values that came from user input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(String);

impl ListingId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Base attributes of a marketplace listing, produced by the base fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceProduct {
    pub title: String,
    /// Price exactly as the marketplace renders it, e.g. `"$9.99"`.
    /// `"0.00"` when the listing carries no offer.
    pub display_price: String,
    /// Primary image URL, or a placeholder when the listing has none.
    pub image_url: String,
    /// Feature bullets in marketplace order. Empty when absent upstream.
    pub features: Vec<String>,
    pub variant_image_urls: Vec<String>,
}

/// One variation axis of a listing, e.g. size or color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationDimension {
    /// Raw attribute key used inside child listings, e.g. `"size_name"`.
    pub source_name: String,
    /// Human label, e.g. `"Size"`. Matched verbatim against destination
    /// option names.
    pub display_name: String,
    pub allowed_values: Vec<String>,
}

/// A single `{dimension, value}` pair on a child listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub dimension_source_name: String,
    pub value: String,
}

/// One marketplace child listing (a concrete size/color combination).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceVariantItem {
    pub sku: Option<String>,
    /// Marketplace identifier of the child listing.
    pub identifier: String,
    /// Offer amount; zero when the child listing has no offer.
    pub listing_price: Decimal,
    pub compare_at_price: Option<Decimal>,
    pub attribute_values: Vec<AttributeValue>,
    pub primary_image_url: Option<String>,
}

impl MarketplaceVariantItem {
    /// Label used in diagnostics: the SKU when present, else the identifier.
    #[must_use]
    pub fn label(&self) -> &str {
        self.sku
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.identifier)
    }
}

/// The variation summary and child listings for one parent listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationSet {
    /// Number of child listings the marketplace reports for the parent.
    pub variation_count: u32,
    /// Dimensions, unique by `source_name`.
    pub dimensions: Vec<VariationDimension>,
    pub items: Vec<MarketplaceVariantItem>,
    /// Variation pages left unfetched because the walk hit its page cap.
    #[serde(default)]
    pub skipped_pages: u32,
}

impl VariationSet {
    /// A set with no dimensions and no child listings.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty() && self.items.is_empty()
    }

    /// `true` when child listings beyond the page cap were left out.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.skipped_pages > 0
    }

    /// Looks up a dimension by its raw attribute key.
    #[must_use]
    pub fn dimension(&self, source_name: &str) -> Option<&VariationDimension> {
        self.dimensions
            .iter()
            .find(|d| d.source_name == source_name)
    }
}
