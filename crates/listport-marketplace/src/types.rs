//! Wire types for the marketplace item-lookup API (`GetItems`,
//! `GetVariations`).
//!
//! ## Observed shape
//!
//! ### Field casing
//! Every key is `PascalCase`, except a handful of all-caps acronyms
//! (`ASIN`, `URL`, `DetailPageURL`) that need explicit renames.
//!
//! ### Optional everything
//! Any resource that was not requested, or that the listing does not have,
//! is omitted rather than `null`. Every nested struct is therefore
//! `#[serde(default)]`, and the normalizer supplies fallbacks.
//!
//! ### `Amount`
//! A JSON number (`9.99`). It is kept as a [`serde_json::Number`] so the
//! decimal conversion happens on the textual form and never goes through
//! `f64` arithmetic.
//!
//! ### Partial errors
//! A 200 response can still carry an `Errors` array, e.g. when an identifier
//! is not accessible. `GetItems` then returns no `ItemsResult`.

use serde::{Deserialize, Serialize};

pub const PARTNER_TYPE: &str = "Associates";

/// Resources requested by the base-listing fetch.
pub const ITEM_RESOURCES: &[&str] = &[
    "Images.Primary.Medium",
    "Images.Variants.Medium",
    "ItemInfo.Title",
    "ItemInfo.Features",
    "Offers.Listings.Price",
];

/// Resources requested by the variation fetch.
pub const VARIATION_RESOURCES: &[&str] = &[
    "Images.Primary.Medium",
    "ItemInfo.Title",
    "ItemInfo.ManufactureInfo",
    "Offers.Listings.Price",
    "Offers.Listings.SavingBasis",
    "VariationSummary.VariationDimension",
];

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemsRequest {
    pub item_ids: Vec<String>,
    pub resources: Vec<String>,
    pub partner_tag: String,
    pub partner_type: String,
    pub marketplace: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetVariationsRequest {
    #[serde(rename = "ASIN")]
    pub asin: String,
    pub resources: Vec<String>,
    pub partner_tag: String,
    pub partner_type: String,
    pub marketplace: String,
    /// 1-based page of child listings.
    pub variation_page: u32,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemsResponse {
    #[serde(default)]
    pub items_result: Option<ItemsResult>,
    #[serde(default)]
    pub errors: Vec<ApiErrorData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemsResult {
    #[serde(default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetVariationsResponse {
    #[serde(default)]
    pub variations_result: Option<VariationsResult>,
    #[serde(default)]
    pub errors: Vec<ApiErrorData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VariationsResult {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub variation_summary: Option<VariationSummary>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VariationSummary {
    #[serde(default)]
    pub page_count: Option<u32>,
    #[serde(default)]
    pub variation_count: Option<u32>,
    #[serde(default)]
    pub variation_dimensions: Vec<WireVariationDimension>,
}

/// A variation dimension, e.g. `{ "Name": "size_name", "DisplayName": "Size" }`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireVariationDimension {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// One `{Code, Message}` entry of an `Errors` array.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiErrorData {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Body of a non-2xx response.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub errors: Vec<ApiErrorData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Item {
    #[serde(rename = "ASIN", default)]
    pub asin: String,
    #[serde(rename = "DetailPageURL", default)]
    pub detail_page_url: Option<String>,
    #[serde(default)]
    pub images: Option<Images>,
    #[serde(default)]
    pub item_info: Option<ItemInfo>,
    #[serde(default)]
    pub offers: Option<Offers>,
    #[serde(default)]
    pub variation_attributes: Vec<VariationAttribute>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Images {
    #[serde(default)]
    pub primary: Option<ImageType>,
    #[serde(default)]
    pub variants: Vec<ImageType>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageType {
    #[serde(default)]
    pub medium: Option<ImageSize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageSize {
    #[serde(rename = "URL", default)]
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemInfo {
    #[serde(default)]
    pub title: Option<SingleStringValued>,
    #[serde(default)]
    pub features: Option<MultiValuedString>,
    #[serde(default)]
    pub manufacture_info: Option<ManufactureInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManufactureInfo {
    #[serde(default)]
    pub item_part_number: Option<SingleStringValued>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SingleStringValued {
    #[serde(default)]
    pub display_value: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MultiValuedString {
    #[serde(default)]
    pub display_values: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Offers {
    #[serde(default)]
    pub listings: Vec<OfferListing>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferListing {
    #[serde(default)]
    pub price: Option<OfferPrice>,
    /// Reference ("was") price; present only when the offer is discounted.
    #[serde(default)]
    pub saving_basis: Option<OfferPrice>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferPrice {
    #[serde(default)]
    pub amount: Option<serde_json::Number>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub display_amount: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VariationAttribute {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}
