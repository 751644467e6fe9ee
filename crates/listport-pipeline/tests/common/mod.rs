//! In-memory fakes of the marketplace and catalog APIs.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use listport_catalog::{CatalogApi, CatalogError};
use listport_core::{
    BulkVariantRequest, CreatedProduct, CreatedVariant, DestinationOption, DestinationOptionValue,
    ListingId, Location, ProductCreateInput, SelectedOption,
};
use listport_marketplace::types::{GetItemsResponse, GetVariationsResponse};
use listport_marketplace::{MarketplaceApi, MarketplaceError};

// ---------------------------------------------------------------------------
// Marketplace
// ---------------------------------------------------------------------------

/// Serves one base listing and the scripted variation pages in order.
pub struct FakeMarketplace {
    item: Mutex<Option<Result<Value, MarketplaceError>>>,
    variations: Mutex<VecDeque<Result<Value, MarketplaceError>>>,
    pub requested: Mutex<Vec<String>>,
}

impl FakeMarketplace {
    pub fn new(
        item: Result<Value, MarketplaceError>,
        variations: Result<Value, MarketplaceError>,
    ) -> Self {
        Self {
            item: Mutex::new(Some(item)),
            variations: Mutex::new(VecDeque::from([variations])),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Queues further variation pages after the first.
    pub fn with_pages(self, pages: impl IntoIterator<Item = Value>) -> Self {
        self.variations
            .lock()
            .unwrap()
            .extend(pages.into_iter().map(Ok));
        self
    }
}

#[async_trait]
impl MarketplaceApi for FakeMarketplace {
    async fn get_item(
        &self,
        id: &ListingId,
        _resources: &[&str],
    ) -> Result<GetItemsResponse, MarketplaceError> {
        self.requested.lock().unwrap().push(id.to_string());
        let next = self.item.lock().unwrap().take().expect("get_item called twice");
        next.map(|v| serde_json::from_value(v).unwrap())
    }

    async fn get_variations(
        &self,
        _id: &ListingId,
        _resources: &[&str],
        _page: u32,
    ) -> Result<GetVariationsResponse, MarketplaceError> {
        let next = self
            .variations
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected get_variations call");
        next.map(|v| serde_json::from_value(v).unwrap())
    }
}

/// `GetItems` body for the widget used across scenarios.
pub fn widget_body(features: &[&str]) -> Value {
    json!({
        "ItemsResult": { "Items": [{
            "ASIN": "B09BWFX1L6",
            "Images": {
                "Primary": { "Medium": { "URL": "https://img.test/widget.jpg" } },
                "Variants": [{ "Medium": { "URL": "https://img.test/widget-side.jpg" } }]
            },
            "ItemInfo": {
                "Title": { "DisplayValue": "Widget" },
                "Features": { "DisplayValues": features }
            },
            "Offers": { "Listings": [{ "Price": { "Amount": 9.99, "DisplayAmount": "$9.99" } }] }
        }] }
    })
}

pub fn zero_variations_body() -> Value {
    json!({
        "VariationsResult": {
            "Items": [],
            "VariationSummary": { "PageCount": 0, "VariationCount": 0 }
        }
    })
}

/// Two dimensions (`Size`, `Color`) and two children.
pub fn size_color_body() -> Value {
    json!({
        "VariationsResult": {
            "Items": [
                {
                    "ASIN": "B000000001",
                    "Images": { "Primary": { "Medium": { "URL": "https://img.test/small-red.jpg" } } },
                    "ItemInfo": { "ManufactureInfo": { "ItemPartNumber": { "DisplayValue": "W-S-RED" } } },
                    "Offers": { "Listings": [{ "Price": { "Amount": 9.99 }, "SavingBasis": { "Amount": 14.99 } }] },
                    "VariationAttributes": [
                        { "Name": "size_name", "Value": "Small" },
                        { "Name": "color_name", "Value": "Red" }
                    ]
                },
                {
                    "ASIN": "B000000002",
                    "Offers": { "Listings": [{ "Price": { "Amount": 11 } }] },
                    "VariationAttributes": [
                        { "Name": "size_name", "Value": "Large" },
                        { "Name": "color_name", "Value": "Blue" }
                    ]
                }
            ],
            "VariationSummary": {
                "PageCount": 1,
                "VariationCount": 2,
                "VariationDimensions": [
                    { "Name": "size_name", "DisplayName": "Size", "Values": ["Small", "Large"] },
                    { "Name": "color_name", "DisplayName": "Color", "Values": ["Red", "Blue"] }
                ]
            }
        }
    })
}

/// A variation page from a listing that reports `page_count` pages and
/// 101 children, carrying one `Size` child.
pub fn sized_page(page_count: u32, asin: &str) -> Value {
    json!({
        "VariationsResult": {
            "Items": [{
                "ASIN": asin,
                "Offers": { "Listings": [{ "Price": { "Amount": 5 } }] },
                "VariationAttributes": [{ "Name": "size_name", "Value": "Small" }]
            }],
            "VariationSummary": {
                "PageCount": page_count,
                "VariationCount": 101,
                "VariationDimensions": [
                    { "Name": "size_name", "DisplayName": "Size", "Values": ["Small"] }
                ]
            }
        }
    })
}

/// Two dimensions that both display as `Size`.
pub fn duplicate_size_body() -> Value {
    json!({
        "VariationsResult": {
            "Items": [{
                "ASIN": "B000000001",
                "Offers": { "Listings": [{ "Price": { "Amount": 5 } }] },
                "VariationAttributes": [
                    { "Name": "size_name", "Value": "Small" },
                    { "Name": "apparel_size", "Value": "XS" }
                ]
            }],
            "VariationSummary": {
                "PageCount": 1,
                "VariationCount": 1,
                "VariationDimensions": [
                    { "Name": "size_name", "DisplayName": "Size", "Values": ["Small"] },
                    { "Name": "apparel_size", "DisplayName": "Size", "Values": ["XS"] }
                ]
            }
        }
    })
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Records every call and answers from canned results.
pub struct FakeCatalog {
    pub locations: Vec<Location>,
    /// Option names the created product comes back with; `None` echoes the
    /// requested options.
    pub created_option_names: Option<Vec<String>>,
    pub create_error: Mutex<Option<CatalogError>>,
    pub bulk_error: Mutex<Option<CatalogError>>,
    pub bulk_returns_nothing: bool,
    pub created_inputs: Mutex<Vec<ProductCreateInput>>,
    pub bulk_requests: Mutex<Vec<BulkVariantRequest>>,
}

impl Default for FakeCatalog {
    fn default() -> Self {
        Self {
            locations: vec![
                Location {
                    id: "gid://shopify/Location/1".to_owned(),
                    name: "Warehouse".to_owned(),
                },
                Location {
                    id: "gid://shopify/Location/2".to_owned(),
                    name: "Store".to_owned(),
                },
            ],
            created_option_names: None,
            create_error: Mutex::new(None),
            bulk_error: Mutex::new(None),
            bulk_returns_nothing: false,
            created_inputs: Mutex::new(Vec::new()),
            bulk_requests: Mutex::new(Vec::new()),
        }
    }
}

pub const PRODUCT_ID: &str = "gid://shopify/Product/42";

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn list_locations(&self, limit: u32) -> Result<Vec<Location>, CatalogError> {
        Ok(self
            .locations
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn create_product(
        &self,
        input: &ProductCreateInput,
    ) -> Result<CreatedProduct, CatalogError> {
        self.created_inputs.lock().unwrap().push(input.clone());
        if let Some(err) = self.create_error.lock().unwrap().take() {
            return Err(err);
        }

        let options = input
            .product_options
            .iter()
            .enumerate()
            .filter(|(_, o)| {
                self.created_option_names
                    .as_ref()
                    .map_or(true, |names| names.contains(&o.name))
            })
            .map(|(i, o)| DestinationOption {
                id: format!("gid://shopify/ProductOption/{i}"),
                name: o.name.clone(),
                values: o
                    .values
                    .iter()
                    .enumerate()
                    .map(|(j, v)| DestinationOptionValue {
                        id: format!("gid://shopify/ProductOptionValue/{i}{j}"),
                        name: v.clone(),
                        has_dependent_variants: false,
                    })
                    .collect(),
            })
            .collect();

        Ok(CreatedProduct {
            id: PRODUCT_ID.to_owned(),
            title: input.title.clone(),
            options,
        })
    }

    async fn bulk_create_variants(
        &self,
        request: &BulkVariantRequest,
    ) -> Result<Vec<CreatedVariant>, CatalogError> {
        self.bulk_requests.lock().unwrap().push(request.clone());
        if let Some(err) = self.bulk_error.lock().unwrap().take() {
            return Err(err);
        }
        if self.bulk_returns_nothing {
            return Ok(Vec::new());
        }
        Ok(request
            .variants
            .iter()
            .enumerate()
            .map(|(i, v)| CreatedVariant {
                id: format!("gid://shopify/ProductVariant/{i}"),
                title: v.sku.clone(),
                selected_options: v
                    .option_values
                    .iter()
                    .map(|o| SelectedOption {
                        name: o.option_id.clone(),
                        value: o.value_name.clone(),
                    })
                    .collect(),
            })
            .collect())
    }
}
