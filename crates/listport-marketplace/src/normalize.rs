//! Normalization from lookup-API wire types to `listport_core` listing types.
//!
//! Missing resources never fail normalization; they degrade to the defaults
//! below so a sparse listing can still be imported.

use std::collections::HashSet;
use std::str::FromStr;

use listport_core::{
    AttributeValue, MarketplaceProduct, MarketplaceVariantItem, VariationDimension,
};
use rust_decimal::Decimal;

use crate::types::{ImageType, Item, OfferPrice, WireVariationDimension};

pub const DEFAULT_TITLE: &str = "Unknown Title";
pub const DEFAULT_DISPLAY_PRICE: &str = "0.00";
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/150";

/// Normalizes the base listing returned by `GetItems`.
#[must_use]
pub fn normalize_item(item: Item) -> MarketplaceProduct {
    let item_info = item.item_info.unwrap_or_default();
    let images = item.images.unwrap_or_default();

    let title = item_info
        .title
        .map(|t| t.display_value)
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_owned());

    let display_price = item
        .offers
        .and_then(|o| o.listings.into_iter().next())
        .and_then(|l| l.price)
        .and_then(|p| p.display_amount)
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DISPLAY_PRICE.to_owned());

    let features = item_info
        .features
        .map(|f| f.display_values)
        .unwrap_or_default();

    let image_url = images
        .primary
        .and_then(medium_url)
        .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_owned());

    let variant_image_urls = images.variants.into_iter().filter_map(medium_url).collect();

    MarketplaceProduct {
        title,
        display_price,
        image_url,
        features,
        variant_image_urls,
    }
}

/// Normalizes the dimension list of a variation summary.
///
/// Dimensions are unique by source name; a repeated name keeps its first
/// occurrence. Dimensions with an empty source name are dropped because no
/// child attribute could ever reference them.
#[must_use]
pub fn normalize_dimensions(dimensions: Vec<WireVariationDimension>) -> Vec<VariationDimension> {
    let mut seen = HashSet::new();
    dimensions
        .into_iter()
        .filter(|d| {
            if d.name.is_empty() {
                tracing::debug!(display_name = %d.display_name, "dropping dimension without a name");
                return false;
            }
            if !seen.insert(d.name.clone()) {
                tracing::debug!(name = %d.name, "dropping duplicate dimension");
                return false;
            }
            true
        })
        .map(|d| VariationDimension {
            source_name: d.name,
            display_name: d.display_name,
            allowed_values: d.values,
        })
        .collect()
}

/// Normalizes one child listing returned by `GetVariations`.
#[must_use]
pub fn normalize_variant_item(item: Item) -> MarketplaceVariantItem {
    let listing = item.offers.and_then(|o| o.listings.into_iter().next());
    let (price, saving_basis) = listing.map_or((None, None), |l| (l.price, l.saving_basis));

    let listing_price = price
        .as_ref()
        .and_then(|p| amount(p, &item.asin))
        .unwrap_or(Decimal::ZERO);
    let compare_at_price = saving_basis.as_ref().and_then(|p| amount(p, &item.asin));

    let sku = item
        .item_info
        .and_then(|info| info.manufacture_info)
        .and_then(|m| m.item_part_number)
        .map(|p| p.display_value)
        .filter(|s| !s.trim().is_empty());

    let primary_image_url = item.images.and_then(|i| i.primary).and_then(medium_url);

    let attribute_values = item
        .variation_attributes
        .into_iter()
        .map(|a| AttributeValue {
            dimension_source_name: a.name,
            value: a.value,
        })
        .collect();

    MarketplaceVariantItem {
        sku,
        identifier: item.asin,
        listing_price,
        compare_at_price,
        attribute_values,
        primary_image_url,
    }
}

fn medium_url(image: ImageType) -> Option<String> {
    image.medium.map(|m| m.url).filter(|u| !u.is_empty())
}

/// Converts a wire amount through its textual form. An unparseable amount
/// is logged and treated as absent.
fn amount(price: &OfferPrice, asin: &str) -> Option<Decimal> {
    let raw = price.amount.as_ref()?.to_string();
    match Decimal::from_str(&raw).or_else(|_| Decimal::from_scientific(&raw)) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(asin, amount = %raw, error = %e, "unparseable offer amount");
            None
        }
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
