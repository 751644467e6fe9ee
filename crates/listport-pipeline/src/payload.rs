//! Conversion of marketplace child listings into destination variant inputs.

use listport_core::{
    decimal_string, BulkVariantRequest, DestinationOption, DestinationVariantInput, DimensionMap,
    InventoryLevel, Location, MappingGap, MarketplaceVariantItem, OptionValueInput,
    PartialMapping, PartialVariantPolicy, VariantStrategy,
};

/// Seeded stock quantity when nothing else is configured.
pub const DEFAULT_STOCK: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadSettings {
    /// Quantity seeded at every location. Real stock is not imported.
    pub default_stock: i64,
    pub policy: PartialVariantPolicy,
}

impl Default for PayloadSettings {
    fn default() -> Self {
        Self {
            default_stock: DEFAULT_STOCK,
            policy: PartialVariantPolicy::Keep,
        }
    }
}

/// Builds the destination input for one child listing.
///
/// Attributes whose dimension is not in `map` (or whose mapped option is not
/// among `options`) are dropped and recorded; the variant itself is always
/// produced. Values the destination option does not list are submitted as
/// given and recorded as [`MappingGap::UnknownOptionValue`].
#[must_use]
pub fn build_variant(
    item: &MarketplaceVariantItem,
    map: &DimensionMap,
    options: &[DestinationOption],
    locations: &[Location],
    default_stock: i64,
) -> PartialMapping<DestinationVariantInput> {
    let mut gaps = Vec::new();
    let mut option_values = Vec::with_capacity(item.attribute_values.len());

    for attribute in &item.attribute_values {
        let option = map
            .get(&attribute.dimension_source_name)
            .and_then(|target| options.iter().find(|o| o.id == target.destination_option_id));

        let Some(option) = option else {
            gaps.push(MappingGap::UnmappedAttribute {
                variant: item.label().to_owned(),
                dimension_source_name: attribute.dimension_source_name.clone(),
                value: attribute.value.clone(),
            });
            continue;
        };

        if option.value_named(&attribute.value).is_none() {
            gaps.push(MappingGap::UnknownOptionValue {
                variant: item.label().to_owned(),
                option_name: option.name.clone(),
                value: attribute.value.clone(),
            });
        }

        option_values.push(OptionValueInput {
            option_id: option.id.clone(),
            value_name: attribute.value.clone(),
        });
    }

    let variant = DestinationVariantInput {
        price: decimal_string(item.listing_price),
        compare_at_price: item.compare_at_price.map(decimal_string),
        option_values,
        sku: resolve_sku(item),
        media_url: item.primary_image_url.clone(),
        inventory_by_location: locations
            .iter()
            .map(|l| InventoryLevel {
                location_id: l.id.clone(),
                quantity: default_stock,
            })
            .collect(),
    };

    let mut mapping = PartialMapping::complete(variant);
    for gap in gaps {
        mapping.record(gap);
    }
    mapping
}

/// Builds the bulk request for `product_id` from every child listing.
///
/// With [`PartialVariantPolicy::Keep`] every item yields a variant. With
/// [`PartialVariantPolicy::Exclude`] an item with any unmapped attribute is
/// left out and recorded as [`MappingGap::VariantExcluded`].
#[must_use]
pub fn build_bulk_request(
    product_id: &str,
    items: &[MarketplaceVariantItem],
    map: &DimensionMap,
    options: &[DestinationOption],
    locations: &[Location],
    settings: &PayloadSettings,
) -> PartialMapping<BulkVariantRequest> {
    let mut request = PartialMapping::complete(BulkVariantRequest {
        product_id: product_id.to_owned(),
        strategy: VariantStrategy::RemoveStandaloneVariant,
        variants: Vec::with_capacity(items.len()),
    });

    for item in items {
        let (variant, gaps) =
            build_variant(item, map, options, locations, settings.default_stock).into_parts();

        let missing = gaps
            .iter()
            .filter(|g| matches!(g, MappingGap::UnmappedAttribute { .. }))
            .count();
        // Already logged by `build_variant`.
        request.gaps.extend(gaps);

        if missing > 0 && settings.policy == PartialVariantPolicy::Exclude {
            request.record(MappingGap::VariantExcluded {
                variant: item.label().to_owned(),
                missing,
            });
            continue;
        }
        request.value.variants.push(variant);
    }

    tracing::debug!(
        product_id,
        items = items.len(),
        variants = request.value.variants.len(),
        gaps = request.gaps.len(),
        "built bulk variant request"
    );
    request
}

/// Item SKU, else marketplace identifier, else empty.
fn resolve_sku(item: &MarketplaceVariantItem) -> String {
    item.sku
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| Some(item.identifier.as_str()).filter(|s| !s.is_empty()))
        .unwrap_or_default()
        .to_owned()
}

#[cfg(test)]
#[path = "payload_test.rs"]
mod tests;
