//! The destination product draft: description, media and options.

use listport_core::{
    MappingGap, MarketplaceProduct, MediaInput, OptionCreateInput, PartialMapping,
    ProductDescription, VariationSet,
};

use crate::mapper::shadowing_dimension;

/// Feature bullets as an HTML list, e.g. `<ul><li>Durable</li></ul>`.
#[must_use]
pub fn description_html(features: &[String]) -> String {
    let mut html = String::from("<ul>");
    for feature in features {
        html.push_str("<li>");
        html.push_str(&escape_html(feature));
        html.push_str("</li>");
    }
    html.push_str("</ul>");
    html
}

#[must_use]
pub fn product_description(product: &MarketplaceProduct) -> ProductDescription {
    ProductDescription {
        title: product.title.clone(),
        description_html: description_html(&product.features),
    }
}

/// Primary image first, then each variant image in marketplace order.
#[must_use]
pub fn media_list(product: &MarketplaceProduct) -> Vec<MediaInput> {
    std::iter::once(&product.image_url)
        .chain(&product.variant_image_urls)
        .map(|url| MediaInput::image(url.as_str()))
        .collect()
}

/// One option per dimension, named by its display name.
///
/// Values come from the dimension's allowed values; when the marketplace
/// lists none, the distinct values used by child listings are taken instead.
/// A dimension with no values at all is skipped since the platform rejects
/// empty options.
///
/// Option names must be unique on the platform. When dimensions share a
/// display name, only the one the mapper will map gets an option and the
/// others are recorded as [`MappingGap::DuplicateDimension`].
#[must_use]
pub fn options_to_create(variations: &VariationSet) -> PartialMapping<Vec<OptionCreateInput>> {
    let mut options = PartialMapping::complete(Vec::new());

    for dimension in &variations.dimensions {
        if let Some(owner) = shadowing_dimension(dimension, &variations.dimensions) {
            options.record(MappingGap::DuplicateDimension {
                source_name: dimension.source_name.clone(),
                display_name: dimension.display_name.clone(),
                kept: owner.source_name.clone(),
            });
            continue;
        }

        let values = if dimension.allowed_values.is_empty() {
            let mut seen = Vec::new();
            for attribute in variations
                .items
                .iter()
                .flat_map(|item| &item.attribute_values)
                .filter(|a| a.dimension_source_name == dimension.source_name)
            {
                if !seen.contains(&attribute.value) {
                    seen.push(attribute.value.clone());
                }
            }
            seen
        } else {
            dimension.allowed_values.clone()
        };

        if values.is_empty() {
            tracing::debug!(dimension = %dimension.source_name, "skipping option without values");
            continue;
        }
        options.value.push(OptionCreateInput {
            name: dimension.display_name.clone(),
            values,
        });
    }

    options
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
