//! Sequencing of extraction, retrieval, mapping and payload building.
//!
//! [`ImportPipeline::plan`] covers `Extracting -> Fetching` and is the only
//! part that can abort. [`ImportPipeline::resolve`] covers
//! `Mapping -> Building -> Done` once the destination product exists, and
//! never fails: gaps are carried in the returned [`PartialMapping`].

use listport_core::{
    AppConfig, BulkVariantRequest, CreatedProduct, ListingId, Location, MappingGap,
    MarketplaceProduct, MediaInput, OptionCreateInput, PartialMapping, ProductCreateInput,
    ProductDescription, VariationSet,
};
use listport_marketplace::{extract_listing_id, ListingFetcher, MarketplaceApi, Pacer};
use serde::Serialize;

use crate::description::{media_list, options_to_create, product_description};
use crate::error::{ImportError, ImportStage};
use crate::mapper::build_dimension_map;
use crate::payload::{build_bulk_request, PayloadSettings};

/// Page size for the location directory when nothing else is configured.
pub const DEFAULT_MAX_LOCATIONS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSettings {
    pub payload: PayloadSettings,
    /// How many stocking locations receive seeded inventory.
    pub max_locations: u32,
}

impl ImportSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            payload: PayloadSettings {
                default_stock: config.default_stock,
                policy: config.partial_variants,
            },
            max_locations: config.max_locations,
        }
    }
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            payload: PayloadSettings::default(),
            max_locations: DEFAULT_MAX_LOCATIONS,
        }
    }
}

/// Everything known about a listing before the destination is touched.
#[derive(Debug, Clone, Serialize)]
pub struct ImportPlan {
    pub listing_id: ListingId,
    pub source_url: String,
    pub product: MarketplaceProduct,
    pub description: ProductDescription,
    pub media: Vec<MediaInput>,
    pub options_to_create: Vec<OptionCreateInput>,
    pub variations: VariationSet,
    /// Why the variation fetch was abandoned, when it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_error: Option<String>,
    /// Gaps known before the destination is touched: a truncated variation
    /// walk and dimensions left without an option of their own.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gaps: Vec<MappingGap>,
}

impl ImportPlan {
    /// Input for the destination's product-create call.
    #[must_use]
    pub fn product_create_input(&self) -> ProductCreateInput {
        ProductCreateInput {
            title: self.description.title.clone(),
            description_html: self.description.description_html.clone(),
            media: self.media.clone(),
            product_options: self.options_to_create.clone(),
        }
    }
}

/// One import flow per call; holds no state between runs.
pub struct ImportPipeline<A, P> {
    fetcher: ListingFetcher<A, P>,
    settings: ImportSettings,
}

impl<A: MarketplaceApi, P: Pacer> ImportPipeline<A, P> {
    pub fn new(api: A, pacer: P, settings: ImportSettings) -> Self {
        Self {
            fetcher: ListingFetcher::new(api, pacer),
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    /// Extracts the identifier from `url` and fetches the listing.
    ///
    /// A failed variation fetch degrades to an empty [`VariationSet`] and is
    /// noted in [`ImportPlan::variation_error`].
    ///
    /// # Errors
    ///
    /// - [`ImportError::Marketplace`] at [`ImportStage::Extracting`] when the
    ///   URL carries no identifier.
    /// - [`ImportError::Marketplace`] at [`ImportStage::Fetching`] when the
    ///   base listing is missing or its fetch fails.
    pub async fn plan(&self, url: &str) -> Result<ImportPlan, ImportError> {
        ImportStage::Extracting.enter();
        let listing_id = extract_listing_id(url).map_err(|source| ImportError::Marketplace {
            stage: ImportStage::Extracting,
            source,
        })?;

        ImportStage::Fetching.enter();
        let fetched =
            self.fetcher
                .fetch_listing(&listing_id)
                .await
                .map_err(|source| ImportError::Marketplace {
                    stage: ImportStage::Fetching,
                    source,
                })?;

        let (variations, variation_error) = match fetched.variations {
            Ok(set) => (set, None),
            Err(e) => {
                tracing::warn!(
                    asin = %listing_id,
                    error = %e,
                    "variation fetch failed; continuing without variants"
                );
                (VariationSet::empty(), Some(e.to_string()))
            }
        };

        let mut gaps = Vec::new();
        if variations.is_truncated() {
            gaps.push(MappingGap::VariationsTruncated {
                variation_count: variations.variation_count,
                fetched: variations.items.len(),
                skipped_pages: variations.skipped_pages,
            });
        }
        let (options_to_create, option_gaps) = options_to_create(&variations).into_parts();
        gaps.extend(option_gaps);

        Ok(ImportPlan {
            description: product_description(&fetched.product),
            media: media_list(&fetched.product),
            options_to_create,
            listing_id,
            source_url: url.to_owned(),
            product: fetched.product,
            variations,
            variation_error,
            gaps,
        })
    }

    /// Maps the plan's dimensions onto the created product's options and
    /// builds the bulk variant request.
    ///
    /// The returned gaps start with the plan's own, then dimension gaps, then
    /// per-variant gaps in item order.
    #[must_use]
    pub fn resolve(
        &self,
        plan: &ImportPlan,
        product: &CreatedProduct,
        locations: &[Location],
    ) -> PartialMapping<BulkVariantRequest> {
        ImportStage::Mapping.enter();
        let mut gaps = plan.gaps.clone();
        let (map, map_gaps) =
            build_dimension_map(&plan.variations.dimensions, &product.options).into_parts();
        gaps.extend(map_gaps);

        ImportStage::Building.enter();
        let (request, build_gaps) = build_bulk_request(
            &product.id,
            &plan.variations.items,
            &map,
            &product.options,
            locations,
            &self.settings.payload,
        )
        .into_parts();
        gaps.extend(build_gaps);

        ImportStage::Done.enter();
        PartialMapping {
            value: request,
            gaps,
        }
    }
}
