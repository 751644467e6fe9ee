//! Two-stage marketplace retrieval: base listing, then the variation set.

use listport_core::{ListingId, MarketplaceProduct, VariationSet};

use crate::api::MarketplaceApi;
use crate::error::MarketplaceError;
use crate::normalize::{normalize_dimensions, normalize_item, normalize_variant_item};
use crate::pacing::Pacer;
use crate::types::{ApiErrorData, ITEM_RESOURCES, VARIATION_RESOURCES};

/// Maximum number of variation pages walked for one parent listing.
///
/// The API serves ten children per page, so this admits 100 variants.
pub const MAX_VARIATION_PAGES: u32 = 10;

/// Error codes the API uses in a 2xx body to say the item does not exist
/// or cannot be served to this partner account.
const NOT_FOUND_CODES: &[&str] = &["ItemNotAccessible", "NoResults", "InvalidParameterValue"];

/// Error code for a parent listing without children.
const NO_VARIATIONS_CODE: &str = "NoResults";

/// Result of [`ListingFetcher::fetch_listing`].
///
/// The variation outcome is kept as a `Result` so the caller decides how to
/// degrade; base-listing failure never produces a value of this type.
#[derive(Debug)]
pub struct FetchedListing {
    pub id: ListingId,
    pub product: MarketplaceProduct,
    pub variations: Result<VariationSet, MarketplaceError>,
}

/// Sequences the marketplace calls for one listing with a pause between
/// each pair of consecutive calls.
pub struct ListingFetcher<A, P> {
    api: A,
    pacer: P,
}

impl<A: MarketplaceApi, P: Pacer> ListingFetcher<A, P> {
    pub fn new(api: A, pacer: P) -> Self {
        Self { api, pacer }
    }

    /// Fetches title, features, images and price for `id`.
    ///
    /// # Errors
    ///
    /// - [`MarketplaceError::NotFound`] when the result set is empty.
    /// - Any upstream variant of [`MarketplaceError`] when the call fails or
    ///   the body reports an error other than a missing item.
    pub async fn fetch_base_listing(
        &self,
        id: &ListingId,
    ) -> Result<MarketplaceProduct, MarketplaceError> {
        let response = self.api.get_item(id, ITEM_RESOURCES).await?;

        let item = response
            .items_result
            .and_then(|r| r.items.into_iter().next());

        match item {
            Some(item) => Ok(normalize_item(item)),
            None => Err(empty_result_error(id, response.errors, NOT_FOUND_CODES)),
        }
    }

    /// Fetches the variation summary and every child listing of `id`.
    ///
    /// A listing without variations yields [`VariationSet::empty`]. Pages are
    /// fetched in order with a pause between them; a failure on any page
    /// fails the whole set. Pages past [`MAX_VARIATION_PAGES`] are not
    /// requested and are counted in [`VariationSet::skipped_pages`].
    ///
    /// # Errors
    ///
    /// Any upstream variant of [`MarketplaceError`] from a page call.
    pub async fn fetch_variation_set(
        &self,
        id: &ListingId,
    ) -> Result<VariationSet, MarketplaceError> {
        let first = self.api.get_variations(id, VARIATION_RESOURCES, 1).await?;

        let Some(result) = first.variations_result else {
            if first.errors.iter().all(|e| e.code == NO_VARIATIONS_CODE) {
                tracing::debug!(asin = %id, "listing has no variations");
                return Ok(VariationSet::empty());
            }
            return Err(empty_result_error(id, first.errors, &[NO_VARIATIONS_CODE]));
        };

        let summary = result.variation_summary.unwrap_or_default();
        let variation_count = summary.variation_count.unwrap_or(0);
        if variation_count == 0 {
            tracing::debug!(asin = %id, "variation summary reports zero variations");
            return Ok(VariationSet::empty());
        }

        let reported_pages = summary.page_count.unwrap_or(1).max(1);
        let page_count = reported_pages.min(MAX_VARIATION_PAGES);
        let skipped_pages = reported_pages - page_count;
        if skipped_pages > 0 {
            tracing::warn!(
                asin = %id,
                variation_count,
                reported_pages,
                skipped_pages,
                "variation set exceeds the page cap; keeping the first pages"
            );
        }

        let mut items: Vec<_> = result.items.into_iter().map(normalize_variant_item).collect();

        for page in 2..=page_count {
            self.pacer.pause().await;
            let response = self.api.get_variations(id, VARIATION_RESOURCES, page).await?;
            let Some(page_result) = response.variations_result else {
                return Err(empty_result_error(id, response.errors, &[]));
            };
            tracing::debug!(asin = %id, page, items = page_result.items.len(), "fetched variation page");
            items.extend(page_result.items.into_iter().map(normalize_variant_item));
        }

        tracing::info!(
            asin = %id,
            variation_count,
            fetched = items.len(),
            dimensions = summary.variation_dimensions.len(),
            "fetched variation set"
        );

        Ok(VariationSet {
            variation_count,
            dimensions: normalize_dimensions(summary.variation_dimensions),
            items,
            skipped_pages,
        })
    }

    /// Runs both stages for `id` with a pause in between.
    ///
    /// # Errors
    ///
    /// Fails only when the base listing fails; a variation failure is
    /// returned inside [`FetchedListing::variations`].
    pub async fn fetch_listing(&self, id: &ListingId) -> Result<FetchedListing, MarketplaceError> {
        let product = self.fetch_base_listing(id).await?;
        self.pacer.pause().await;
        let variations = self.fetch_variation_set(id).await;

        Ok(FetchedListing {
            id: id.clone(),
            product,
            variations,
        })
    }
}

/// Error for a 2xx body that carried no result.
///
/// No errors at all, or only codes in `not_found_codes`, mean the item is
/// missing; anything else is reported as an API error.
fn empty_result_error(
    id: &ListingId,
    errors: Vec<ApiErrorData>,
    not_found_codes: &[&str],
) -> MarketplaceError {
    match errors
        .into_iter()
        .find(|e| !not_found_codes.contains(&e.code.as_str()))
    {
        Some(err) => MarketplaceError::Api {
            status: 200,
            code: err.code,
            message: err.message,
        },
        None => MarketplaceError::NotFound {
            identifier: id.to_string(),
        },
    }
}

#[cfg(test)]
#[path = "fetch_test.rs"]
mod tests;
