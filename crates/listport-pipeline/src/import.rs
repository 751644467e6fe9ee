//! End-to-end import: plan, create on the destination, submit variants.

use listport_catalog::{CatalogApi, CatalogError};
use listport_core::{parse_display_price, CreatedProduct, CreatedVariant, MappingGap};
use listport_marketplace::{MarketplaceApi, Pacer};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{ImportError, ImportStage};
use crate::orchestrator::{ImportPipeline, ImportPlan};

pub const ACTIVE_STATUS: &str = "ACTIVE";

/// The row an external store keeps for an imported product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRecord {
    pub product_id: String,
    pub title: String,
    /// Display price reduced to digits and `.`; zero when nothing parses.
    pub price: Decimal,
    pub variant_count: usize,
    pub image_url: String,
    pub status: String,
    pub source_url: String,
}

impl ImportRecord {
    fn new(plan: &ImportPlan, product: &CreatedProduct, variant_count: usize) -> Self {
        Self {
            product_id: product.id.clone(),
            title: plan.product.title.clone(),
            price: parse_display_price(&plan.product.display_price).unwrap_or(Decimal::ZERO),
            variant_count,
            image_url: plan.product.image_url.clone(),
            status: ACTIVE_STATUS.to_owned(),
            source_url: plan.source_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    pub product: CreatedProduct,
    pub variants: Vec<CreatedVariant>,
    pub record: ImportRecord,
    pub gaps: Vec<MappingGap>,
}

/// Imports the listing at `url` into `catalog`.
///
/// 1. Plan: extract the identifier and fetch the listing.
/// 2. Read the first `max_locations` stocking locations.
/// 3. Create the product with its options and media.
/// 4. Map dimensions and build the bulk variant request.
/// 5. Submit the variants, unless there are none.
///
/// The run either succeeds completely or returns one error. Once the product
/// exists, a variant failure is still an error and carries the product id.
///
/// # Errors
///
/// - [`ImportError::Marketplace`] from planning.
/// - [`ImportError::Catalog`] if locations or product creation fail in
///   transport.
/// - [`ImportError::ProductRejected`] for field-level product errors.
/// - [`ImportError::VariantsFailed`] if the bulk call fails or creates
///   nothing.
pub async fn run_import<A, P, C>(
    pipeline: &ImportPipeline<A, P>,
    catalog: &C,
    url: &str,
) -> Result<ImportOutcome, ImportError>
where
    A: MarketplaceApi,
    P: Pacer,
    C: CatalogApi + ?Sized,
{
    let plan = pipeline.plan(url).await?;

    ImportStage::Locating.enter();
    let locations = catalog
        .list_locations(pipeline.settings().max_locations)
        .await
        .map_err(|source| ImportError::Catalog {
            stage: ImportStage::Locating,
            source,
        })?;
    if locations.is_empty() {
        tracing::warn!("shop has no stocking locations; variants get no inventory");
    }

    ImportStage::Creating.enter();
    let product = catalog
        .create_product(&plan.product_create_input())
        .await
        .map_err(|e| match e {
            CatalogError::UserErrors { errors, .. } => ImportError::ProductRejected { errors },
            source => ImportError::Catalog {
                stage: ImportStage::Creating,
                source,
            },
        })?;

    let (request, gaps) = pipeline.resolve(&plan, &product, &locations).into_parts();

    let variants = if request.variants.is_empty() {
        tracing::info!(product_id = %product.id, "no variants to create");
        Vec::new()
    } else {
        ImportStage::Submitting.enter();
        let created = catalog
            .bulk_create_variants(&request)
            .await
            .map_err(|e| ImportError::VariantsFailed {
                product_id: product.id.clone(),
                reason: e.to_string(),
                user_errors: e.user_errors().map(<[_]>::to_vec).unwrap_or_default(),
            })?;
        if created.is_empty() {
            return Err(ImportError::VariantsFailed {
                product_id: product.id.clone(),
                reason: "no variants were created".to_owned(),
                user_errors: Vec::new(),
            });
        }
        created
    };

    let record = ImportRecord::new(&plan, &product, variants.len());
    tracing::info!(
        product_id = %record.product_id,
        variants = record.variant_count,
        gaps = gaps.len(),
        "import complete"
    );

    Ok(ImportOutcome {
        product,
        variants,
        record,
        gaps,
    })
}
