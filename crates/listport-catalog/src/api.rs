//! The catalog mutation API as seen by the import driver.

use async_trait::async_trait;
use listport_core::{BulkVariantRequest, CreatedProduct, CreatedVariant, Location, ProductCreateInput};

use crate::error::CatalogError;

/// Destination-side operations of one import. Each is a single remote call;
/// implementations do not retry.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// First `limit` stocking locations of the shop.
    async fn list_locations(&self, limit: u32) -> Result<Vec<Location>, CatalogError>;

    /// Creates the product with its options and media, returning the
    /// options with their generated value ids.
    async fn create_product(
        &self,
        input: &ProductCreateInput,
    ) -> Result<CreatedProduct, CatalogError>;

    async fn bulk_create_variants(
        &self,
        request: &BulkVariantRequest,
    ) -> Result<Vec<CreatedVariant>, CatalogError>;
}
