//! The marketplace lookup API as seen by the fetcher.

use async_trait::async_trait;
use listport_core::ListingId;

use crate::error::MarketplaceError;
use crate::types::{GetItemsResponse, GetVariationsResponse};

/// Item-lookup operations the fetcher needs. [`crate::PaapiClient`] is the
/// HTTP implementation; tests substitute in-memory fakes.
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    /// Looks up a single item with the given resource fields.
    async fn get_item(
        &self,
        id: &ListingId,
        resources: &[&str],
    ) -> Result<GetItemsResponse, MarketplaceError>;

    /// Fetches one page (1-based) of the variation set of a parent item.
    async fn get_variations(
        &self,
        id: &ListingId,
        resources: &[&str],
        page: u32,
    ) -> Result<GetVariationsResponse, MarketplaceError>;
}
