pub mod api;
pub mod client;
pub mod error;
pub mod fetch;
pub mod identifier;
pub mod normalize;
pub mod pacing;
pub mod types;

pub use api::MarketplaceApi;
pub use client::{PaapiClient, PaapiConfig};
pub use error::MarketplaceError;
pub use fetch::{FetchedListing, ListingFetcher};
pub use identifier::extract_listing_id;
pub use pacing::{FixedDelay, NoDelay, Pacer};
