pub mod api;
pub mod client;
pub mod documents;
pub mod error;
pub mod wire;

pub use api::CatalogApi;
pub use client::{ShopifyAdminClient, ShopifyConfig};
pub use error::CatalogError;
