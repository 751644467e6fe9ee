pub mod app_config;
pub mod catalog;
pub mod config;
pub mod listing;
pub mod mapping;
pub mod price;

pub use app_config::{AppConfig, Environment};
pub use catalog::{
    BulkVariantRequest, CreatedProduct, CreatedVariant, DestinationOption, DestinationOptionValue,
    DestinationVariantInput, InventoryLevel, Location, MediaContentType, MediaInput,
    OptionCreateInput, OptionValueInput, ProductCreateInput, ProductDescription, SelectedOption,
    UserError, VariantStrategy,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use listing::{
    AttributeValue, ListingId, MarketplaceProduct, MarketplaceVariantItem, VariationDimension,
    VariationSet,
};
pub use mapping::{DimensionMap, DimensionTarget, MappingGap, PartialMapping, PartialVariantPolicy};
pub use price::{decimal_string, parse_display_price};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
