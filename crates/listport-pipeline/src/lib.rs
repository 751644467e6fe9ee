pub mod description;
pub mod error;
pub mod import;
pub mod mapper;
pub mod orchestrator;
pub mod payload;

pub use description::{description_html, media_list, options_to_create, product_description};
pub use error::{ImportError, ImportStage};
pub use import::{run_import, ImportOutcome, ImportRecord};
pub use mapper::build_dimension_map;
pub use orchestrator::{ImportPipeline, ImportPlan, ImportSettings};
pub use payload::{build_bulk_request, build_variant, PayloadSettings};
