use std::fmt;

use listport_catalog::CatalogError;
use listport_core::UserError;
use listport_marketplace::MarketplaceError;
use serde::Serialize;
use thiserror::Error;

/// Where an import run is, or where it stopped.
///
/// `Extracting` through `Done` (skipping the catalog stages) is the
/// resolution pipeline proper; `Locating`, `Creating` and `Submitting` are
/// the destination calls made by [`crate::run_import`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStage {
    Extracting,
    Fetching,
    Locating,
    Creating,
    Mapping,
    Building,
    Submitting,
    Done,
}

impl ImportStage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ImportStage::Extracting => "extracting",
            ImportStage::Fetching => "fetching",
            ImportStage::Locating => "locating",
            ImportStage::Creating => "creating",
            ImportStage::Mapping => "mapping",
            ImportStage::Building => "building",
            ImportStage::Submitting => "submitting",
            ImportStage::Done => "done",
        }
    }

    pub(crate) fn enter(self) {
        tracing::info!(stage = self.as_str(), "import stage");
    }
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal failure of an import run. Exactly one is returned per failed
/// run; mapping gaps are never errors.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Identifier extraction or base-listing fetch failed.
    #[error("import aborted while {stage}: {source}")]
    Marketplace {
        stage: ImportStage,
        #[source]
        source: MarketplaceError,
    },

    /// A destination call failed before any product existed.
    #[error("import aborted while {stage}: {source}")]
    Catalog {
        stage: ImportStage,
        #[source]
        source: CatalogError,
    },

    /// The platform refused the product with field-level errors.
    #[error("product rejected: {}", join(.errors))]
    ProductRejected { errors: Vec<UserError> },

    /// The product exists on the destination but its variants do not.
    #[error("product {product_id} was created but its variants were not: {reason}")]
    VariantsFailed {
        product_id: String,
        reason: String,
        user_errors: Vec<UserError>,
    },
}

impl ImportError {
    /// Stage at which the run stopped.
    #[must_use]
    pub fn stage(&self) -> ImportStage {
        match self {
            ImportError::Marketplace { stage, .. } | ImportError::Catalog { stage, .. } => *stage,
            ImportError::ProductRejected { .. } => ImportStage::Creating,
            ImportError::VariantsFailed { .. } => ImportStage::Submitting,
        }
    }

    /// Destination product left behind by a failed run, if any.
    #[must_use]
    pub fn created_product_id(&self) -> Option<&str> {
        match self {
            ImportError::VariantsFailed { product_id, .. } => Some(product_id),
            _ => None,
        }
    }
}

fn join(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marketplace_error_reports_stage() {
        let err = ImportError::Marketplace {
            stage: ImportStage::Extracting,
            source: MarketplaceError::Extraction {
                url: "https://marketplace.test/".to_owned(),
            },
        };
        assert_eq!(err.stage(), ImportStage::Extracting);
        assert!(err.to_string().starts_with("import aborted while extracting:"));
        assert!(err.created_product_id().is_none());
    }

    #[test]
    fn variants_failed_keeps_product_id() {
        let err = ImportError::VariantsFailed {
            product_id: "gid://shopify/Product/1".to_owned(),
            reason: "no variants were created".to_owned(),
            user_errors: vec![],
        };
        assert_eq!(err.stage(), ImportStage::Submitting);
        assert_eq!(err.created_product_id(), Some("gid://shopify/Product/1"));
    }
}
