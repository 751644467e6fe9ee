//! Destination catalog types: what the catalog mutation API accepts and
//! returns.
//!
//! Field names follow Rust conventions; the catalog client owns the mapping
//! to the platform's wire names.

use serde::{Deserialize, Serialize};

/// One value of a destination option, with its platform-generated id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationOptionValue {
    pub id: String,
    pub name: String,
    /// `true` when at least one existing variant already uses this value.
    pub has_dependent_variants: bool,
}

/// A product option as created on the destination platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationOption {
    pub id: String,
    pub name: String,
    pub values: Vec<DestinationOptionValue>,
}

impl DestinationOption {
    #[must_use]
    pub fn value_named(&self, name: &str) -> Option<&DestinationOptionValue> {
        self.values.iter().find(|v| v.name == name)
    }
}

/// A stocking location from the destination's location directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
}

/// Title and HTML body of the product to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDescription {
    pub title: String,
    pub description_html: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaContentType {
    Image,
}

/// A media item the platform should pull from `original_source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaInput {
    pub original_source: String,
    pub media_content_type: MediaContentType,
}

impl MediaInput {
    #[must_use]
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            original_source: url.into(),
            media_content_type: MediaContentType::Image,
        }
    }
}

/// An option to create alongside the product, e.g. `Size: [S, M, L]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionCreateInput {
    pub name: String,
    pub values: Vec<String>,
}

/// Everything the product-create call needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCreateInput {
    pub title: String,
    pub description_html: String,
    pub media: Vec<MediaInput>,
    pub product_options: Vec<OptionCreateInput>,
}

/// A product returned by the product-create call, with resolved options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedProduct {
    pub id: String,
    pub title: String,
    pub options: Vec<DestinationOption>,
}

/// `{optionId, valueName}` pair on a variant to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionValueInput {
    pub option_id: String,
    pub value_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLevel {
    pub location_id: String,
    pub quantity: i64,
}

/// One variant-creation entry of a bulk request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationVariantInput {
    /// Decimal string with two fraction digits, e.g. `"9.99"`.
    pub price: String,
    pub compare_at_price: Option<String>,
    pub option_values: Vec<OptionValueInput>,
    pub sku: String,
    pub media_url: Option<String>,
    pub inventory_by_location: Vec<InventoryLevel>,
}

/// How the platform treats the product's placeholder variant when the bulk
/// request lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariantStrategy {
    /// Drop the standalone default variant once real variants exist.
    RemoveStandaloneVariant,
}

impl VariantStrategy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            VariantStrategy::RemoveStandaloneVariant => "REMOVE_STANDALONE_VARIANT",
        }
    }
}

/// The bulk variant-creation request for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkVariantRequest {
    pub product_id: String,
    pub strategy: VariantStrategy,
    pub variants: Vec<DestinationVariantInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

/// A variant returned by the bulk-create call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedVariant {
    pub id: String,
    pub title: String,
    pub selected_options: Vec<SelectedOption>,
}

/// Field-level validation failure reported by the destination platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserError {
    /// Path to the offending input field, e.g. `["variants", "0", "price"]`.
    #[serde(default)]
    pub field: Vec<String>,
    pub message: String,
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.field.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.field.join("."), self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_wire_name() {
        assert_eq!(
            VariantStrategy::RemoveStandaloneVariant.as_str(),
            "REMOVE_STANDALONE_VARIANT"
        );
        assert_eq!(
            serde_json::to_value(VariantStrategy::RemoveStandaloneVariant).unwrap(),
            serde_json::json!("REMOVE_STANDALONE_VARIANT")
        );
    }

    #[test]
    fn media_content_type_serializes_upper_case() {
        let media = MediaInput::image("https://img.test/a.jpg");
        let value = serde_json::to_value(&media).unwrap();
        assert_eq!(value["media_content_type"], "IMAGE");
    }

    #[test]
    fn value_named_is_exact() {
        let option = DestinationOption {
            id: "opt-1".to_owned(),
            name: "Size".to_owned(),
            values: vec![DestinationOptionValue {
                id: "val-1".to_owned(),
                name: "Large".to_owned(),
                has_dependent_variants: false,
            }],
        };
        assert_eq!(option.value_named("Large").unwrap().id, "val-1");
        assert!(option.value_named("large").is_none());
    }

    #[test]
    fn user_error_display_joins_field_path() {
        let err = UserError {
            field: vec!["variants".to_owned(), "0".to_owned(), "price".to_owned()],
            message: "must be positive".to_owned(),
        };
        assert_eq!(err.to_string(), "variants.0.price: must be positive");

        let bare = UserError {
            field: Vec::new(),
            message: "title can't be blank".to_owned(),
        };
        assert_eq!(bare.to_string(), "title can't be blank");
    }
}
