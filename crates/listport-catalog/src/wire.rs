//! Wire types for the admin GraphQL API.
//!
//! Inputs borrow from the `listport_core` catalog types and serialize in
//! the platform's `camelCase`. Responses deserialize into wire shapes
//! and convert back into core types.
//!
//! `userErrors.field` is `null` for errors that are not tied to an input
//! field, so it is read as `Option<Vec<String>>` here rather than directly
//! into [`listport_core::UserError`].

use listport_core::{
    BulkVariantRequest, CreatedProduct, CreatedVariant, DestinationOption,
    DestinationOptionValue, DestinationVariantInput, Location, MediaInput, ProductCreateInput,
    SelectedOption, UserError,
};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct GraphqlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<D> {
    pub data: Option<D>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct WireUserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

impl From<WireUserError> for UserError {
    fn from(e: WireUserError) -> Self {
        UserError {
            field: e.field.unwrap_or_default(),
            message: e.message,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
    #[serde(default)]
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

// ---------------------------------------------------------------------------
// locations
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct LocationsVariables {
    pub first: u32,
}

#[derive(Debug, Deserialize)]
pub struct LocationsData {
    pub locations: Connection<Location>,
}

// ---------------------------------------------------------------------------
// productCreate
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ProductCreateVariables<'a> {
    pub product: ProductInput<'a>,
    pub media: Vec<CreateMediaInput<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput<'a> {
    pub title: &'a str,
    pub description_html: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub product_options: Vec<OptionCreate<'a>>,
}

#[derive(Debug, Serialize)]
pub struct OptionCreate<'a> {
    pub name: &'a str,
    pub values: Vec<NamedValue<'a>>,
}

#[derive(Debug, Serialize)]
pub struct NamedValue<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMediaInput<'a> {
    pub original_source: &'a str,
    pub media_content_type: listport_core::MediaContentType,
}

impl<'a> From<&'a ProductCreateInput> for ProductCreateVariables<'a> {
    fn from(input: &'a ProductCreateInput) -> Self {
        ProductCreateVariables {
            product: ProductInput {
                title: &input.title,
                description_html: &input.description_html,
                product_options: input
                    .product_options
                    .iter()
                    .map(|o| OptionCreate {
                        name: &o.name,
                        values: o.values.iter().map(|v| NamedValue { name: v }).collect(),
                    })
                    .collect(),
            },
            media: input.media.iter().map(CreateMediaInput::from).collect(),
        }
    }
}

impl<'a> From<&'a MediaInput> for CreateMediaInput<'a> {
    fn from(media: &'a MediaInput) -> Self {
        CreateMediaInput {
            original_source: &media.original_source,
            media_content_type: media.media_content_type,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreateData {
    pub product_create: Option<ProductCreatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreatePayload {
    pub product: Option<WireProduct>,
    #[serde(default)]
    pub user_errors: Vec<WireUserError>,
}

#[derive(Debug, Deserialize)]
pub struct WireProduct {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub options: Vec<WireOption>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireOption {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub option_values: Vec<WireOptionValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireOptionValue {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub has_variants: bool,
}

impl From<WireProduct> for CreatedProduct {
    fn from(p: WireProduct) -> Self {
        CreatedProduct {
            id: p.id,
            title: p.title,
            options: p
                .options
                .into_iter()
                .map(|o| DestinationOption {
                    id: o.id,
                    name: o.name,
                    values: o
                        .option_values
                        .into_iter()
                        .map(|v| DestinationOptionValue {
                            id: v.id,
                            name: v.name,
                            has_dependent_variants: v.has_variants,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// productVariantsBulkCreate
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCreateVariables<'a> {
    pub product_id: &'a str,
    pub strategy: &'static str,
    pub variants: Vec<VariantInput<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantInput<'a> {
    pub price: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<&'a str>,
    pub option_values: Vec<VariantOptionValue<'a>>,
    pub inventory_item: InventoryItemInput<'a>,
    pub inventory_quantities: Vec<InventoryQuantityInput<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub media_src: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantOptionValue<'a> {
    pub option_id: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct InventoryItemInput<'a> {
    pub sku: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryQuantityInput<'a> {
    pub available_quantity: i64,
    pub location_id: &'a str,
}

impl<'a> From<&'a BulkVariantRequest> for BulkCreateVariables<'a> {
    fn from(request: &'a BulkVariantRequest) -> Self {
        BulkCreateVariables {
            product_id: &request.product_id,
            strategy: request.strategy.as_str(),
            variants: request.variants.iter().map(VariantInput::from).collect(),
        }
    }
}

impl<'a> From<&'a DestinationVariantInput> for VariantInput<'a> {
    fn from(v: &'a DestinationVariantInput) -> Self {
        VariantInput {
            price: &v.price,
            compare_at_price: v.compare_at_price.as_deref(),
            option_values: v
                .option_values
                .iter()
                .map(|o| VariantOptionValue {
                    option_id: &o.option_id,
                    name: &o.value_name,
                })
                .collect(),
            inventory_item: InventoryItemInput { sku: &v.sku },
            inventory_quantities: v
                .inventory_by_location
                .iter()
                .map(|l| InventoryQuantityInput {
                    available_quantity: l.quantity,
                    location_id: &l.location_id,
                })
                .collect(),
            media_src: v.media_url.as_deref().into_iter().collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCreateData {
    pub product_variants_bulk_create: Option<BulkCreatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCreatePayload {
    #[serde(default)]
    pub product_variants: Option<Vec<WireVariant>>,
    #[serde(default)]
    pub user_errors: Vec<WireUserError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireVariant {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
}

impl From<WireVariant> for CreatedVariant {
    fn from(v: WireVariant) -> Self {
        CreatedVariant {
            id: v.id,
            title: v.title,
            selected_options: v.selected_options,
        }
    }
}
