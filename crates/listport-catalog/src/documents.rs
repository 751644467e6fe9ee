//! GraphQL documents sent to the admin API.

pub const LOCATIONS: &str = r"
query Locations($first: Int!) {
  locations(first: $first) {
    edges {
      node {
        id
        name
      }
    }
  }
}
";

pub const PRODUCT_CREATE: &str = r"
mutation ProductCreate($product: ProductCreateInput!, $media: [CreateMediaInput!]) {
  productCreate(product: $product, media: $media) {
    product {
      id
      title
      options {
        id
        name
        optionValues {
          id
          name
          hasVariants
        }
      }
    }
    userErrors {
      field
      message
    }
  }
}
";

pub const PRODUCT_VARIANTS_BULK_CREATE: &str = r"
mutation ProductVariantsBulkCreate(
  $productId: ID!
  $variants: [ProductVariantsBulkInput!]!
  $strategy: ProductVariantsBulkCreateStrategy
) {
  productVariantsBulkCreate(productId: $productId, variants: $variants, strategy: $strategy) {
    productVariants {
      id
      title
      selectedOptions {
        name
        value
      }
    }
    userErrors {
      field
      message
    }
  }
}
";
