//! HTTP client for the destination shop's admin GraphQL API.

use std::time::Duration;

use async_trait::async_trait;
use listport_core::{
    AppConfig, BulkVariantRequest, ConfigError, CreatedProduct, CreatedVariant, Location,
    ProductCreateInput, UserError,
};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::CatalogApi;
use crate::documents;
use crate::error::CatalogError;
use crate::wire::{
    BulkCreateData, BulkCreateVariables, GraphqlRequest, GraphqlResponse, LocationsData,
    LocationsVariables, ProductCreateData, ProductCreateVariables, WireUserError,
};

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Shop, token and API version for one destination store.
#[derive(Clone)]
pub struct ShopifyConfig {
    pub shop_domain: String,
    pub admin_token: String,
    pub api_version: String,
}

impl ShopifyConfig {
    /// Reads the destination settings from the application config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if the shop domain or admin
    /// token is not configured.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let shop_domain = config
            .shopify_shop_domain
            .clone()
            .ok_or_else(|| ConfigError::MissingEnvVar("SHOPIFY_SHOP_DOMAIN".to_owned()))?;
        let admin_token = config
            .shopify_admin_token
            .clone()
            .ok_or_else(|| ConfigError::MissingEnvVar("SHOPIFY_ADMIN_TOKEN".to_owned()))?;
        Ok(Self {
            shop_domain,
            admin_token,
            api_version: config.shopify_api_version.clone(),
        })
    }
}

impl std::fmt::Debug for ShopifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyConfig")
            .field("shop_domain", &self.shop_domain)
            .field("admin_token", &"[redacted]")
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// Admin GraphQL client implementing [`CatalogApi`].
///
/// Use [`ShopifyAdminClient::new`] for a real shop or
/// [`ShopifyAdminClient::with_base_url`] to point at a mock server in tests.
pub struct ShopifyAdminClient {
    client: Client,
    admin_token: String,
    endpoint: Url,
}

impl ShopifyAdminClient {
    /// Creates a client for `https://{shop_domain}/admin/api/{api_version}/graphql.json`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CatalogError::InvalidEndpoint`] if the
    /// shop domain does not form a valid URL.
    pub fn new(
        config: &ShopifyConfig,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, CatalogError> {
        let base_url = format!("https://{}/", config.shop_domain);
        Self::with_base_url(config, timeout_secs, user_agent, &base_url)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`ShopifyAdminClient::new`].
    pub fn with_base_url(
        config: &ShopifyConfig,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let invalid = |reason: String| CatalogError::InvalidEndpoint {
            endpoint: base_url.to_owned(),
            reason,
        };
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| {
                base.join(&format!("admin/api/{}/graphql.json", config.api_version))
            })
            .map_err(|e| invalid(e.to_string()))?;
        if endpoint.host_str().is_none() {
            return Err(invalid("URL has no host".to_owned()));
        }

        Ok(Self {
            client,
            admin_token: config.admin_token.clone(),
            endpoint,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Posts one GraphQL document and returns its `data`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::RateLimited`] - HTTP 429.
    /// - [`CatalogError::Unauthorized`] - HTTP 401/403.
    /// - [`CatalogError::UnexpectedStatus`] - any other non-2xx.
    /// - [`CatalogError::Graphql`] - a non-empty top-level `errors` array.
    /// - [`CatalogError::MissingData`] - no `data` and no `errors`.
    /// - [`CatalogError::Http`] / [`CatalogError::Deserialize`] - transport
    ///   or body-shape failure.
    async fn execute<V, D>(
        &self,
        operation: &str,
        query: &str,
        variables: V,
    ) -> Result<D, CatalogError>
    where
        V: Serialize + Send,
        D: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCESS_TOKEN_HEADER, &self.admin_token)
            .json(&GraphqlRequest { query, variables })
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            // The platform sends fractional seconds, e.g. "2.0".
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.split('.').next())
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CatalogError::RateLimited { retry_after_secs });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(CatalogError::Unauthorized {
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                operation: operation.to_owned(),
            });
        }

        let text = response.text().await?;
        let body: GraphqlResponse<D> =
            serde_json::from_str(&text).map_err(|e| CatalogError::Deserialize {
                context: format!("{operation} response"),
                source: e,
            })?;

        if !body.errors.is_empty() {
            return Err(CatalogError::Graphql {
                operation: operation.to_owned(),
                messages: body.errors.into_iter().map(|e| e.message).collect(),
            });
        }

        body.data.ok_or_else(|| CatalogError::MissingData {
            operation: operation.to_owned(),
        })
    }
}

fn check_user_errors(operation: &str, errors: Vec<WireUserError>) -> Result<(), CatalogError> {
    if errors.is_empty() {
        return Ok(());
    }
    let errors: Vec<UserError> = errors.into_iter().map(UserError::from).collect();
    tracing::warn!(operation, count = errors.len(), "catalog API returned user errors");
    Err(CatalogError::UserErrors {
        operation: operation.to_owned(),
        errors,
    })
}

#[async_trait]
impl CatalogApi for ShopifyAdminClient {
    async fn list_locations(&self, limit: u32) -> Result<Vec<Location>, CatalogError> {
        let data: LocationsData = self
            .execute(
                "locations",
                documents::LOCATIONS,
                LocationsVariables { first: limit },
            )
            .await?;

        let locations: Vec<Location> = data.locations.edges.into_iter().map(|e| e.node).collect();
        tracing::debug!(count = locations.len(), "fetched stocking locations");
        Ok(locations)
    }

    async fn create_product(
        &self,
        input: &ProductCreateInput,
    ) -> Result<CreatedProduct, CatalogError> {
        const OPERATION: &str = "productCreate";

        let data: ProductCreateData = self
            .execute(
                OPERATION,
                documents::PRODUCT_CREATE,
                ProductCreateVariables::from(input),
            )
            .await?;

        let payload = data.product_create.ok_or_else(|| CatalogError::MissingData {
            operation: OPERATION.to_owned(),
        })?;
        check_user_errors(OPERATION, payload.user_errors)?;

        let product = payload.product.ok_or_else(|| CatalogError::MissingData {
            operation: OPERATION.to_owned(),
        })?;
        tracing::info!(product_id = %product.id, title = %product.title, "created product");
        Ok(CreatedProduct::from(product))
    }

    async fn bulk_create_variants(
        &self,
        request: &BulkVariantRequest,
    ) -> Result<Vec<CreatedVariant>, CatalogError> {
        const OPERATION: &str = "productVariantsBulkCreate";

        let data: BulkCreateData = self
            .execute(
                OPERATION,
                documents::PRODUCT_VARIANTS_BULK_CREATE,
                BulkCreateVariables::from(request),
            )
            .await?;

        let payload = data
            .product_variants_bulk_create
            .ok_or_else(|| CatalogError::MissingData {
                operation: OPERATION.to_owned(),
            })?;
        check_user_errors(OPERATION, payload.user_errors)?;

        let variants: Vec<CreatedVariant> = payload
            .product_variants
            .unwrap_or_default()
            .into_iter()
            .map(CreatedVariant::from)
            .collect();
        tracing::info!(
            product_id = %request.product_id,
            requested = request.variants.len(),
            created = variants.len(),
            "created variants"
        );
        Ok(variants)
    }
}
