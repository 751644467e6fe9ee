//! HTTP client for the marketplace item-lookup API.

mod signing;

use std::time::Duration;

use async_trait::async_trait;
use listport_core::{AppConfig, ListingId};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::MarketplaceApi;
use crate::error::MarketplaceError;
use crate::types::{
    ErrorEnvelope, GetItemsRequest, GetItemsResponse, GetVariationsRequest,
    GetVariationsResponse, PARTNER_TYPE,
};

use signing::{sign, SigningInput, CONTENT_ENCODING, CONTENT_TYPE};

/// Credentials and endpoint for one partner account.
///
/// Built once per credential set and never mutated; every request signs
/// with the values captured here.
#[derive(Clone)]
pub struct PaapiConfig {
    pub access_key: String,
    pub secret_key: String,
    pub partner_tag: String,
    pub host: String,
    pub region: String,
    pub marketplace: String,
}

impl PaapiConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            access_key: config.paapi_access_key.clone(),
            secret_key: config.paapi_secret_key.clone(),
            partner_tag: config.paapi_partner_tag.clone(),
            host: config.paapi_host.clone(),
            region: config.paapi_region.clone(),
            marketplace: config.paapi_marketplace.clone(),
        }
    }
}

impl std::fmt::Debug for PaapiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaapiConfig")
            .field("access_key", &"[redacted]")
            .field("secret_key", &"[redacted]")
            .field("partner_tag", &self.partner_tag)
            .field("host", &self.host)
            .field("region", &self.region)
            .field("marketplace", &self.marketplace)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    GetItems,
    GetVariations,
}

impl Operation {
    fn path(self) -> &'static str {
        match self {
            Operation::GetItems => "paapi5/getitems",
            Operation::GetVariations => "paapi5/getvariations",
        }
    }

    fn target(self) -> &'static str {
        match self {
            Operation::GetItems => "com.amazon.paapi5.v1.ProductAdvertisingAPIv1.GetItems",
            Operation::GetVariations => {
                "com.amazon.paapi5.v1.ProductAdvertisingAPIv1.GetVariations"
            }
        }
    }

    fn name(self) -> &'static str {
        match self {
            Operation::GetItems => "GetItems",
            Operation::GetVariations => "GetVariations",
        }
    }
}

/// Signed JSON client for `GetItems` and `GetVariations`.
///
/// Failures are surfaced once; this client never retries.
pub struct PaapiClient {
    client: Client,
    config: PaapiConfig,
    base_url: Url,
}

impl PaapiClient {
    /// Creates a client pointed at `https://{config.host}/`.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`MarketplaceError::InvalidEndpoint`] if the
    /// host does not form a valid URL.
    pub fn new(
        config: PaapiConfig,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, MarketplaceError> {
        let base_url = format!("https://{}/", config.host);
        Self::with_base_url(config, timeout_secs, user_agent, &base_url)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`PaapiClient::new`].
    pub fn with_base_url(
        config: PaapiConfig,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, MarketplaceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends rather than replaces.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| MarketplaceError::InvalidEndpoint {
            endpoint: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if base_url.host_str().is_none() {
            return Err(MarketplaceError::InvalidEndpoint {
                endpoint: base_url.to_string(),
                reason: "URL has no host".to_owned(),
            });
        }

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    fn endpoint(&self, operation: Operation) -> Result<Url, MarketplaceError> {
        self.base_url
            .join(operation.path())
            .map_err(|e| MarketplaceError::InvalidEndpoint {
                endpoint: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// `Host` header value reqwest will send for `url`.
    fn host_header(url: &Url) -> String {
        let host = url.host_str().unwrap_or_default();
        match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        }
    }

    /// Signs and sends one operation, mapping HTTP failures to typed errors.
    ///
    /// # Errors
    ///
    /// - [`MarketplaceError::RateLimited`] - HTTP 429.
    /// - [`MarketplaceError::Unauthorized`] - HTTP 401/403.
    /// - [`MarketplaceError::Api`] - other non-2xx with an `Errors` body.
    /// - [`MarketplaceError::UnexpectedStatus`] - other non-2xx.
    /// - [`MarketplaceError::Http`] - network or TLS failure.
    /// - [`MarketplaceError::Serialize`] - request body cannot be encoded.
    /// - [`MarketplaceError::Deserialize`] - 2xx body of the wrong shape.
    async fn post<Req, Resp>(&self, operation: Operation, body: &Req) -> Result<Resp, MarketplaceError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = self.endpoint(operation)?;
        let payload = serde_json::to_string(body).map_err(|e| MarketplaceError::Serialize {
            context: format!("{} request body", operation.name()),
            source: e,
        })?;
        let host = Self::host_header(&url);
        let signature = sign(
            &SigningInput {
                access_key: &self.config.access_key,
                secret_key: &self.config.secret_key,
                region: &self.config.region,
                host: &host,
                path: url.path(),
                target: operation.target(),
                payload: &payload,
            },
            chrono::Utc::now(),
        );

        let response = self
            .client
            .post(url.clone())
            .header(reqwest::header::CONTENT_ENCODING, CONTENT_ENCODING)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
            .header("x-amz-date", &signature.amz_date)
            .header("x-amz-target", operation.target())
            .header(reqwest::header::AUTHORIZATION, &signature.authorization)
            .body(payload)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(MarketplaceError::RateLimited { retry_after_secs });
        }

        let text = response.text().await?;

        if !status.is_success() {
            let first_error = serde_json::from_str::<ErrorEnvelope>(&text)
                .ok()
                .and_then(|env| env.errors.into_iter().next());

            if status == reqwest::StatusCode::UNAUTHORIZED
                || status == reqwest::StatusCode::FORBIDDEN
            {
                return Err(MarketplaceError::Unauthorized {
                    status: status.as_u16(),
                    message: first_error
                        .map(|e| e.message)
                        .unwrap_or_else(|| "request was not authorized".to_owned()),
                });
            }

            return Err(match first_error {
                Some(err) => MarketplaceError::Api {
                    status: status.as_u16(),
                    code: err.code,
                    message: err.message,
                },
                None => MarketplaceError::UnexpectedStatus {
                    status: status.as_u16(),
                    operation: operation.name().to_owned(),
                },
            });
        }

        serde_json::from_str::<Resp>(&text).map_err(|e| MarketplaceError::Deserialize {
            context: format!("{} response", operation.name()),
            source: e,
        })
    }
}

#[async_trait]
impl MarketplaceApi for PaapiClient {
    async fn get_item(
        &self,
        id: &ListingId,
        resources: &[&str],
    ) -> Result<GetItemsResponse, MarketplaceError> {
        let request = GetItemsRequest {
            item_ids: vec![id.as_str().to_owned()],
            resources: resources.iter().map(|r| (*r).to_owned()).collect(),
            partner_tag: self.config.partner_tag.clone(),
            partner_type: PARTNER_TYPE.to_owned(),
            marketplace: self.config.marketplace.clone(),
        };
        self.post(Operation::GetItems, &request).await
    }

    async fn get_variations(
        &self,
        id: &ListingId,
        resources: &[&str],
        page: u32,
    ) -> Result<GetVariationsResponse, MarketplaceError> {
        let request = GetVariationsRequest {
            asin: id.as_str().to_owned(),
            resources: resources.iter().map(|r| (*r).to_owned()).collect(),
            partner_tag: self.config.partner_tag.clone(),
            partner_type: PARTNER_TYPE.to_owned(),
            marketplace: self.config.marketplace.clone(),
            variation_page: page,
        };
        self.post(Operation::GetVariations, &request).await
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
