use crate::mapping::PartialVariantPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub paapi_access_key: String,
    pub paapi_secret_key: String,
    pub paapi_partner_tag: String,
    pub paapi_host: String,
    pub paapi_region: String,
    pub paapi_marketplace: String,
    pub shopify_shop_domain: Option<String>,
    pub shopify_admin_token: Option<String>,
    pub shopify_api_version: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub inter_call_delay_ms: u64,
    pub default_stock: i64,
    pub partial_variants: PartialVariantPolicy,
    pub max_locations: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("paapi_access_key", &"[redacted]")
            .field("paapi_secret_key", &"[redacted]")
            .field("paapi_partner_tag", &self.paapi_partner_tag)
            .field("paapi_host", &self.paapi_host)
            .field("paapi_region", &self.paapi_region)
            .field("paapi_marketplace", &self.paapi_marketplace)
            .field("shopify_shop_domain", &self.shopify_shop_domain)
            .field(
                "shopify_admin_token",
                &self.shopify_admin_token.as_ref().map(|_| "[redacted]"),
            )
            .field("shopify_api_version", &self.shopify_api_version)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("inter_call_delay_ms", &self.inter_call_delay_ms)
            .field("default_stock", &self.default_stock)
            .field("partial_variants", &self.partial_variants)
            .field("max_locations", &self.max_locations)
            .finish()
    }
}
