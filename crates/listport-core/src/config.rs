use crate::app_config::{AppConfig, Environment};
use crate::mapping::PartialVariantPolicy;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can use a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_i64 = |var: &str, default: &str| -> Result<i64, ConfigError> {
        or_default(var, default)
            .parse::<i64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("LISTPORT_ENV", "development"));
    let log_level = or_default("LISTPORT_LOG_LEVEL", "info");

    let paapi_access_key = require("PAAPI_ACCESS_KEY")?;
    let paapi_secret_key = require("PAAPI_SECRET_KEY")?;
    let paapi_partner_tag = require("PAAPI_PARTNER_TAG")?;
    let paapi_host = or_default("PAAPI_HOST", "webservices.amazon.com");
    let paapi_region = or_default("PAAPI_REGION", "us-east-1");
    let paapi_marketplace = or_default("PAAPI_MARKETPLACE", "www.amazon.com");

    let shopify_shop_domain = lookup("SHOPIFY_SHOP_DOMAIN")
        .ok()
        .filter(|v| !v.trim().is_empty());
    let shopify_admin_token = lookup("SHOPIFY_ADMIN_TOKEN")
        .ok()
        .filter(|v| !v.trim().is_empty());
    let shopify_api_version = or_default("SHOPIFY_API_VERSION", "2025-01");

    let request_timeout_secs = parse_u64("LISTPORT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("LISTPORT_USER_AGENT", "listport/0.1 (catalog-import)");
    let inter_call_delay_ms = parse_u64("LISTPORT_INTER_CALL_DELAY_MS", "2000")?;

    let default_stock = parse_i64("LISTPORT_DEFAULT_STOCK", "100")?;
    if default_stock < 0 {
        return Err(invalid(
            "LISTPORT_DEFAULT_STOCK",
            "must not be negative".to_string(),
        ));
    }

    let partial_variants = or_default("LISTPORT_PARTIAL_VARIANTS", "keep")
        .parse::<PartialVariantPolicy>()
        .map_err(|reason| invalid("LISTPORT_PARTIAL_VARIANTS", reason))?;

    let max_locations = parse_u32("LISTPORT_MAX_LOCATIONS", "10")?;
    if max_locations == 0 {
        return Err(invalid(
            "LISTPORT_MAX_LOCATIONS",
            "must be at least 1".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        log_level,
        paapi_access_key,
        paapi_secret_key,
        paapi_partner_tag,
        paapi_host,
        paapi_region,
        paapi_marketplace,
        shopify_shop_domain,
        shopify_admin_token,
        shopify_api_version,
        request_timeout_secs,
        user_agent,
        inter_call_delay_ms,
        default_stock,
        partial_variants,
        max_locations,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
