//! Command handlers. Each prints its result to stdout.

use anyhow::Context;
use listport_catalog::{ShopifyAdminClient, ShopifyConfig};
use listport_core::AppConfig;
use listport_marketplace::{extract_listing_id, FixedDelay, PaapiClient, PaapiConfig};
use listport_pipeline::{ImportPipeline, ImportSettings};

pub(crate) fn run_extract(url: &str) -> anyhow::Result<()> {
    let id = extract_listing_id(url)?;
    println!("{id}");
    Ok(())
}

pub(crate) async fn run_plan(config: &AppConfig, url: &str) -> anyhow::Result<()> {
    let pipeline = build_pipeline(config)?;
    let plan = pipeline.plan(url).await?;
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

pub(crate) async fn run_import(config: &AppConfig, url: &str) -> anyhow::Result<()> {
    let shopify = ShopifyConfig::from_app_config(config)?;
    let catalog = ShopifyAdminClient::new(
        &shopify,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("failed to build catalog client")?;
    let pipeline = build_pipeline(config)?;

    match listport_pipeline::run_import(&pipeline, &catalog, url).await {
        Ok(outcome) => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Ok(())
        }
        Err(e) => {
            if let Some(product_id) = e.created_product_id() {
                tracing::error!(
                    product_id,
                    "product was created on the destination but the import failed"
                );
            }
            Err(e.into())
        }
    }
}

fn build_pipeline(config: &AppConfig) -> anyhow::Result<ImportPipeline<PaapiClient, FixedDelay>> {
    let client = PaapiClient::new(
        PaapiConfig::from_app_config(config),
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("failed to build marketplace client")?;

    Ok(ImportPipeline::new(
        client,
        FixedDelay::from_millis(config.inter_call_delay_ms),
        ImportSettings::from_app_config(config),
    ))
}
