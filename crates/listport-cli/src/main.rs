mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "listport")]
#[command(about = "Import marketplace listings into a destination catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the listing identifier embedded in a marketplace URL
    Extract {
        /// Marketplace listing URL
        url: String,
    },
    /// Fetch a listing and print the product draft as JSON, without touching the catalog
    Plan {
        /// Marketplace listing URL
        url: String,
    },
    /// Import a listing into the destination catalog and print the outcome as JSON
    Import {
        /// Marketplace listing URL
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { url } => {
            init_tracing("warn")?;
            commands::run_extract(&url)
        }
        Commands::Plan { url } => {
            let config = listport_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            commands::run_plan(&config, &url).await
        }
        Commands::Import { url } => {
            let config = listport_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            commands::run_import(&config, &url).await
        }
    }
}

/// Installs the fmt subscriber. `RUST_LOG` wins over `fallback`. Logs go to
/// stderr so command output on stdout stays machine-readable.
fn init_tracing(fallback: &str) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
