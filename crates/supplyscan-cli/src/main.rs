mod scrape;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "supplyscan")]
#[command(about = "Scrape electrical wholesaler listings, deals and voucher codes")]
struct Cli {
    /// Supplier registry to use instead of `SUPPLYSCAN_SUPPLIERS_PATH`
    #[arg(long, global = true)]
    suppliers: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List enabled suppliers and their categories
    Suppliers,
    /// Scrape product listings
    Products {
        /// Supplier slug (see `supplyscan suppliers`)
        #[arg(long, required_unless_present = "all", conflicts_with = "all")]
        supplier: Option<String>,

        /// Restrict the run to one category key
        #[arg(long, requires = "supplier")]
        category: Option<String>,

        /// Scrape every enabled supplier concurrently
        #[arg(long)]
        all: bool,
    },
    /// Scrape a supplier's deals page
    Deals {
        #[arg(long)]
        supplier: String,
    },
    /// Scrape a supplier's voucher-code page
    Coupons {
        #[arg(long)]
        supplier: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = supplyscan_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = cli.suppliers {
        config.suppliers_path = path;
    }
    let registry = supplyscan_core::load_suppliers(&config.suppliers_path)?;

    match cli.command {
        Commands::Suppliers => scrape::list_suppliers(&registry)?,
        Commands::Products {
            supplier,
            category,
            all,
        } => {
            if all {
                scrape::products_all(&config, &registry).await?;
            } else if let Some(slug) = supplier {
                scrape::products(&config, &registry, &slug, category.as_deref()).await?;
            }
        }
        Commands::Deals { supplier } => scrape::deals(&config, &registry, &supplier).await?,
        Commands::Coupons { supplier } => scrape::coupons(&config, &registry, &supplier).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
