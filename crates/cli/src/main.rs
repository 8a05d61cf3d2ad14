//! Storeroom CLI - Pricing, catalog inspection and product submission tools.
//!
//! # Usage
//!
//! ```bash
//! # Derive a selling price
//! sr-cli price --mrp 5767 --discount 14
//!
//! # Validate and browse a catalog (bundled sample when FILE is omitted)
//! sr-cli catalog validate catalog.json
//! sr-cli catalog list
//! sr-cli catalog show --product premium-t-shirt-hk --variant 0
//!
//! # Submit a saved product form to the backend
//! sr-cli product submit new-tee.yaml
//! ```
//!
//! # Commands
//!
//! - `price` - Derive a selling price from MRP and discount
//! - `catalog` - Validate, list and inspect static catalogs
//! - `product` - Create and manage products on the backend

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use storeroom_admin::api::ProductQuery;
use storeroom_admin::{AdminConfig, HttpProductApi};
use storeroom_core::{CurrencyCode, PublishStatus};

mod commands;

#[derive(Parser)]
#[command(name = "sr-cli")]
#[command(author, version, about = "Storeroom CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive a selling price from MRP and discount
    Price {
        /// Maximum retail price
        #[arg(long)]
        mrp: String,

        /// Discount percentage (clamped to 0-100)
        #[arg(short, long, default_value = "0")]
        discount: String,

        /// Currency code (`INR`, `USD`, `EUR`, `GBP`, `CAD`, `AUD`)
        #[arg(short, long, default_value = "INR")]
        currency: CurrencyCode,

        /// Print the price record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate and inspect a static catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Create and manage products on the backend
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Load and validate a catalog
    Validate {
        /// Catalog file (JSON or YAML); the bundled sample when omitted
        file: Option<PathBuf>,
    },
    /// List products with their display variant, image and price
    List {
        /// Catalog file (JSON or YAML); the bundled sample when omitted
        file: Option<PathBuf>,
    },
    /// Walk the detail view selection for one product
    Show {
        /// Catalog file (JSON or YAML); the bundled sample when omitted
        file: Option<PathBuf>,

        /// Product index, id or slug
        #[arg(short, long)]
        product: String,

        /// Variant index to select
        #[arg(short, long)]
        variant: Option<usize>,

        /// Image index to select within the variant
        #[arg(short, long)]
        image: Option<usize>,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Validate a saved product form and create the product
    Submit {
        /// Product form file (JSON or YAML)
        form: PathBuf,
    },
    /// Change a product's publish status
    Status {
        /// Product ID
        id: String,

        /// New status (`draft`, `pending-review`, `published`, `archived`)
        status: String,
    },
    /// Delete a product
    Delete {
        /// Product ID
        id: String,
    },
    /// Fetch a product by slug
    Get {
        /// Product slug
        slug: String,
    },
    /// List products
    List {
        /// Only this category
        #[arg(long)]
        category: Option<String>,

        /// Only this publish status
        #[arg(long)]
        status: Option<PublishStatus>,

        /// Search text
        #[arg(short, long)]
        search: Option<String>,

        /// Page number
        #[arg(long)]
        page: Option<u32>,

        /// Page size
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[tokio::main]
async fn main() {
    storeroom_admin::telemetry::init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Price {
            mrp,
            discount,
            currency,
            json,
        } => commands::price::derive(&mrp, &discount, currency, json, &mut out)?,
        Commands::Catalog { action } => match action {
            CatalogAction::Validate { file } => {
                commands::catalog::validate(file.as_deref(), &mut out)?;
            }
            CatalogAction::List { file } => commands::catalog::list(file.as_deref(), &mut out)?,
            CatalogAction::Show {
                file,
                product,
                variant,
                image,
            } => commands::catalog::show(file.as_deref(), &product, variant, image, &mut out)?,
        },
        Commands::Product { action } => {
            let config = AdminConfig::from_env()?;
            let api = HttpProductApi::new(&config.api)?;
            tracing::debug!(base_url = %api.base_url(), "Using product backend");

            match action {
                ProductAction::Submit { form } => {
                    commands::product::submit(&api, &form, config.default_currency, &mut out)
                        .await?;
                }
                ProductAction::Status { id, status } => {
                    commands::product::set_status(&api, &id, &status, &mut out).await?;
                }
                ProductAction::Delete { id } => {
                    commands::product::delete(&api, &id, &mut out).await?;
                }
                ProductAction::Get { slug } => {
                    commands::product::get(&api, &slug, &mut out).await?;
                }
                ProductAction::List {
                    category,
                    status,
                    search,
                    page,
                    limit,
                } => {
                    let query = ProductQuery {
                        category,
                        publish_status: status,
                        search,
                        page,
                        limit,
                    };
                    commands::product::list(&api, &query, &mut out).await?;
                }
            }
        }
    }
    Ok(())
}
