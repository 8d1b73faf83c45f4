//! RocketShoes CLI - Drive the shopping cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart and its total
//! rs-cart show
//!
//! # Add one unit of product 1
//! rs-cart add 1
//!
//! # Set product 1 to three units
//! rs-cart update 1 3
//!
//! # Remove product 1
//! rs-cart remove 1
//!
//! # Empty the cart
//! rs-cart clear
//!
//! # Talk to a different API and keep the cart elsewhere
//! rs-cart --api-url http://localhost:4000 --storage-dir /tmp/cart show
//! ```
//!
//! Configuration is read from the environment (see `rocketshoes_cart::config`);
//! flags override it.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use rocketshoes_cart::{ApiClient, CartConfig, CartProvider, FileStorage, TracingNotifier};
use rocketshoes_core::ProductId;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::CliError;

/// Process exit status for any fatal error.
const EXIT_FAILURE: i32 = 1;

#[derive(Parser)]
#[command(name = "rs-cart")]
#[command(author, version, about = "RocketShoes shopping cart")]
struct Cli {
    /// Store API base URL (overrides `ROCKETSHOES_API_URL`)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory holding the persisted cart (overrides `ROCKETSHOES_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show cart contents and total
    Show,
    /// Print only the cart total
    Total,
    /// Empty the cart
    Clear,
    /// Add one unit of a product
    Add {
        /// Product ID
        product_id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        product_id: ProductId,
    },
    /// Set a product's quantity
    Update {
        /// Product ID
        product_id: ProductId,

        /// Desired quantity
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &CartConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn apply_overrides(config: &mut CartConfig, cli: &Cli) -> Result<(), CliError> {
    if let Some(raw) = &cli.api_url {
        config.api.base_url =
            rocketshoes_cart::config::parse_base_url(raw).map_err(|reason| {
                CliError::InvalidArgument(format!("--api-url {raw}: {reason}"))
            })?;
    }
    if let Some(dir) = &cli.storage_dir {
        config.storage.dir.clone_from(dir);
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match CartConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt::init();
            tracing::error!("{}", CliError::from(e));
            std::process::exit(EXIT_FAILURE);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rocketshoes_cli=info,rocketshoes_cart=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, &mut config).await {
        if e.is_infrastructure() {
            let event_id = sentry::capture_error(&e);
            tracing::error!(error = %e, sentry_event_id = %event_id, "Command failed");
        } else {
            tracing::error!("Command failed: {e}");
        }
        std::process::exit(EXIT_FAILURE);
    }
}

async fn run(cli: Cli, config: &mut CartConfig) -> Result<(), CliError> {
    apply_overrides(config, &cli)?;

    let api = ApiClient::new(&config.api)?;
    let storage = FileStorage::new(&config.storage.dir);
    let cart = CartProvider::load(api, storage, Arc::new(TracingNotifier), &config.storage.key)
        .await?;

    match cli.command {
        Commands::Show => commands::cart::show(&cart).await,
        Commands::Total => commands::cart::total(&cart).await,
        Commands::Clear => commands::cart::clear(&cart).await?,
        Commands::Add { product_id } => commands::cart::add(&cart, product_id).await?,
        Commands::Remove { product_id } => commands::cart::remove(&cart, product_id).await?,
        Commands::Update { product_id, amount } => {
            commands::cart::update(&cart, product_id, amount).await?;
        }
    }
    Ok(())
}
