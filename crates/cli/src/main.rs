//! Voltpeak CLI - storefront and catalog management front end.
//!
//! # Usage
//!
//! ```bash
//! # Search the catalog (one-shot)
//! vp-cli products search -k ryzen --max-price 20000 --sort asc
//!
//! # Interactive debounced search (each typed line re-queries)
//! vp-cli products browse
//!
//! # Cart and checkout
//! vp-cli cart add 6650f2a1 --color White
//! vp-cli cart show --coupon SAVE30
//! vp-cli cart checkout --coupon SAVE30
//!
//! # Account
//! vp-cli account login -e op@example.com -p hunter22
//!
//! # Catalog management (requires an admin account)
//! vp-cli admin create -n "RTX 4070 SUPER" --price 21900 --category GPU
//! vp-cli admin dashboard
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

use voltpeak_storefront::config::StorefrontConfig;
use voltpeak_storefront::state::StorefrontApp;

mod commands;

#[derive(Parser)]
#[command(name = "vp-cli")]
#[command(author, version, about = "Voltpeak storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and search the catalog
    Products {
        #[command(subcommand)]
        action: commands::shop::ProductsAction,
    },
    /// Manage the cart and check out
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Toggle and list wishlist entries
    Wishlist {
        #[command(subcommand)]
        action: commands::shop::WishlistAction,
    },
    /// Plan a custom PC build
    Build(commands::build::BuildArgs),
    /// Account and session management
    Account {
        #[command(subcommand)]
        action: commands::account::AccountAction,
    },
    /// Catalog management (admin)
    Admin {
        #[command(subcommand)]
        action: commands::admin::AdminAction,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter; default to info for our crates.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "vp_cli=info,voltpeak_storefront=info,voltpeak_admin=info".into()
    });
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let mut app = StorefrontApp::init(config)?;

    match cli.command {
        Commands::Products { action } => commands::shop::products(&app, action).await?,
        Commands::Cart { action } => commands::cart::cart(&mut app, action).await?,
        Commands::Wishlist { action } => commands::shop::wishlist(&mut app, action).await?,
        Commands::Build(args) => commands::build::build(&app, args).await?,
        Commands::Account { action } => commands::account::account(&mut app, action).await?,
        Commands::Admin { action } => commands::admin::admin(&mut app, action).await?,
    }
    Ok(())
}
