//! Catalog browsing and wishlist commands.

use clap::Subcommand;
use tokio::io::AsyncBufReadExt;

use voltpeak_core::ProductId;
use voltpeak_storefront::catalog::{CatalogQuery, SortOrder};
use voltpeak_storefront::state::StorefrontApp;

use super::badge;

#[derive(Subcommand)]
pub enum ProductsAction {
    /// One-shot catalog search
    Search {
        /// Free-text keyword, matched by the backend
        #[arg(short, long, default_value = "")]
        keyword: String,

        /// Lower price bound (empty = unbounded)
        #[arg(long, default_value = "")]
        min_price: String,

        /// Upper price bound (empty = unbounded)
        #[arg(long, default_value = "")]
        max_price: String,

        /// Sort order: `asc` or `desc` by price
        #[arg(long, default_value = "asc")]
        sort: SortOrder,

        /// Client-side category filter over the fetched results
        #[arg(long, default_value = "All")]
        category: String,
    },
    /// Interactive search: every typed line re-queries after the quiet
    /// window, so rapid edits collapse into one request
    Browse,
    /// Show one product's detail view
    Show {
        /// Product id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum WishlistAction {
    /// Add the product if absent, remove it if present
    Toggle {
        /// Product id
        id: String,
    },
    /// List wishlist entries
    Show,
}

pub async fn products(
    app: &StorefrontApp,
    action: ProductsAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ProductsAction::Search {
            keyword,
            min_price,
            max_price,
            sort,
            category,
        } => {
            let pipeline = app.search_pipeline();
            let results = pipeline
                .query_now(CatalogQuery {
                    keyword,
                    min_price,
                    max_price,
                    sort,
                })
                .await?;

            let categories = voltpeak_storefront::catalog::derive_categories(&results);
            let visible = voltpeak_storefront::catalog::filter_by_category(&results, &category);

            println!("categories: {}", categories.join(" | "));
            if visible.is_empty() {
                println!("no products matched");
            }
            for product in visible {
                print_product_row(product, app);
            }
        }
        ProductsAction::Browse => browse(app).await?,
        ProductsAction::Show { id } => {
            let product = app.client().get_product(&ProductId::new(id)).await?;
            println!("{}  [{}]", product.name, product.category);
            if let Some(brand) = &product.brand {
                println!("brand: {brand}");
            }
            println!("price: {}", product.price);
            let stock = product.stock_or_default();
            if product.is_known_out_of_stock() {
                println!("OUT OF STOCK");
            } else if product.is_last_unit() {
                println!("in stock: {stock} (last one!)");
            } else {
                println!("in stock: {stock}");
            }
            if product.has_color_options() {
                println!("colors: {}", product.colors.join(", "));
            }
            if !product.description.is_empty() {
                println!("\n{}", product.description);
            }
            for url in product.gallery_urls() {
                println!("image: {url}");
            }
        }
    }
    Ok(())
}

/// Interactive debounced search over stdin.
///
/// Each line becomes the new keyword; results print as they settle. An
/// empty line clears the keyword, `/quit` exits.
async fn browse(app: &StorefrontApp) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = app.search_pipeline();

    let printer = {
        let pipeline = pipeline.clone();
        let mut applied = pipeline.subscribe();
        tokio::spawn(async move {
            while applied.changed().await.is_ok() {
                pipeline.with_state(|state| {
                    println!("-- {} result(s)", state.products.len());
                    for product in state.visible() {
                        println!("  {}  {}", product.price, product.name);
                    }
                });
            }
        })
    };

    println!("type to search ({}ms debounce), /quit to exit", app.config().search_debounce.as_millis());
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line == "/quit" {
            break;
        }
        pipeline.submit(CatalogQuery {
            keyword: line.to_owned(),
            ..CatalogQuery::default()
        });
    }

    printer.abort();
    Ok(())
}

pub async fn wishlist(
    app: &mut StorefrontApp,
    action: WishlistAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        WishlistAction::Toggle { id } => {
            let product = app.client().get_product(&ProductId::new(id)).await?;
            let name = product.name.clone();
            if app.toggle_wishlist(product)? {
                println!("added {name} to wishlist{}", badge(app.wishlist().len()));
            } else {
                println!("removed {name} from wishlist{}", badge(app.wishlist().len()));
            }
        }
        WishlistAction::Show => {
            if app.wishlist().is_empty() {
                println!("wishlist is empty");
            }
            for product in app.wishlist().entries() {
                print_product_row(product, app);
            }
        }
    }
    Ok(())
}

fn print_product_row(product: &voltpeak_core::Product, app: &StorefrontApp) {
    let heart = if app.wishlist().contains(&product.id) {
        "*"
    } else {
        " "
    };
    println!(
        "{heart} {}  {:<30}  [{}]  {}",
        product.id,
        product.name,
        product.category,
        product.price
    );
}
