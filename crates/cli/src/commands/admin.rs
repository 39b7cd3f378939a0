//! Catalog management commands.
//!
//! Every command needs a signed-in session; the backend decides whether the
//! account is actually allowed to manage the catalog.

use clap::{Args, Subcommand};
use secrecy::SecretString;

use voltpeak_admin::dashboard::{low_stock, InventoryStats};
use voltpeak_admin::products::ProductDraft;
use voltpeak_admin::AdminClient;
use voltpeak_core::{HardwareSpecs, ProductId};
use voltpeak_storefront::state::StorefrontApp;

#[derive(Subcommand)]
pub enum AdminAction {
    /// Create a product
    Create(DraftArgs),
    /// Update a product (sends the full field set, like the edit form)
    Update {
        /// Product id
        id: String,

        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Delete a product (also prunes it from the local wishlist)
    Delete {
        /// Product id
        id: String,
    },
    /// Inventory statistics over the catalog
    Dashboard,
}

/// Product form fields, as the admin would type them.
#[derive(Args)]
pub struct DraftArgs {
    /// Product name
    #[arg(short, long)]
    pub name: String,

    /// Unit price
    #[arg(long)]
    pub price: String,

    /// Stock count (defaults to 10 when omitted)
    #[arg(long, default_value = "")]
    pub stock: String,

    /// Category (defaults to "General" when blank)
    #[arg(long, default_value = "")]
    pub category: String,

    /// Description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Primary image URL (a placeholder is generated when blank)
    #[arg(long, default_value = "")]
    pub image: String,

    /// Comma-separated color labels
    #[arg(long, default_value = "")]
    pub colors: String,

    /// Comma-separated gallery URLs
    #[arg(long, default_value = "")]
    pub gallery: String,

    /// Brand
    #[arg(long, default_value = "")]
    pub brand: String,

    /// Warranty text
    #[arg(long)]
    pub warranty: Option<String>,

    /// CPU socket
    #[arg(long)]
    pub socket: Option<String>,

    /// GPU model
    #[arg(long)]
    pub gpu_model: Option<String>,

    /// VRAM size
    #[arg(long)]
    pub vram: Option<String>,

    /// PSU wattage
    #[arg(long)]
    pub wattage: Option<String>,
}

impl DraftArgs {
    fn into_draft(self) -> ProductDraft {
        ProductDraft {
            name: self.name,
            price: self.price,
            stock: self.stock,
            description: self.description,
            category: self.category,
            image: self.image,
            colors: self.colors,
            gallery: self.gallery,
            brand: self.brand,
            specs: HardwareSpecs {
                warranty: self.warranty,
                socket: self.socket,
                gpu_model: self.gpu_model,
                vram: self.vram,
                wattage: self.wattage,
                ..HardwareSpecs::default()
            },
        }
    }
}

/// Build the privileged client from the signed-in session.
fn admin_client(app: &StorefrontApp) -> Result<AdminClient, Box<dyn std::error::Error>> {
    let token = app
        .session()
        .access_token()
        .ok_or("sign in first: vp-cli account login")?;
    Ok(AdminClient::new(
        app.config().api_base_url.clone(),
        SecretString::from(token.to_owned()),
    )?)
}

pub async fn admin(
    app: &mut StorefrontApp,
    action: AdminAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = admin_client(app)?;

    match action {
        AdminAction::Create(draft) => {
            let payload = draft.into_draft().normalize()?;
            let product = client.create_product(&payload).await?;
            println!("created {} ({})", product.name, product.id);
        }
        AdminAction::Update { id, draft } => {
            let id = ProductId::new(id);
            let payload = draft.into_draft().normalize()?;
            let product = client.update_product(&id, &payload).await?;
            app.client().invalidate_product(&id).await;
            println!("updated {} ({})", product.name, product.id);
        }
        AdminAction::Delete { id } => {
            let id = ProductId::new(id);
            client.delete_product(&id).await?;
            app.client().invalidate_product(&id).await;

            // The storefront mirrors the catalog: a deleted product leaves
            // the wishlist but stays in the cart until removed by hand.
            if app.prune_wishlist(&id)? {
                println!("deleted {id} (removed from wishlist too)");
            } else {
                println!("deleted {id}");
            }
        }
        AdminAction::Dashboard => {
            let products = client.list_products().await?;
            let stats = InventoryStats::from_products(&products);

            println!("total items:   {}", stats.total_items);
            println!("total value:   {}", stats.total_value);
            println!("out of stock:  {}", stats.out_of_stock);

            let low = low_stock(&products);
            if !low.is_empty() {
                println!("\nlow stock:");
                for product in low {
                    println!(
                        "  {}  {}  ({} left)",
                        product.id,
                        product.name,
                        product.stock.unwrap_or(0)
                    );
                }
            }
        }
    }
    Ok(())
}
