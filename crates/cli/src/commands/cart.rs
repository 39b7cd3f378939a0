//! Cart and checkout commands.

use clap::Subcommand;

use voltpeak_core::ProductId;
use voltpeak_storefront::cart::{compute_totals, CouponSlot};
use voltpeak_storefront::checkout::CheckoutState;
use voltpeak_storefront::state::StorefrontApp;

use super::badge;

#[derive(Subcommand)]
pub enum CartAction {
    /// Add a product to the cart
    Add {
        /// Product id
        id: String,

        /// Chosen color (required when the product has color options)
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Remove the line at a position (as listed by `cart show`)
    Remove {
        /// Zero-based line position
        index: usize,
    },
    /// Show the cart with totals, optionally under a coupon
    Show {
        /// Coupon code to apply
        #[arg(long)]
        coupon: Option<String>,
    },
    /// Submit the cart as an order
    Checkout {
        /// Coupon code to apply
        #[arg(long)]
        coupon: Option<String>,
    },
}

pub async fn cart(
    app: &mut StorefrontApp,
    action: CartAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CartAction::Add { id, color } => {
            let product = app.client().get_product(&ProductId::new(id)).await?;
            let name = product.name.clone();
            app.add_to_cart(product, color.as_deref())?;
            println!("added {name} to cart{}", badge(app.cart().len()));
            show_cart(app, &CouponSlot::new());
        }
        CartAction::Remove { index } => {
            let removed = app.remove_from_cart(index)?;
            println!(
                "removed {} from cart{}",
                removed.product.name,
                badge(app.cart().len())
            );
        }
        CartAction::Show { coupon } => {
            let slot = resolve_coupon(app, coupon.as_deref()).await;
            show_cart(app, &slot);
        }
        CartAction::Checkout { coupon } => {
            let slot = resolve_coupon(app, coupon.as_deref()).await;
            let mut flow = app.checkout_flow();

            println!("processing...");
            match app.checkout(&mut flow, &slot).await {
                Ok(order_id) => {
                    debug_assert!(matches!(flow.state(), CheckoutState::Success { .. }));
                    println!("payment complete");
                    println!("order id: {order_id}");
                }
                Err(e) => {
                    // Back to idle; the cart is untouched.
                    println!("checkout failed: {e}");
                }
            }
        }
    }
    Ok(())
}

/// Resolve a coupon code into a fresh per-session slot, printing the
/// confirmation or failure message.
async fn resolve_coupon(app: &StorefrontApp, code: Option<&str>) -> CouponSlot {
    let mut slot = CouponSlot::new();
    if let Some(code) = code {
        slot.apply(app.client(), code).await;
        if let Some(message) = slot.message() {
            println!("coupon: {message}");
        }
    }
    slot
}

fn show_cart(app: &StorefrontApp, coupons: &CouponSlot) {
    if app.cart().is_empty() {
        println!("[ EMPTY CART ]");
        return;
    }

    for (index, line) in app.cart().lines().iter().enumerate() {
        println!(
            "{index}: {}  [{}]  {}  color={}",
            line.product.name,
            line.product.category,
            line.product.price,
            line.selected_color
        );
    }

    let totals = compute_totals(app.cart().lines(), coupons.active());
    println!("subtotal: {}", totals.subtotal);
    if !totals.discount.is_zero() {
        println!("discount: -{}", totals.discount);
    }
    println!("total:    {}", totals.total);
}
