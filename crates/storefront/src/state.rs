//! The engine object front ends drive.
//!
//! `StorefrontApp` wires together configuration, the backend client, the
//! durable store and the shopper's state, and owns the persistence rule:
//! every cart or wishlist mutation is mirrored to the store immediately.

use tracing::instrument;

use voltpeak_core::{OrderId, Product, ProductId};

use crate::api::ApiClient;
use crate::cart::pricing::compute_totals;
use crate::cart::{Cart, CartLine, CouponSlot};
use crate::catalog::SearchPipeline;
use crate::checkout::CheckoutFlow;
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::session::Session;
use crate::store::{keys, LocalStore};
use crate::wishlist::Wishlist;

/// The assembled storefront engine.
pub struct StorefrontApp {
    config: StorefrontConfig,
    client: ApiClient,
    store: LocalStore,
    session: Session,
    cart: Cart,
    wishlist: Wishlist,
}

impl StorefrontApp {
    /// Assemble the engine: open the store, load persisted shopper state
    /// and build the backend client.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AppError`] when the store cannot be opened or a
    /// persisted record is corrupt.
    pub fn init(config: StorefrontConfig) -> Result<Self> {
        let client = ApiClient::new(&config)?;
        let store = LocalStore::open(&config.data_dir)?;
        let session = Session::load(store.clone())?;
        let cart = store
            .get::<Vec<CartLine>>(keys::CART)?
            .map(Cart::from_lines)
            .unwrap_or_default();
        let wishlist = store
            .get::<Vec<Product>>(keys::WISHLIST)?
            .map(Wishlist::from_entries)
            .unwrap_or_default();

        Ok(Self {
            config,
            client,
            store,
            session,
            cart,
            wishlist,
        })
    }

    /// Engine configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// The backend client.
    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// The durable store.
    #[must_use]
    pub const fn store(&self) -> &LocalStore {
        &self.store
    }

    /// The session (theme, admin mode, identity).
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable session access; setters persist themselves.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// The cart, read-only. Mutations go through the `*_cart` methods so
    /// persistence can't be skipped.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The wishlist, read-only.
    #[must_use]
    pub const fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    /// Build the debounced search pipeline for interactive browsing.
    #[must_use]
    pub fn search_pipeline(&self) -> SearchPipeline<ApiClient> {
        SearchPipeline::new(self.client.clone(), self.config.search_debounce)
    }

    /// Build a checkout flow with the configured minimum visible duration.
    #[must_use]
    pub const fn checkout_flow(&self) -> CheckoutFlow {
        CheckoutFlow::new(self.config.checkout_min_visible)
    }

    /// Re-read all persisted shopper state. The front end's reload trigger,
    /// the analog of the browser build's focus/storage listeners.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AppError`] when a persisted record cannot be read.
    pub fn reload(&mut self) -> Result<()> {
        self.session.reload()?;
        self.cart = self
            .store
            .get::<Vec<CartLine>>(keys::CART)?
            .map(Cart::from_lines)
            .unwrap_or_default();
        self.wishlist = self
            .store
            .get::<Vec<Product>>(keys::WISHLIST)?
            .map(Wishlist::from_entries)
            .unwrap_or_default();
        Ok(())
    }

    /// Add a product to the cart and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::cart::CartError`] for blocked adds (out of stock,
    /// missing color choice); the cart and store are untouched.
    #[instrument(skip(self, product), fields(product = %product.id))]
    pub fn add_to_cart(&mut self, product: Product, selected_color: Option<&str>) -> Result<()> {
        self.cart.add(product, selected_color)?;
        self.persist_cart()?;
        Ok(())
    }

    /// Remove the cart line at `index` and persist the change.
    ///
    /// # Errors
    ///
    /// Returns [`crate::cart::CartError::LineOutOfRange`] for bad indices.
    pub fn remove_from_cart(&mut self, index: usize) -> Result<CartLine> {
        let removed = self.cart.remove(index)?;
        self.persist_cart()?;
        Ok(removed)
    }

    /// Toggle a product on the wishlist and persist it. Returns whether the
    /// product is wishlisted afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AppError`] when persisting fails.
    pub fn toggle_wishlist(&mut self, product: Product) -> Result<bool> {
        let added = self.wishlist.toggle(product);
        self.persist_wishlist()?;
        Ok(added)
    }

    /// Drop a deleted product from the wishlist and persist the change.
    /// The cart is deliberately left alone - snapshots of removed catalog
    /// entries remain purchasable until the shopper removes them.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AppError`] when persisting fails.
    pub fn prune_wishlist(&mut self, id: &ProductId) -> Result<bool> {
        let pruned = self.wishlist.prune(id);
        if pruned {
            self.persist_wishlist()?;
        }
        Ok(pruned)
    }

    /// Run the full checkout: compute totals under the active coupon,
    /// submit, and let the flow clear the cart on success.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AppError`] for empty carts and backend failures;
    /// the cart survives any failure.
    pub async fn checkout(
        &mut self,
        flow: &mut CheckoutFlow,
        coupons: &CouponSlot,
    ) -> Result<OrderId> {
        let totals = compute_totals(self.cart.lines(), coupons.active());
        flow.submit(
            &self.client,
            &mut self.cart,
            &self.store,
            &totals,
            coupons.code(),
        )
        .await
    }

    fn persist_cart(&self) -> Result<()> {
        self.store.set(keys::CART, self.cart.lines())?;
        Ok(())
    }

    fn persist_wishlist(&self) -> Result<()> {
        self.store.set(keys::WISHLIST, self.wishlist.entries())?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicU64, Ordering};

    use voltpeak_core::Price;

    fn test_config() -> StorefrontConfig {
        static SEQ: AtomicU64 = AtomicU64::new(0);
        let dir = std::env::temp_dir().join(format!(
            "voltpeak-app-test-{}-{}",
            std::process::id(),
            SEQ.fetch_add(1, Ordering::SeqCst)
        ));
        StorefrontConfig {
            data_dir: dir,
            ..StorefrontConfig::default()
        }
    }

    fn product(id: &str, price: i64) -> Product {
        Product::new(id, format!("part {id}"), Price::from_units(price))
    }

    #[test]
    fn test_cart_mutations_are_mirrored_to_store() {
        let config = test_config();
        let mut app = StorefrontApp::init(config.clone()).unwrap();

        app.add_to_cart(product("p1", 1000), None).unwrap();
        app.add_to_cart(product("p2", 500), None).unwrap();
        app.remove_from_cart(0).unwrap();

        // A second engine over the same data dir sees the surviving line.
        let reopened = StorefrontApp::init(config).unwrap();
        assert_eq!(reopened.cart().len(), 1);
        assert_eq!(reopened.cart().lines()[0].product.id.as_str(), "p2");
    }

    #[test]
    fn test_wishlist_toggle_and_prune_are_mirrored() {
        let config = test_config();
        let mut app = StorefrontApp::init(config.clone()).unwrap();

        assert!(app.toggle_wishlist(product("p1", 1000)).unwrap());
        assert!(app.toggle_wishlist(product("p2", 2000)).unwrap());
        assert!(app.prune_wishlist(&"p1".into()).unwrap());

        let reopened = StorefrontApp::init(config).unwrap();
        assert_eq!(reopened.wishlist().len(), 1);
        assert!(reopened.wishlist().contains(&"p2".into()));
    }

    #[test]
    fn test_blocked_add_leaves_store_untouched() {
        let config = test_config();
        let mut app = StorefrontApp::init(config).unwrap();

        let mut sold_out = product("p1", 1000);
        sold_out.stock = Some(0);
        assert!(app.add_to_cart(sold_out, None).is_err());

        assert!(app.cart().is_empty());
        assert!(!app.store().exists(keys::CART));
    }

    #[test]
    fn test_reload_picks_up_external_mutations() {
        let config = test_config();
        let mut app = StorefrontApp::init(config.clone()).unwrap();

        let mut other = StorefrontApp::init(config).unwrap();
        other.add_to_cart(product("p9", 750), None).unwrap();

        assert!(app.cart().is_empty());
        app.reload().unwrap();
        assert_eq!(app.cart().len(), 1);
    }
}
