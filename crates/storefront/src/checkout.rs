//! Checkout flow: `Idle -> Processing -> Success`, or back to `Idle` on
//! failure.
//!
//! The flow enforces a minimum visible processing duration so the shopper
//! always perceives the order being worked on - the state may not advance to
//! `Success` before that minimum elapses, even when the backend answers
//! sooner. A failure surfaces immediately; checkout is not cancellable and
//! never retried.

use std::time::Duration;

use tokio::time::Instant;
use tracing::instrument;

use voltpeak_core::OrderId;

use crate::api::CheckoutGateway;
use crate::cart::pricing::CartTotals;
use crate::cart::{Cart, CartError};
use crate::error::AppError;
use crate::store::{keys, LocalStore};

/// Where the checkout currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckoutState {
    /// Nothing in flight.
    #[default]
    Idle,
    /// Order submitted; minimum visible duration may still be running.
    Processing,
    /// Order placed; the backend's order id is on display.
    Success {
        /// Backend-assigned order identifier.
        order_id: OrderId,
    },
}

/// The three-state checkout driver.
#[derive(Debug)]
pub struct CheckoutFlow {
    state: CheckoutState,
    min_visible: Duration,
}

impl CheckoutFlow {
    /// Create a flow with the given minimum visible processing duration.
    #[must_use]
    pub const fn new(min_visible: Duration) -> Self {
        Self {
            state: CheckoutState::Idle,
            min_visible,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Dismiss the success (or stuck) modal back to idle.
    pub fn dismiss(&mut self) {
        self.state = CheckoutState::Idle;
    }

    /// Submit the cart as an order.
    ///
    /// On success the cart is cleared atomically - in memory and in the
    /// durable store - and the state lands on `Success`. On any failure the
    /// state returns to `Idle` with the cart untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Empty`] for an empty cart (before any network
    /// call) and [`AppError::Api`] when the backend rejects the order.
    #[instrument(skip_all, fields(lines = cart.len()))]
    pub async fn submit<G: CheckoutGateway>(
        &mut self,
        gateway: &G,
        cart: &mut Cart,
        store: &LocalStore,
        totals: &CartTotals,
        coupon_code: &str,
    ) -> Result<OrderId, AppError> {
        if cart.is_empty() {
            return Err(CartError::Empty.into());
        }

        self.state = CheckoutState::Processing;
        let started = Instant::now();

        let receipt = match gateway
            .place_order(cart.lines(), totals.total, coupon_code)
            .await
        {
            Ok(receipt) => receipt,
            Err(e) => {
                tracing::warn!(error = %e, "checkout failed");
                self.state = CheckoutState::Idle;
                return Err(e.into());
            }
        };

        // Keep the processing state visible for the remainder of the
        // minimum duration.
        let elapsed = started.elapsed();
        if elapsed < self.min_visible {
            tokio::time::sleep(self.min_visible - elapsed).await;
        }

        cart.clear();
        if let Err(e) = store.delete(keys::CART) {
            // The order is already placed; a cleanup failure must not fail
            // the checkout. The next persisting mutation rewrites the key.
            tracing::warn!(error = %e, "failed to clear persisted cart");
        }

        tracing::info!(order_id = %receipt.order_id, "order placed");
        self.state = CheckoutState::Success {
            order_id: receipt.order_id.clone(),
        };
        Ok(receipt.order_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    use voltpeak_core::{Price, Product};

    use crate::api::types::CheckoutReceipt;
    use crate::api::ApiError;
    use crate::cart::compute_totals;
    use crate::cart::CartLine;

    const MIN_VISIBLE: Duration = Duration::from_millis(2500);

    struct FakeGateway {
        latency: Duration,
        fail: bool,
        seen: Mutex<Option<(usize, Price, String)>>,
    }

    impl FakeGateway {
        fn instant() -> Self {
            Self {
                latency: Duration::ZERO,
                fail: false,
                seen: Mutex::new(None),
            }
        }

        fn slow(latency: Duration) -> Self {
            Self {
                latency,
                ..Self::instant()
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::instant()
            }
        }
    }

    impl CheckoutGateway for FakeGateway {
        async fn place_order(
            &self,
            items: &[CartLine],
            total: Price,
            coupon: &str,
        ) -> Result<CheckoutReceipt, ApiError> {
            *self.seen.lock().unwrap() = Some((items.len(), total, coupon.to_owned()));
            tokio::time::sleep(self.latency).await;
            if self.fail {
                return Err(ApiError::Backend {
                    status: 500,
                    message: "payment declined".to_owned(),
                });
            }
            Ok(CheckoutReceipt {
                order_id: voltpeak_core::OrderId::new("ORD-1042"),
            })
        }
    }

    fn store() -> LocalStore {
        static SEQ: AtomicU64 = AtomicU64::new(0);
        let dir = std::env::temp_dir().join(format!(
            "voltpeak-checkout-test-{}-{}",
            std::process::id(),
            SEQ.fetch_add(1, Ordering::SeqCst)
        ));
        LocalStore::open(dir).unwrap()
    }

    fn loaded_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(Product::new("p1", "CPU", Price::from_units(1000)), None)
            .unwrap();
        cart
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_clears_cart_and_store() {
        let gateway = FakeGateway::instant();
        let store = store();
        let mut cart = loaded_cart();
        store.set(keys::CART, cart.lines()).unwrap();

        let totals = compute_totals(cart.lines(), None);
        let mut flow = CheckoutFlow::new(MIN_VISIBLE);

        let order_id = flow
            .submit(&gateway, &mut cart, &store, &totals, "SAVE30")
            .await
            .unwrap();

        assert_eq!(order_id.as_str(), "ORD-1042");
        assert!(matches!(flow.state(), CheckoutState::Success { .. }));
        assert!(cart.is_empty());
        assert!(!store.exists(keys::CART));

        let (items, total, coupon) = gateway.seen.lock().unwrap().clone().unwrap();
        assert_eq!(items, 1);
        assert_eq!(total, Price::from_units(1000));
        assert_eq!(coupon, "SAVE30");
    }

    #[tokio::test(start_paused = true)]
    async fn test_minimum_visible_duration_is_enforced() {
        let gateway = FakeGateway::instant();
        let store = store();
        let mut cart = loaded_cart();
        let totals = compute_totals(cart.lines(), None);
        let mut flow = CheckoutFlow::new(MIN_VISIBLE);

        let started = Instant::now();
        flow.submit(&gateway, &mut cart, &store, &totals, "")
            .await
            .unwrap();

        // Even with an instant backend, success is not observable earlier.
        assert!(started.elapsed() >= MIN_VISIBLE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_network_adds_no_extra_delay() {
        let latency = Duration::from_millis(4000);
        let gateway = FakeGateway::slow(latency);
        let store = store();
        let mut cart = loaded_cart();
        let totals = compute_totals(cart.lines(), None);
        let mut flow = CheckoutFlow::new(MIN_VISIBLE);

        let started = Instant::now();
        flow.submit(&gateway, &mut cart, &store, &totals, "")
            .await
            .unwrap();

        let elapsed = started.elapsed();
        assert!(elapsed >= latency);
        assert!(elapsed < latency + MIN_VISIBLE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_returns_to_idle_with_cart_intact() {
        let gateway = FakeGateway::failing();
        let store = store();
        let mut cart = loaded_cart();
        store.set(keys::CART, cart.lines()).unwrap();
        let totals = compute_totals(cart.lines(), None);
        let mut flow = CheckoutFlow::new(MIN_VISIBLE);

        let err = flow
            .submit(&gateway, &mut cart, &store, &totals, "")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Api(_)));
        assert_eq!(flow.state(), &CheckoutState::Idle);
        assert_eq!(cart.len(), 1);
        assert!(store.exists(keys::CART));
    }

    #[tokio::test]
    async fn test_empty_cart_is_blocked_before_any_call() {
        let gateway = FakeGateway::instant();
        let store = store();
        let mut cart = Cart::new();
        let totals = compute_totals(cart.lines(), None);
        let mut flow = CheckoutFlow::new(MIN_VISIBLE);

        let err = flow
            .submit(&gateway, &mut cart, &store, &totals, "")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Cart(CartError::Empty)));
        assert_eq!(flow.state(), &CheckoutState::Idle);
        assert!(gateway.seen.lock().unwrap().is_none());
    }
}
