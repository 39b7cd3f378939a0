//! The cart drawer's coupon slot.
//!
//! At most one coupon is active at a time. Applying a new code always
//! supersedes the previous one, and any failure clears it. The slot is
//! ephemeral - it belongs to one cart-drawer session and is never persisted.

use tracing::instrument;

use crate::api::CouponSource;
use crate::cart::pricing::Coupon;

/// Shopper-visible failure text for an unresolvable code.
const COUPON_FAILED_MESSAGE: &str = "coupon code not found";

/// Holds the currently active coupon and the latest status message.
#[derive(Debug, Default)]
pub struct CouponSlot {
    active: Option<Coupon>,
    message: Option<String>,
}

impl CouponSlot {
    /// An empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The active coupon, if any.
    #[must_use]
    pub fn active(&self) -> Option<&Coupon> {
        self.active.as_ref()
    }

    /// The code of the active coupon, or the empty string - the shape the
    /// checkout endpoint expects.
    #[must_use]
    pub fn code(&self) -> &str {
        self.active.as_ref().map_or("", |c| c.code.as_str())
    }

    /// The latest confirmation or failure message.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Resolve `code` against the backend and make it the active coupon.
    ///
    /// A blank code is ignored. On failure the previously active coupon is
    /// cleared and a failure message recorded; the error never escapes -
    /// coupon failure is a message, not a fault.
    ///
    /// Returns whether a coupon is active afterwards.
    #[instrument(skip(self, source))]
    pub async fn apply<S: CouponSource>(&mut self, source: &S, code: &str) -> bool {
        if code.is_empty() {
            return self.active.is_some();
        }

        match source.resolve(code).await {
            Ok(coupon) => {
                self.message = Some(coupon.message.clone());
                self.active = Some(coupon);
                true
            }
            Err(e) => {
                tracing::debug!(code, error = %e, "coupon resolution failed");
                self.active = None;
                self.message = Some(COUPON_FAILED_MESSAGE.to_owned());
                false
            }
        }
    }

    /// Drop the active coupon and message (cart drawer closed).
    pub fn reset(&mut self) {
        self.active = None;
        self.message = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use crate::api::ApiError;
    use crate::cart::pricing::CouponScope;

    /// Fake resolver: known codes resolve, everything else is not found.
    struct FakeCoupons {
        calls: Mutex<Vec<String>>,
    }

    impl FakeCoupons {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl CouponSource for FakeCoupons {
        async fn resolve(&self, code: &str) -> Result<Coupon, ApiError> {
            self.calls.lock().unwrap().push(code.to_owned());
            match code {
                "SAVE30" => Ok(Coupon {
                    code: "SAVE30".to_owned(),
                    scope: CouponScope::All,
                    percent: 30,
                    message: "30% off everything".to_owned(),
                }),
                "CPU10" => Ok(Coupon {
                    code: "CPU10".to_owned(),
                    scope: CouponScope::Category("CPU".to_owned()),
                    percent: 10,
                    message: "10% off CPUs".to_owned(),
                }),
                _ => Err(ApiError::NotFound("coupon".to_owned())),
            }
        }
    }

    #[tokio::test]
    async fn test_apply_stores_coupon_and_message() {
        let source = FakeCoupons::new();
        let mut slot = CouponSlot::new();

        assert!(slot.apply(&source, "SAVE30").await);
        assert_eq!(slot.active().unwrap().percent, 30);
        assert_eq!(slot.message(), Some("30% off everything"));
        assert_eq!(slot.code(), "SAVE30");
    }

    #[tokio::test]
    async fn test_new_code_supersedes_previous() {
        let source = FakeCoupons::new();
        let mut slot = CouponSlot::new();

        slot.apply(&source, "SAVE30").await;
        slot.apply(&source, "CPU10").await;

        assert_eq!(slot.active().unwrap().code, "CPU10");
    }

    #[tokio::test]
    async fn test_failure_clears_active_coupon() {
        let source = FakeCoupons::new();
        let mut slot = CouponSlot::new();

        slot.apply(&source, "SAVE30").await;
        assert!(!slot.apply(&source, "BOGUS").await);

        assert!(slot.active().is_none());
        assert_eq!(slot.message(), Some(COUPON_FAILED_MESSAGE));
        assert_eq!(slot.code(), "");
    }

    #[tokio::test]
    async fn test_blank_code_is_ignored() {
        let source = FakeCoupons::new();
        let mut slot = CouponSlot::new();

        slot.apply(&source, "").await;
        assert!(source.calls.lock().unwrap().is_empty());
        assert!(slot.message().is_none());
    }

    #[tokio::test]
    async fn test_reset_drops_everything() {
        let source = FakeCoupons::new();
        let mut slot = CouponSlot::new();

        slot.apply(&source, "SAVE30").await;
        slot.reset();

        assert!(slot.active().is_none());
        assert!(slot.message().is_none());
    }
}
