//! Coupon rules and cart total computation.
//!
//! Totals are exact `Decimal` arithmetic over the line prices; nothing here
//! rounds. Display rounding belongs to whoever renders the numbers.

use serde::{Deserialize, Serialize};

use voltpeak_core::Price;

use crate::api::types::CouponWire;
use crate::cart::CartLine;

/// Category restriction under which a coupon's discount applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CouponScope {
    /// Applies to every line.
    All,
    /// Applies only to lines in this category.
    Category(String),
}

impl CouponScope {
    /// Wire sentinel for the unrestricted scope.
    pub const ALL_SENTINEL: &'static str = "all";

    /// Parse the backend's `category` field.
    #[must_use]
    pub fn from_wire(category: &str) -> Self {
        if category == Self::ALL_SENTINEL {
            Self::All
        } else {
            Self::Category(category.to_owned())
        }
    }

    /// Whether a line in `category` is covered by this scope.
    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Category(scope) => scope == category,
        }
    }
}

/// A resolved discount rule.
///
/// Lives only for the current checkout session; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    /// The code the shopper entered.
    pub code: String,
    /// Category restriction.
    pub scope: CouponScope,
    /// Whole-number percentage, 0-100.
    pub percent: u8,
    /// Backend-provided confirmation message.
    pub message: String,
}

impl Coupon {
    /// Build a coupon from the backend's wire shape, clamping the discount
    /// into 0-100.
    #[must_use]
    pub fn from_wire(wire: CouponWire) -> Self {
        let percent = match u8::try_from(wire.discount) {
            Ok(p) if p <= 100 => p,
            _ => {
                tracing::warn!(
                    code = %wire.code,
                    discount = wire.discount,
                    "coupon discount outside 0-100, clamping"
                );
                u8::try_from(wire.discount.clamp(0, 100)).unwrap_or(100)
            }
        };

        Self {
            code: wire.code,
            scope: CouponScope::from_wire(&wire.category),
            percent,
            message: wire.message,
        }
    }
}

/// Derived amounts for the cart view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of line prices.
    pub subtotal: Price,
    /// Sum of per-line discounts under the active coupon.
    pub discount: Price,
    /// `subtotal - discount`.
    pub total: Price,
}

/// Compute subtotal, discount and total for the given lines.
///
/// Each line contributes its unit price once (quantity is implicitly one per
/// line). A line is discounted by `price * percent / 100` exactly when the
/// active coupon's scope covers its category, so the discount can never
/// exceed the subtotal.
#[must_use]
pub fn compute_totals(lines: &[CartLine], coupon: Option<&Coupon>) -> CartTotals {
    let mut subtotal = Price::ZERO;
    let mut discount = Price::ZERO;

    for line in lines {
        subtotal += line.product.price;
        if let Some(coupon) = coupon {
            if coupon.scope.matches(&line.product.category) {
                discount += line.product.price.percentage(coupon.percent);
            }
        }
    }

    CartTotals {
        subtotal,
        discount,
        total: subtotal - discount,
    }
}
