//! Shopping cart: line snapshots and mutations.
//!
//! A cart line is a full snapshot of the product at the moment it was added,
//! plus the chosen color and a client-generated line id. Lines are immutable;
//! quantity is implicitly one per line, so adding the same product twice
//! yields two independent lines.

pub mod coupon;
pub mod pricing;

pub use coupon::CouponSlot;
pub use pricing::{compute_totals, CartTotals, Coupon, CouponScope};

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use voltpeak_core::{LineId, Product, ProductId};

/// Color recorded for products that offer no color options.
pub const DEFAULT_COLOR: &str = "Standard";

/// Cart operations that are blocked before any state changes.
///
/// These surface as shopper-visible messages, never as panics.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The product tracks stock and none is left.
    #[error("{name} is out of stock")]
    OutOfStock {
        /// Product display name.
        name: String,
    },

    /// The product has color options but none was chosen.
    #[error("please choose a color for {name}")]
    ColorRequired {
        /// Product display name.
        name: String,
    },

    /// A removal referenced a line that does not exist.
    #[error("no cart line at position {index} (cart has {len})")]
    LineOutOfRange {
        /// Requested position.
        index: usize,
        /// Cart size at the time.
        len: usize,
    },

    /// Checkout was attempted with nothing in the cart.
    #[error("the cart is empty")]
    Empty,
}

/// One shopper-selected product instance awaiting checkout.
///
/// Serialized with the product fields flattened at the top level, matching
/// the shape the checkout endpoint expects for its `items`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Snapshot of the product at add time.
    #[serde(flatten)]
    pub product: Product,
    /// Chosen color, or [`DEFAULT_COLOR`].
    #[serde(rename = "selectedColor", default)]
    pub selected_color: String,
    /// Client-generated line identifier. Only used for list keys and
    /// removal; not globally unique across sessions.
    #[serde(rename = "cartId")]
    pub line_id: LineId,
}

/// The shopper's in-progress selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from persisted lines.
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// Add a product snapshot to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::OutOfStock`] when the product tracks stock and
    /// has none, and [`CartError::ColorRequired`] when it offers colors and
    /// none was chosen. Neither mutates the cart.
    pub fn add(
        &mut self,
        product: Product,
        selected_color: Option<&str>,
    ) -> Result<&CartLine, CartError> {
        if product.is_known_out_of_stock() {
            return Err(CartError::OutOfStock {
                name: product.name.clone(),
            });
        }

        if product.has_color_options() && selected_color.is_none() {
            return Err(CartError::ColorRequired {
                name: product.name.clone(),
            });
        }

        let line = CartLine {
            product,
            selected_color: selected_color.unwrap_or(DEFAULT_COLOR).to_owned(),
            line_id: next_line_id(),
        };
        self.lines.push(line);

        // push succeeded, so last() is always present
        self.lines.last().ok_or(CartError::Empty)
    }

    /// Remove exactly the line at `index`, preserving the order and ids of
    /// every other line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineOutOfRange`] when `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> Result<CartLine, CartError> {
        if index >= self.lines.len() {
            return Err(CartError::LineOutOfRange {
                index,
                len: self.lines.len(),
            });
        }
        Ok(self.lines.remove(index))
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether any line references the given product.
    #[must_use]
    pub fn contains_product(&self, id: &ProductId) -> bool {
        self.lines.iter().any(|line| &line.product.id == id)
    }
}

/// Generate a timestamp-based line id.
///
/// A process-local counter disambiguates adds that land in the same
/// millisecond; ids are not globally unique across sessions.
fn next_line_id() -> LineId {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let millis = chrono::Utc::now().timestamp_millis();
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    LineId::new(format!("{millis}-{n}"))
}
