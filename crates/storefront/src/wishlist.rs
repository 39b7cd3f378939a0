//! Wishlist: toggled product favorites.
//!
//! Unlike cart lines, wishlist entries are raw product references - no
//! color, no line id - and each product appears at most once.

use serde::{Deserialize, Serialize};

use voltpeak_core::{Product, ProductId};

/// The shopper's favorites, toggled rather than counted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Wishlist {
    entries: Vec<Product>,
}

impl Wishlist {
    /// An empty wishlist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted entries.
    #[must_use]
    pub fn from_entries(entries: Vec<Product>) -> Self {
        Self { entries }
    }

    /// Toggle membership: insert when absent, remove when present.
    ///
    /// Returns whether the product is in the wishlist afterwards.
    pub fn toggle(&mut self, product: Product) -> bool {
        if self.contains(&product.id) {
            self.entries.retain(|p| p.id != product.id);
            false
        } else {
            self.entries.push(product);
            true
        }
    }

    /// Whether the wishlist holds this product.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.entries.iter().any(|p| &p.id == id)
    }

    /// Remove a product outright (after an admin deleted it from the
    /// catalog). Returns whether anything was removed.
    pub fn prune(&mut self, id: &ProductId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|p| &p.id != id);
        self.entries.len() < before
    }

    /// The entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[Product] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the wishlist is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
