//! Custom PC build planner.
//!
//! Seven part slots, each backed by a category query against the catalog.
//! Category labels in the wild are inconsistent (English, Thai, vendor
//! spellings), so every slot queries a comma-separated alias list and the
//! backend matches any of them.

use serde::{Deserialize, Serialize};

use voltpeak_core::{Price, Product};

use crate::api::{ApiClient, ApiError};

/// Build total above which the plan is flagged as an extreme configuration.
pub const OVERLOAD_THRESHOLD: i64 = 100_000;

/// The seven build slots, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildSlot {
    Cpu,
    Motherboard,
    Gpu,
    Ram,
    Storage,
    Psu,
    Case,
}

impl BuildSlot {
    /// Every slot, in display order.
    pub const ALL: [Self; 7] = [
        Self::Cpu,
        Self::Motherboard,
        Self::Gpu,
        Self::Ram,
        Self::Storage,
        Self::Psu,
        Self::Case,
    ];

    /// Display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Cpu => "Central Processing Unit (CPU)",
            Self::Motherboard => "Motherboard (Mainboard)",
            Self::Gpu => "Graphics Card (GPU)",
            Self::Ram => "Memory (RAM)",
            Self::Storage => "Storage (SSD/HDD)",
            Self::Psu => "Power Supply (PSU)",
            Self::Case => "PC Case",
        }
    }

    /// Comma-separated category aliases sent as the `category` parameter.
    #[must_use]
    pub const fn category_aliases(&self) -> &'static str {
        match self {
            Self::Cpu => "CPU,\u{e0b}\u{e35}\u{e1e}\u{e35}\u{e22}\u{e39},Processor",
            Self::Motherboard => "Motherboard,Mainboard,\u{e40}\u{e21}\u{e19}\u{e1a}\u{e2d}\u{e23}\u{e4c}\u{e14}",
            Self::Gpu => "GPU,VGA,Graphic Card,\u{e01}\u{e32}\u{e23}\u{e4c}\u{e14}\u{e08}\u{e2d}",
            Self::Ram => "RAM,Memory,\u{e41}\u{e23}\u{e21}",
            Self::Storage => "SSD,HDD,Storage,\u{e2e}\u{e32}\u{e23}\u{e4c}\u{e14}\u{e14}\u{e34}\u{e2a}\u{e01}\u{e4c},\u{e2e}\u{e32}\u{e23}\u{e4c}\u{e14}\u{e44}\u{e14}\u{e23}\u{e4c}\u{e1f}",
            Self::Psu => "PSU,Power Supply,\u{e1e}\u{e32}\u{e27}\u{e40}\u{e27}\u{e2d}\u{e23}\u{e4c}\u{e0b}\u{e31}\u{e1e}\u{e1e}\u{e25}\u{e32}\u{e22}",
            Self::Case => "Case,Chassis,\u{e40}\u{e04}\u{e2a},\u{e40}\u{e04}\u{e2a}\u{e04}\u{e2d}\u{e21}\u{e1e}\u{e34}\u{e27}\u{e40}\u{e15}\u{e2d}\u{e23}\u{e4c}",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Cpu => 0,
            Self::Motherboard => 1,
            Self::Gpu => 2,
            Self::Ram => 3,
            Self::Storage => 4,
            Self::Psu => 5,
            Self::Case => 6,
        }
    }
}

/// Fetch the selectable products for one slot.
///
/// # Errors
///
/// Returns [`ApiError`] when the catalog query fails.
pub async fn slot_options(client: &ApiClient, slot: BuildSlot) -> Result<Vec<Product>, ApiError> {
    client
        .get_products_in_categories(slot.category_aliases())
        .await
}

/// An in-progress build: at most one product per slot.
#[derive(Debug, Default)]
pub struct BuildPlan {
    selections: [Option<Product>; 7],
}

impl BuildPlan {
    /// An empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a product into a slot, replacing any previous choice.
    pub fn select(&mut self, slot: BuildSlot, product: Product) {
        self.selections[slot.index()] = Some(product);
    }

    /// Empty a slot.
    pub fn clear(&mut self, slot: BuildSlot) {
        self.selections[slot.index()] = None;
    }

    /// The product chosen for a slot, if any.
    #[must_use]
    pub fn selected(&self, slot: BuildSlot) -> Option<&Product> {
        self.selections[slot.index()].as_ref()
    }

    /// How many slots are filled.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.selections.iter().flatten().count()
    }

    /// Sum of the selected parts' prices.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.selections
            .iter()
            .flatten()
            .map(|p| p.price)
            .sum()
    }

    /// Whether the build total crosses [`OVERLOAD_THRESHOLD`].
    #[must_use]
    pub fn is_overload(&self) -> bool {
        self.total_price() > Price::from_units(OVERLOAD_THRESHOLD)
    }
}
