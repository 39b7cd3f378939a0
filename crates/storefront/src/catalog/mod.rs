//! Catalog querying and the derived category filter.
//!
//! Keyword, price bounds and sort go to the backend; the category filter is
//! applied purely client-side over whatever the last query returned.

pub mod search;

pub use search::SearchPipeline;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use voltpeak_core::Product;

/// The pseudo-category that shows every product.
pub const ALL_CATEGORIES: &str = "All";

/// Sort orders the backend understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOrder {
    /// Cheapest first.
    #[default]
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
}

impl SortOrder {
    /// The wire value of the sort parameter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PriceAsc => "asc",
            Self::PriceDesc => "desc",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::PriceAsc),
            "desc" => Ok(Self::PriceDesc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// The shopper's mutable search inputs.
///
/// Price bounds stay as entered - empty means unbounded, and an inverted
/// range is passed through for the backend to interpret.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogQuery {
    /// Free-text keyword, matched server-side.
    pub keyword: String,
    /// Lower price bound, or empty.
    pub min_price: String,
    /// Upper price bound, or empty.
    pub max_price: String,
    /// Sort order.
    pub sort: SortOrder,
}

impl CatalogQuery {
    /// Whether both bounds parse and the range is inverted (min > max).
    ///
    /// Inverted ranges are still sent; this only drives a log line.
    #[must_use]
    pub fn is_inverted_range(&self) -> bool {
        match (
            self.min_price.parse::<f64>(),
            self.max_price.parse::<f64>(),
        ) {
            (Ok(min), Ok(max)) => min > max,
            _ => false,
        }
    }
}

/// Category tabs for a result set: the unique, sorted, non-blank categories
/// observed, prefixed with [`ALL_CATEGORIES`].
#[must_use]
pub fn derive_categories(products: &[Product]) -> Vec<String> {
    let unique: BTreeSet<&str> = products
        .iter()
        .map(|p| p.category.as_str())
        .filter(|c| !c.trim().is_empty())
        .collect();

    std::iter::once(ALL_CATEGORIES.to_owned())
        .chain(unique.into_iter().map(str::to_owned))
        .collect()
}

/// The client-side category filter: a subsequence of `products` preserving
/// backend order.
#[must_use]
pub fn filter_by_category<'a>(products: &'a [Product], selected: &str) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| selected == ALL_CATEGORIES || p.category == selected)
        .collect()
}

/// In-memory catalog view state: the last fetched list and what the shopper
/// is looking at.
#[derive(Debug)]
pub struct CatalogState {
    /// The last query's full result set.
    pub products: Vec<Product>,
    /// Category tabs derived from `products`.
    pub categories: Vec<String>,
    /// Currently selected tab.
    pub selected_category: String,
    /// Whether a query is outstanding.
    pub loading: bool,
}

impl CatalogState {
    /// Fresh state with nothing fetched yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
            categories: vec![ALL_CATEGORIES.to_owned()],
            selected_category: ALL_CATEGORIES.to_owned(),
            loading: false,
        }
    }

    /// Replace the product list wholesale and recompute the category tabs.
    ///
    /// The selected tab is kept even when it no longer occurs; the filtered
    /// view simply comes up empty.
    pub fn apply_results(&mut self, products: Vec<Product>) {
        self.products = products;
        self.categories = derive_categories(&self.products);
    }

    /// The products visible under the selected category, in backend order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Product> {
        filter_by_category(&self.products, &self.selected_category)
    }

    /// Switch the category tab. Purely client-side; never triggers a fetch.
    pub fn select_category(&mut self, category: impl Into<String>) {
        self.selected_category = category.into();
    }
}
