//! Inventory dashboard statistics.
//!
//! Derived from a plain catalog fetch. Unlike the storefront's detail
//! views, the dashboard treats missing stock as zero - unknown inventory
//! counts as nothing on the books.

use rust_decimal::Decimal;

use voltpeak_core::{Price, Product};

/// Stock level below which a product shows up in the low-stock list.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Aggregate inventory numbers for the dashboard header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryStats {
    /// Number of catalog entries.
    pub total_items: usize,
    /// Sum of price times stock across the catalog.
    pub total_value: Price,
    /// Products with exactly zero stock on record.
    pub out_of_stock: usize,
}

impl InventoryStats {
    /// Compute the aggregates over a fetched catalog.
    #[must_use]
    pub fn from_products(products: &[Product]) -> Self {
        let total_value = products
            .iter()
            .map(|p| Price::new(p.price.amount() * Decimal::from(p.stock.unwrap_or(0))))
            .sum();

        Self {
            total_items: products.len(),
            total_value,
            out_of_stock: products
                .iter()
                .filter(|p| p.stock.unwrap_or(0) == 0)
                .count(),
        }
    }
}

/// Products under the low-stock threshold, in catalog order.
#[must_use]
pub fn low_stock(products: &[Product]) -> Vec<&Product> {
    products
        .iter()
        .filter(|p| p.stock.unwrap_or(0) < LOW_STOCK_THRESHOLD)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: i64, stock: Option<i64>) -> Product {
        let mut p = Product::new(id, format!("part {id}"), Price::from_units(price));
        p.stock = stock;
        p
    }

    #[test]
    fn test_stats_over_catalog() {
        let products = vec![
            product("a", 1000, Some(3)),
            product("b", 500, Some(0)),
            product("c", 2000, None),
        ];

        let stats = InventoryStats::from_products(&products);
        assert_eq!(stats.total_items, 3);
        // 1000*3 + 500*0 + 2000*0 (untracked counts as nothing)
        assert_eq!(stats.total_value, Price::from_units(3000));
        assert_eq!(stats.out_of_stock, 2);
    }

    #[test]
    fn test_low_stock_list() {
        let products = vec![
            product("a", 1000, Some(3)),
            product("b", 500, Some(5)),
            product("c", 2000, Some(12)),
            product("d", 700, None),
        ];

        let low: Vec<&str> = low_stock(&products).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(low, vec!["a", "d"]);
    }

    #[test]
    fn test_empty_catalog() {
        let stats = InventoryStats::from_products(&[]);
        assert_eq!(stats.total_items, 0);
        assert_eq!(stats.total_value, Price::ZERO);
        assert_eq!(stats.out_of_stock, 0);
    }
}
