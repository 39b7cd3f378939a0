//! Catalog product record.
//!
//! Products are created, updated and deleted exclusively through the
//! external product service; the client only mirrors them. Wire field names
//! are the backend's camelCase, with the Mongo-style `_id` identifier.

use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::price::Price;

/// Stock assumed for products whose stock count the backend never set.
pub const DEFAULT_STOCK: i64 = 10;

/// A product mirrored from the catalog service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque backend identifier.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in whole currency units.
    pub price: Price,
    /// Category label; blank values are normalized on admin writes.
    #[serde(default)]
    pub category: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Primary image URL.
    #[serde(default)]
    pub image: String,
    /// Additional gallery image URLs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gallery: Vec<String>,
    /// Available color labels (hex strings or names).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
    /// Manufacturer brand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Units on hand; `None` means the backend never tracked it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    /// Hardware spec sheet fields.
    #[serde(flatten)]
    pub specs: HardwareSpecs,
}

impl Product {
    /// Create a minimal product record.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Price) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category: String::new(),
            description: String::new(),
            image: String::new(),
            gallery: Vec::new(),
            colors: Vec::new(),
            brand: None,
            stock: None,
            specs: HardwareSpecs::default(),
        }
    }

    /// Effective stock for detail views: missing counts as [`DEFAULT_STOCK`].
    #[must_use]
    pub fn stock_or_default(&self) -> i64 {
        self.stock.unwrap_or(DEFAULT_STOCK)
    }

    /// Whether the backend tracks this product's stock and it is exhausted.
    ///
    /// Untracked stock never blocks a sale.
    #[must_use]
    pub fn is_known_out_of_stock(&self) -> bool {
        matches!(self.stock, Some(s) if s <= 0)
    }

    /// Whether exactly one unit remains (low-stock badge in detail views).
    #[must_use]
    pub fn is_last_unit(&self) -> bool {
        self.stock_or_default() == 1
    }

    /// Whether the shopper must pick a color before adding to the cart.
    #[must_use]
    pub fn has_color_options(&self) -> bool {
        !self.colors.is_empty()
    }

    /// Primary image followed by the gallery, blanks removed.
    #[must_use]
    pub fn gallery_urls(&self) -> Vec<&str> {
        std::iter::once(self.image.as_str())
            .chain(self.gallery.iter().map(String::as_str))
            .filter(|url| !url.is_empty())
            .collect()
    }
}

/// Optional spec-sheet attributes for computer hardware.
///
/// All fields ride along as flattened camelCase keys; absent ones are
/// omitted from the wire entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct HardwareSpecs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chipset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_series: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cores_threads: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_clock: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost_clock: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_series: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bus_width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuda_cores: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_factor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_slot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_gpu_length: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wattage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency_rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_requirement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<i64>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_shape() {
        let json = r##"{
            "_id": "6650f2a1",
            "name": "RTX 4070 SUPER",
            "price": 21900,
            "category": "GPU",
            "description": "12GB GDDR6X",
            "image": "https://cdn.example.com/4070.png",
            "colors": ["#000000", "White"],
            "brand": "NVIDIA",
            "stock": 3,
            "gpuModel": "AD104",
            "vram": "12GB",
            "cudaCores": 7168
        }"##;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "6650f2a1");
        assert_eq!(product.price, Price::from_units(21900));
        assert_eq!(product.specs.gpu_model.as_deref(), Some("AD104"));
        assert_eq!(product.specs.cuda_cores, Some(7168));
        assert!(product.has_color_options());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let json = r#"{"_id": "x", "name": "PSU", "price": 1590, "__v": 0, "createdAt": "2026-01-01"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.name, "PSU");
    }

    #[test]
    fn test_stock_defaults() {
        let mut product = Product::new("p1", "RAM stick", Price::from_units(990));
        assert_eq!(product.stock_or_default(), DEFAULT_STOCK);
        assert!(!product.is_known_out_of_stock());

        product.stock = Some(0);
        assert!(product.is_known_out_of_stock());

        product.stock = Some(1);
        assert!(product.is_last_unit());
    }

    #[test]
    fn test_gallery_urls_skip_blanks() {
        let mut product = Product::new("p1", "Case", Price::from_units(2590));
        product.image = "main.png".to_owned();
        product.gallery = vec![String::new(), "side.png".to_owned()];
        assert_eq!(product.gallery_urls(), vec!["main.png", "side.png"]);
    }
}
