//! Product drafts: validation and normalization of admin form input.
//!
//! Drafts hold fields the way an admin types them (strings, comma-separated
//! lists). `normalize` turns a draft into the exact payload the backend
//! expects, applying the same defaults the storefront's product forms
//! always have: blank category becomes the default label, a missing image
//! gets a placeholder, list fields are split on commas with blanks dropped.

use rust_decimal::Decimal;
use serde::Serialize;

use voltpeak_core::{HardwareSpecs, Price};

use crate::error::AdminError;

/// Category assigned when the admin leaves the field blank.
pub const DEFAULT_CATEGORY: &str = "General";

/// Stock assigned when the admin leaves the field blank.
pub const DEFAULT_STOCK: i64 = 10;

/// Admin form input, as typed.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: String,
    /// Price as typed; must parse to a positive decimal.
    pub price: String,
    /// Stock as typed; blank means [`DEFAULT_STOCK`].
    pub stock: String,
    pub description: String,
    pub category: String,
    pub image: String,
    /// Comma-separated color labels.
    pub colors: String,
    /// Comma-separated gallery URLs.
    pub gallery: String,
    pub brand: String,
    /// Spec-sheet fields, already typed.
    pub specs: HardwareSpecs,
}

/// The normalized body for `POST /products` and `PATCH /products/{id}`.
///
/// Identity and bookkeeping fields are never sent.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub price: Price,
    pub stock: i64,
    pub description: String,
    pub category: String,
    pub image: String,
    pub colors: Vec<String>,
    pub gallery: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(flatten)]
    pub specs: HardwareSpecs,
}

impl ProductDraft {
    /// Validate and normalize the draft into a backend payload.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Validation`] for an empty name, a price that
    /// does not parse to a positive number, or a stock value that does not
    /// parse to a non-negative integer. Nothing is sent to the backend.
    pub fn normalize(&self) -> Result<ProductPayload, AdminError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AdminError::Validation("name must not be empty".to_owned()));
        }

        let price: Decimal = self
            .price
            .trim()
            .parse()
            .map_err(|_| AdminError::Validation(format!("price is not a number: {}", self.price)))?;
        if price <= Decimal::ZERO {
            return Err(AdminError::Validation("price must be positive".to_owned()));
        }

        let stock = match self.stock.trim() {
            "" => DEFAULT_STOCK,
            raw => raw.parse::<i64>().map_err(|_| {
                AdminError::Validation(format!("stock is not a whole number: {raw}"))
            })?,
        };
        if stock < 0 {
            return Err(AdminError::Validation(
                "stock must not be negative".to_owned(),
            ));
        }

        let category = match self.category.trim() {
            "" => DEFAULT_CATEGORY.to_owned(),
            trimmed => trimmed.to_owned(),
        };

        let image = if self.image.trim().is_empty() {
            placeholder_image(name)
        } else {
            self.image.trim().to_owned()
        };

        let mut specs = self.specs.clone();
        specs.points = Some(specs.points.unwrap_or(0));

        Ok(ProductPayload {
            name: name.to_owned(),
            price: Price::new(price),
            stock,
            description: self.description.trim().to_owned(),
            category,
            image,
            colors: split_csv(&self.colors),
            gallery: split_csv(&self.gallery),
            brand: match self.brand.trim() {
                "" => None,
                brand => Some(brand.to_owned()),
            },
            specs,
        })
    }
}

/// Split a comma-separated field, trimming entries and dropping blanks.
#[must_use]
pub fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Placeholder image URL embedding the product name.
fn placeholder_image(name: &str) -> String {
    format!("https://placehold.co/600x400?text={name}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft(name: &str, price: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_owned(),
            price: price.to_owned(),
            ..ProductDraft::default()
        }
    }

    #[test]
    fn test_normalize_applies_defaults() {
        let payload = draft("RTX 4070", "21900").normalize().unwrap();

        assert_eq!(payload.category, DEFAULT_CATEGORY);
        assert_eq!(payload.stock, DEFAULT_STOCK);
        assert_eq!(payload.image, "https://placehold.co/600x400?text=RTX 4070");
        assert_eq!(payload.specs.points, Some(0));
    }

    #[test]
    fn test_blank_category_normalized_blank_name_rejected() {
        let mut d = draft("  ", "100");
        assert!(matches!(d.normalize(), Err(AdminError::Validation(_))));

        d.name = "PSU 750W".to_owned();
        d.category = "   ".to_owned();
        assert_eq!(d.normalize().unwrap().category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_price_must_be_positive_number() {
        assert!(draft("X", "banana").normalize().is_err());
        assert!(draft("X", "0").normalize().is_err());
        assert!(draft("X", "-5").normalize().is_err());
        assert!(draft("X", "1590").normalize().is_ok());
    }

    #[test]
    fn test_stock_parsing() {
        let mut d = draft("X", "100");
        d.stock = "3".to_owned();
        assert_eq!(d.normalize().unwrap().stock, 3);

        d.stock = "-1".to_owned();
        assert!(d.normalize().is_err());

        d.stock = "many".to_owned();
        assert!(d.normalize().is_err());
    }

    #[test]
    fn test_split_csv_trims_and_drops_blanks() {
        assert_eq!(
            split_csv("Red, Blue , ,#FF0000,"),
            vec!["Red", "Blue", "#FF0000"]
        );
        assert!(split_csv("").is_empty());
        assert!(split_csv(" , ,").is_empty());
    }

    #[test]
    fn test_payload_wire_shape() {
        let mut d = draft("DDR5 32GB", "4590");
        d.colors = "Black,Silver".to_owned();
        d.specs.memory_type = Some("DDR5".to_owned());

        let json = serde_json::to_value(d.normalize().unwrap()).unwrap();
        assert_eq!(json["category"], DEFAULT_CATEGORY);
        assert_eq!(json["colors"], serde_json::json!(["Black", "Silver"]));
        assert_eq!(json["memoryType"], "DDR5");
        assert_eq!(json["points"], 0);
        assert!(json.get("_id").is_none());
    }
}
