//! Wire types for the product/order service.
//!
//! Field names follow the backend's camelCase JSON. Request types borrow
//! their data; response types own it.

use serde::{Deserialize, Serialize};

use voltpeak_core::{OrderId, Price};

use crate::cart::CartLine;

/// Coupon lookup request body.
#[derive(Debug, Serialize)]
pub struct CouponRequest<'a> {
    pub code: &'a str,
}

/// Coupon as the backend returns it.
///
/// `category` is either the sentinel `"all"` or one category label;
/// `discount` is a whole percentage.
#[derive(Debug, Clone, Deserialize)]
pub struct CouponWire {
    pub code: String,
    pub category: String,
    pub discount: i64,
    pub message: String,
}

/// Checkout submission body: the full line list, the client-computed total
/// and the applied coupon code (empty when none).
#[derive(Debug, Serialize)]
pub struct CheckoutRequest<'a> {
    pub items: &'a [CartLine],
    pub total: Price,
    pub coupon: &'a str,
}

/// Successful checkout response.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutReceipt {
    #[serde(rename = "orderId")]
    pub order_id: OrderId,
}

/// Login request body.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Login response carrying the compact access token.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// Registration request body.
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Error body shape used by the backend. `message` may be a single string
/// or a list of validation messages; the first one wins.
#[derive(Debug, Deserialize)]
pub struct BackendError {
    pub message: BackendMessage,
}

/// A backend error message: one string or several.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum BackendMessage {
    One(String),
    Many(Vec<String>),
}

impl BackendMessage {
    /// The first message, if any.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::One(message) => Some(message.as_str()),
            Self::Many(messages) => messages.first().map(String::as_str),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_coupon_wire_shape() {
        let json = r#"{"code":"SAVE30","category":"all","discount":30,"message":"30% off everything"}"#;
        let coupon: CouponWire = serde_json::from_str(json).unwrap();
        assert_eq!(coupon.code, "SAVE30");
        assert_eq!(coupon.discount, 30);
    }

    #[test]
    fn test_receipt_order_id_rename() {
        let receipt: CheckoutReceipt = serde_json::from_str(r#"{"orderId":"ORD-1042"}"#).unwrap();
        assert_eq!(receipt.order_id.as_str(), "ORD-1042");
    }

    #[test]
    fn test_backend_message_first() {
        let single: BackendError = serde_json::from_str(r#"{"message":"bad code"}"#).unwrap();
        assert_eq!(single.message.first(), Some("bad code"));

        let many: BackendError =
            serde_json::from_str(r#"{"message":["name is required","price must be a number"]}"#)
                .unwrap();
        assert_eq!(many.message.first(), Some("name is required"));
    }
}
