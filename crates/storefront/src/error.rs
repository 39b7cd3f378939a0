//! Unified error handling for the storefront engine.
//!
//! Provides a single `AppError` type that front ends (the CLI today) can
//! render with one message. Every module keeps its own focused error enum;
//! this is the umbrella they converge into.

use thiserror::Error;

use crate::api::ApiError;
use crate::auth::AuthError;
use crate::cart::CartError;
use crate::config::ConfigError;
use crate::store::StoreError;

/// Engine-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A backend call failed.
    #[error("Backend error: {0}")]
    Api(#[from] ApiError),

    /// Durable local storage failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// A cart operation was blocked.
    #[error("{0}")]
    Cart(#[from] CartError),

    /// An authentication operation failed.
    #[error("{0}")]
    Auth(#[from] AuthError),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_passthrough_display() {
        let err = AppError::from(CartError::OutOfStock {
            name: "RTX 4070".to_owned(),
        });
        assert_eq!(err.to_string(), "RTX 4070 is out of stock");
    }
}
