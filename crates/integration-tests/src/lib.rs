//! Integration tests for Voltpeak.
//!
//! The tests in `tests/` exercise a live product/order backend and are all
//! `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! # Point at a running backend (defaults to http://localhost:3001)
//! export VOLTPEAK_API_URL=http://localhost:3001
//!
//! # Run the ignored tests
//! cargo test -p voltpeak-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_api` - catalog queries, product detail, coupons, checkout
//! - `admin_api` - privileged product management

/// Base URL for the backend (configurable via environment).
#[must_use]
pub fn api_base_url() -> String {
    std::env::var("VOLTPEAK_API_URL").unwrap_or_else(|_| "http://localhost:3001".to_owned())
}
