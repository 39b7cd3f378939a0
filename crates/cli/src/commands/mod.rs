//! CLI command implementations.

pub mod account;
pub mod admin;
pub mod build;
pub mod cart;
pub mod shop;

/// Format a cart or wishlist badge count like the storefront header does.
#[must_use]
pub fn badge(count: usize) -> String {
    if count == 0 {
        String::new()
    } else {
        format!(" ({count})")
    }
}
