//! Voltpeak Core - Shared types library.
//!
//! This crate provides common types used across all Voltpeak components:
//! - `storefront` - Shopper-facing engine (catalog, cart, checkout)
//! - `admin` - Catalog management engine
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails and
//!   roles, plus the [`types::Product`] record mirrored from the backend

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
