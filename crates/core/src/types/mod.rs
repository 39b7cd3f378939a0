//! Core types for Voltpeak.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod role;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
pub use product::{HardwareSpecs, Product, DEFAULT_STOCK};
pub use role::Role;
