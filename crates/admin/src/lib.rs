//! Voltpeak Admin library.
//!
//! The catalog-management half of Voltpeak: creating, editing and deleting
//! products through the backend's privileged endpoints, plus the inventory
//! dashboard derived from the product list.
//!
//! # Security
//!
//! Every call carries the signed-in admin's bearer token. The decoded role
//! claim on the client is only a hint for which surfaces to show; the
//! backend's 401/403 answers are the authority and surface here as
//! [`error::AdminError::PermissionDenied`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod dashboard;
pub mod error;
pub mod products;

pub use client::AdminClient;
pub use error::AdminError;
