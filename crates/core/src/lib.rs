//! ElectroHub Core - Shared types library.
//!
//! This crate provides common types used across all ElectroHub components:
//! - `storefront` - Public-facing marketplace site and role-scoped dashboards
//! - `integration-tests` - Cross-crate session/cart tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no session storage. The cart aggregate and the role/identity
//! types live here so they can be tested exhaustively without a server.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and roles
//! - [`identity`] - The authenticated user identity
//! - [`cart`] - The shopping cart aggregate

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod identity;
pub mod types;

pub use cart::{Cart, LineItem};
pub use identity::Identity;
pub use types::*;
