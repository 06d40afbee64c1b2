//! OwnShop Core - Shared domain types.
//!
//! This crate provides the types used across all OwnShop components:
//! - `storefront` - Store state manager and the JSON storefront server
//! - `cli` - Operator tooling (catalog inspection, text-generation helpers)
//!
//! # Architecture
//!
//! The core crate contains only types and static lookup tables - no I/O,
//! no sessions, no HTTP clients. This keeps it lightweight and allows it to
//! be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, emails, roles, products, carts, users
//!   and the category/locale tables

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
