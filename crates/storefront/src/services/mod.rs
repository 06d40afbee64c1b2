//! Services used by the store and route handlers.
//!
//! - `auth` - Mock admin/seller credential checks

pub mod auth;
