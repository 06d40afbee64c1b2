//! Store error types.

use ownshop_core::{EmailError, ProductDraftError};
use thiserror::Error;

use super::session::SessionError;

/// Errors returned by store operations.
///
/// Missing product ids in remove/update/toggle are not errors; those
/// operations report them as `None` or `false`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The operation needs a signed-in identity.
    #[error("sign in required")]
    Unauthenticated,

    /// The signed-in identity lacks the role or ownership the operation needs.
    #[error("not permitted for the current identity")]
    Unauthorized,

    /// Unpublished products cannot be added to a cart.
    #[error("product is not available")]
    ProductUnavailable,

    /// A referenced product does not exist.
    #[error("product not found: {0}")]
    NotFound(String),

    /// Credential check failed.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Cart quantities must be at least one.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// The seller's product draft failed validation.
    #[error("invalid product: {0}")]
    InvalidProduct(#[from] ProductDraftError),

    /// The banner needs a non-empty title and an absolute image URL.
    #[error("invalid banner: {0}")]
    InvalidBanner(String),

    /// The email address did not validate.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The seller identity carries no store name to attribute products to.
    #[error("seller has no store name")]
    MissingStoreName,

    /// Session storage failed.
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}
