//! Credential check errors.

use thiserror::Error;

/// Errors from the credential directory.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] ownshop_core::EmailError),

    /// Wrong password, or an email the directory does not accept.
    #[error("invalid credentials")]
    InvalidCredentials,
}
