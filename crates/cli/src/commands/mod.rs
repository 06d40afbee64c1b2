//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod genai;

use ownshop_storefront::config::ConfigError;
use ownshop_storefront::genai::GenAiError;
use ownshop_storefront::store::StoreError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Text generation needs `GENAI_API_KEY`.
    #[error("GENAI_API_KEY is not set")]
    GenAiDisabled,

    /// Text-generation failure.
    #[error("Text generation failed: {0}")]
    GenAi(#[from] GenAiError),

    /// Store operation rejected.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Unknown category name or slug.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Malformed `ID[:QTY]` argument.
    #[error("Invalid cart line '{0}', expected ID or ID:QTY")]
    InvalidLine(String),

    /// Output could not be serialized.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Print a value as pretty JSON on stdout.
#[allow(clippy::print_stdout)]
fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), CommandError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
