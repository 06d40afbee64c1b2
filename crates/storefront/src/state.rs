//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::genai::{Assistant, GenAiClient, GenAiError};
use crate::services::auth::CredentialDirectory;
use crate::store::{Notifier, SharedCatalog};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and hands out the process-wide
/// catalog, the event notifier, the credential directory and the optional
/// text-generation assistant.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: SharedCatalog,
    notifier: Notifier,
    directory: CredentialDirectory,
    assistant: Option<Assistant<GenAiClient>>,
}

impl AppState {
    /// Create application state with the seeded demo catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if text generation is configured but the client
    /// cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, GenAiError> {
        Self::with_catalog(config, SharedCatalog::seeded())
    }

    /// Create application state around an existing catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if text generation is configured but the client
    /// cannot be built.
    pub fn with_catalog(config: StorefrontConfig, catalog: SharedCatalog) -> Result<Self, GenAiError> {
        let assistant = config
            .genai
            .as_ref()
            .map(GenAiClient::new)
            .transpose()?
            .map(Assistant::new);
        if assistant.is_none() {
            tracing::info!("GENAI_API_KEY not set, AI helpers disabled");
        }
        let directory = CredentialDirectory::demo(&config.auth);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                notifier: Notifier::new(),
                directory,
                assistant,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a handle to the shared catalog.
    #[must_use]
    pub fn catalog(&self) -> &SharedCatalog {
        &self.inner.catalog
    }

    /// Get the store event notifier.
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    /// Get the mock credential directory.
    #[must_use]
    pub fn directory(&self) -> &CredentialDirectory {
        &self.inner.directory
    }

    /// Get the text-generation assistant.
    ///
    /// # Errors
    ///
    /// Returns `GenAiError::NotConfigured` when no API key was configured.
    pub fn assistant(&self) -> Result<&Assistant<GenAiClient>, GenAiError> {
        self.inner
            .assistant
            .as_ref()
            .ok_or_else(|| GenAiError::NotConfigured("GENAI_API_KEY is not set".to_string()))
    }

    /// Whether AI helpers are available.
    #[must_use]
    pub fn has_assistant(&self) -> bool {
        self.inner.assistant.is_some()
    }
}
