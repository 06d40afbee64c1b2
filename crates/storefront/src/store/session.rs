//! Session persistence for the store.
//!
//! The store keeps its identity and cart in a per-session key/value map,
//! modeled on browser session storage. Values are JSON.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Session keys used by the store.
pub mod keys {
    /// Role marker of the signed-in identity (`user`, `seller` or `admin`).
    pub const AUTH_ROLE: &str = "authRole";

    /// Serialized identity record.
    pub const USER: &str = "user";

    /// Cart lines, so the cart survives across requests.
    pub const CART: &str = "cart";
}

/// Errors from a session storage backend.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The backend failed to read or write.
    #[error("session backend error: {0}")]
    Backend(String),

    /// A stored value did not have the expected shape.
    #[error("corrupt session value under {key}: {source}")]
    Corrupt {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl From<tower_sessions::session::Error> for SessionError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Async key/value storage scoped to one browser session.
pub trait SessionStorage: Send + Sync {
    /// Read the value stored under `key`.
    fn get_item(&self, key: &str) -> impl Future<Output = Result<Option<Value>, SessionError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: Value)
    -> impl Future<Output = Result<(), SessionError>> + Send;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> impl Future<Output = Result<(), SessionError>> + Send;
}

/// Read and deserialize a typed value.
///
/// # Errors
///
/// Returns `SessionError::Corrupt` if the stored JSON has the wrong shape.
pub async fn read_json<S, T>(storage: &S, key: &'static str) -> Result<Option<T>, SessionError>
where
    S: SessionStorage,
    T: DeserializeOwned,
{
    storage
        .get_item(key)
        .await?
        .map(|value| serde_json::from_value(value).map_err(|source| SessionError::Corrupt { key, source }))
        .transpose()
}

/// Serialize and store a typed value.
///
/// # Errors
///
/// Returns `SessionError` if serialization or the backend fails.
pub async fn write_json<S, T>(storage: &S, key: &'static str, value: &T) -> Result<(), SessionError>
where
    S: SessionStorage,
    T: Serialize + Sync,
{
    let value = serde_json::to_value(value).map_err(|source| SessionError::Corrupt { key, source })?;
    storage.set_item(key, value).await
}

/// In-process session storage for tests and the CLI.
///
/// Clones share the same map, like two handles on one browser tab.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStorage {
    items: Arc<Mutex<HashMap<String, Value>>>,
}

impl MemorySessionStorage {
    /// Create an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// True when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStorage for MemorySessionStorage {
    async fn get_item(&self, key: &str) -> Result<Option<Value>, SessionError> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: Value) -> Result<(), SessionError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.remove(key);
        Ok(())
    }
}

impl SessionStorage for tower_sessions::Session {
    async fn get_item(&self, key: &str) -> Result<Option<Value>, SessionError> {
        Ok(self.get_value(key).await?)
    }

    async fn set_item(&self, key: &str, value: Value) -> Result<(), SessionError> {
        self.insert_value(key, value).await?;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        self.remove_value(key).await?;
        Ok(())
    }
}
