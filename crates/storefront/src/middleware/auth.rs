//! Store extractor.
//!
//! Rebuilds the session's [`Store`] for each request so handlers can call
//! store operations directly. Role checks happen inside the store.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::error::AppError;
use crate::state::AppState;
use crate::store::Store;

/// A store bound to the request's tower-sessions session.
pub type SessionStore = Store<Session>;

/// Extractor yielding the current session's store.
///
/// Guests get a store with no identity and an empty cart.
///
/// # Example
///
/// ```rust,ignore
/// async fn cart(CurrentStore(store): CurrentStore) -> impl IntoResponse {
///     format!("{} items", store.item_count())
/// }
/// ```
pub struct CurrentStore(pub SessionStore);

impl FromRequestParts<AppState> for CurrentStore {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer missing".to_string()))?;

        let store = Store::restore(state.catalog().clone(), state.notifier().clone(), session).await?;

        if let Some(identity) = store.identity() {
            tracing::Span::current().record("user_id", identity.user.uid.as_str());
        }

        Ok(Self(store))
    }
}
