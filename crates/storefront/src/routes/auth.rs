//! Sign-in and sign-out route handlers.

use axum::{Json, extract::State};
use ownshop_core::Role;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::{CurrentStore, SessionStore};
use crate::state::AppState;
use crate::store::StoreError;

use super::views::SessionView;

/// Customer sign-in request.
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
}

/// Admin or seller credentials.
#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

fn session_view(store: &SessionStore) -> Json<SessionView> {
    Json(SessionView::new(store.identity(), store.item_count()))
}

/// Issue a new session id after a privilege change.
async fn rotate_session(store: &SessionStore) -> Result<()> {
    store
        .session()
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to rotate session: {e}")))
}

/// Current identity and cart count.
pub async fn me(CurrentStore(store): CurrentStore) -> Json<SessionView> {
    session_view(&store)
}

/// Sign in as a customer by email.
#[instrument(skip(store))]
pub async fn sign_in(
    CurrentStore(mut store): CurrentStore,
    Json(request): Json<SignInRequest>,
) -> Result<Json<SessionView>> {
    store.sign_in(&request.email, Role::Customer, None).await?;
    rotate_session(&store).await?;
    Ok(session_view(&store))
}

/// Sign in as a seller.
#[instrument(skip(state, store))]
pub async fn seller_sign_in(
    State(state): State<AppState>,
    CurrentStore(mut store): CurrentStore,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<SessionView>> {
    if !store
        .seller_sign_in(state.directory(), &request.email, &request.password)
        .await?
    {
        return Err(StoreError::InvalidCredentials.into());
    }
    rotate_session(&store).await?;
    Ok(session_view(&store))
}

/// Sign in as the administrator.
#[instrument(skip(state, store))]
pub async fn admin_sign_in(
    State(state): State<AppState>,
    CurrentStore(mut store): CurrentStore,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<SessionView>> {
    if !store
        .admin_sign_in(state.directory(), &request.email, &request.password)
        .await?
    {
        return Err(StoreError::InvalidCredentials.into());
    }
    rotate_session(&store).await?;
    Ok(session_view(&store))
}

/// Sign out, clearing the identity and cart.
#[instrument(skip(store))]
pub async fn sign_out(CurrentStore(mut store): CurrentStore) -> Result<Json<SessionView>> {
    store.sign_out().await?;
    Ok(session_view(&store))
}
