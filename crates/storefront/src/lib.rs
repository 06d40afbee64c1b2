//! OwnShop storefront library.
//!
//! The store state manager ([`store`]), its collaborators ([`services`],
//! [`genai`]) and the JSON HTTP surface ([`routes`]) live here so the binary,
//! the CLI and the integration tests share them.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod genai;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::store::Notifier;

/// Build the storefront router with sessions, request ids and tracing.
///
/// Sentry layers and connect info are added by the binary.
pub fn app(state: AppState, rate_limited: bool) -> Router {
    let capacity = state.config().session_capacity;
    let session_layer =
        middleware::create_session_layer(middleware::SessionCache::new(capacity), state.config());
    let locks = middleware::SessionLocks::new(capacity);

    routes::routes(rate_limited)
        .layer(session_layer)
        .layer(from_fn_with_state(locks, middleware::serialize_session_requests))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Log every store event until the notifier is dropped.
pub fn spawn_event_logger(notifier: &Notifier) -> JoinHandle<()> {
    let mut events = notifier.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) if event.is_destructive() => {
                    tracing::warn!(title = event.title(), "{}", event.description());
                }
                Ok(event) => {
                    tracing::info!(title = event.title(), "{}", event.description());
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event logger lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
