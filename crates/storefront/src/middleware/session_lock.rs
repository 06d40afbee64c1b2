//! Per-session request serialization.
//!
//! Every request rebuilds the store from its session, mutates it and saves
//! the whole record back. Two requests for one session running at once
//! would each save their own copy and drop the other's change. This layer
//! sits outside the session layer and holds a per-session mutex from session
//! load until the record is saved, so requests of one session run one at a
//! time while different sessions stay concurrent.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use moka::future::Cache;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::session::SESSION_COOKIE_NAME;

/// Locks are dropped after this long without a request for the session.
const LOCK_IDLE: Duration = Duration::from_secs(300);

/// Mutexes keyed by session cookie value.
#[derive(Clone)]
pub struct SessionLocks {
    locks: Cache<String, Arc<Mutex<()>>>,
}

impl SessionLocks {
    /// Track locks for at most `capacity` sessions.
    #[must_use]
    pub fn new(capacity: u64) -> Self {
        Self {
            locks: Cache::builder()
                .max_capacity(capacity)
                .time_to_idle(LOCK_IDLE)
                .build(),
        }
    }

    /// Wait for exclusive access to the session `key`.
    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .get_with(key.to_string(), async { Arc::new(Mutex::new(())) })
            .await;
        lock.lock_owned().await
    }
}

/// Value of the session cookie, if the request carries one.
fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE_NAME)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// Run requests that share a session cookie one at a time.
///
/// Requests without a cookie start a fresh session and pass straight through.
pub async fn serialize_session_requests(
    State(locks): State<SessionLocks>,
    request: Request,
    next: Next,
) -> Response {
    let Some(key) = session_cookie(request.headers()).map(str::to_string) else {
        return next.run(request).await;
    };

    let _guard = locks.acquire(&key).await;
    next.run(request).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(cookies: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for cookie in cookies {
            headers.append(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        }
        headers
    }

    #[test]
    fn test_finds_session_cookie() {
        let h = headers(&["theme=dark; ownshop_session=abc123; lang=en"]);
        assert_eq!(session_cookie(&h), Some("abc123"));

        let h = headers(&["theme=dark", "ownshop_session=xyz"]);
        assert_eq!(session_cookie(&h), Some("xyz"));
    }

    #[test]
    fn test_missing_or_empty_cookie() {
        assert_eq!(session_cookie(&headers(&[])), None);
        assert_eq!(session_cookie(&headers(&["theme=dark"])), None);
        assert_eq!(session_cookie(&headers(&["ownshop_session="])), None);
        assert_eq!(session_cookie(&headers(&["ownshop_session_old=1"])), None);
    }

    #[tokio::test]
    async fn test_same_session_waits() {
        let locks = SessionLocks::new(10);
        let held = locks.acquire("a").await;

        let blocked = tokio::time::timeout(Duration::from_millis(50), locks.acquire("a")).await;
        assert!(blocked.is_err());

        drop(held);
        let reacquired = tokio::time::timeout(Duration::from_millis(50), locks.acquire("a")).await;
        assert!(reacquired.is_ok());
    }

    #[tokio::test]
    async fn test_other_sessions_proceed() {
        let locks = SessionLocks::new(10);
        let _held = locks.acquire("a").await;

        let other = tokio::time::timeout(Duration::from_millis(50), locks.acquire("b")).await;
        assert!(other.is_ok());
    }
}
