//! Session middleware configuration.
//!
//! Sessions live in a moka cache bounded by `OWNSHOP_SESSION_CAPACITY`.
//! Each record is evicted once its expiry date passes, so abandoned guest
//! sessions do not accumulate. The store keeps its role marker, identity and
//! cart in the session.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::{Expiry, future::Cache};
use tower_sessions::{
    Expiry as CookieExpiry, SessionManagerLayer,
    cookie::time::OffsetDateTime,
    session::{Id, Record},
    session_store::{self, SessionStore},
};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "ownshop_session";

/// Evicts a record when its expiry date is reached.
struct RecordExpiry;

impl RecordExpiry {
    fn remaining(record: &Record) -> Duration {
        Duration::try_from(record.expiry_date - OffsetDateTime::now_utc()).unwrap_or(Duration::ZERO)
    }
}

impl Expiry<Id, Record> for RecordExpiry {
    fn expire_after_create(&self, _id: &Id, record: &Record, _created_at: Instant) -> Option<Duration> {
        Some(Self::remaining(record))
    }

    fn expire_after_update(
        &self,
        _id: &Id,
        record: &Record,
        _updated_at: Instant,
        _remaining: Option<Duration>,
    ) -> Option<Duration> {
        Some(Self::remaining(record))
    }
}

/// In-memory session store with capacity and expiry bounds.
#[derive(Clone)]
pub struct SessionCache {
    records: Cache<Id, Record>,
}

impl SessionCache {
    /// Create a store holding at most `capacity` sessions.
    #[must_use]
    pub fn new(capacity: u64) -> Self {
        Self {
            records: Cache::builder()
                .max_capacity(capacity)
                .expire_after(RecordExpiry)
                .build(),
        }
    }

    /// Number of sessions currently held. Eventually consistent.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.records.entry_count()
    }

    /// Whether no sessions are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply pending evictions now.
    pub async fn run_pending_tasks(&self) {
        self.records.run_pending_tasks().await;
    }
}

impl std::fmt::Debug for SessionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCache")
            .field("sessions", &self.records.entry_count())
            .finish()
    }
}

#[async_trait]
impl SessionStore for SessionCache {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        while self.records.contains_key(&record.id) {
            record.id = Id::default();
        }
        self.records.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.records.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn load(&self, id: &Id) -> session_store::Result<Option<Record>> {
        Ok(self
            .records
            .get(id)
            .await
            .filter(|record| record.expiry_date > OffsetDateTime::now_utc()))
    }

    async fn delete(&self, id: &Id) -> session_store::Result<()> {
        self.records.invalidate(id).await;
        Ok(())
    }
}

/// Create the session layer over `store`.
///
/// Sessions expire after `config.session_ttl` of inactivity. Cookies are
/// `HttpOnly`, `SameSite=Lax`, and `Secure` when the base URL is https.
#[must_use]
pub fn create_session_layer(
    store: SessionCache,
    config: &StorefrontConfig,
) -> SessionManagerLayer<SessionCache> {
    let ttl = i64::try_from(config.session_ttl.as_secs()).unwrap_or(i64::MAX);

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(CookieExpiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(ttl),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tower_sessions::cookie::time::Duration as TimeDuration;

    use super::*;

    fn record(expires_in: TimeDuration) -> Record {
        Record {
            id: Id::default(),
            data: std::collections::HashMap::from([(
                "authRole".to_string(),
                serde_json::json!("user"),
            )]),
            expiry_date: OffsetDateTime::now_utc() + expires_in,
        }
    }

    #[tokio::test]
    async fn test_live_session_round_trips() {
        let store = SessionCache::new(10);
        let mut live = record(TimeDuration::hours(1));
        store.create(&mut live).await.unwrap();

        let loaded = store.load(&live.id).await.unwrap().unwrap();
        assert_eq!(loaded.data, live.data);

        store.delete(&live.id).await.unwrap();
        assert!(store.load(&live.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_evicted() {
        let store = SessionCache::new(10);
        let mut expired = record(TimeDuration::seconds(-1));
        store.create(&mut expired).await.unwrap();

        assert!(store.load(&expired.id).await.unwrap().is_none());
        store.run_pending_tasks().await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_capacity_bounds_sessions() {
        let store = SessionCache::new(5);
        for _ in 0..50 {
            let mut live = record(TimeDuration::hours(1));
            store.create(&mut live).await.unwrap();
        }
        store.run_pending_tasks().await;
        assert!(store.len() <= 5);
    }

    #[tokio::test]
    async fn test_save_refreshes_expiry() {
        let store = SessionCache::new(10);
        let mut session = record(TimeDuration::seconds(-1));
        store.create(&mut session).await.unwrap();

        session.expiry_date = OffsetDateTime::now_utc() + TimeDuration::hours(1);
        store.save(&session).await.unwrap();
        store.run_pending_tasks().await;
        assert!(store.load(&session.id).await.unwrap().is_some());
    }
}
