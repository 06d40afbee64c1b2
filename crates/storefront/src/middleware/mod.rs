//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (binary only)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session lock (one request at a time per session cookie)
//! 5. Session layer (tower-sessions over a bounded moka store)
//! 6. Rate limiting on sign-in and AI routes (binary only)

pub mod auth;
pub mod rate_limit;
pub mod request_id;
pub mod session;
pub mod session_lock;

pub use auth::{CurrentStore, SessionStore};
pub use rate_limit::{ai_rate_limiter, signin_rate_limiter};
pub use request_id::request_id_middleware;
pub use session::{SessionCache, create_session_layer};
pub use session_lock::{SessionLocks, serialize_session_requests};
