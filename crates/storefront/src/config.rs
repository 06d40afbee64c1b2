//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; defaults suit local development.
//!
//! - `OWNSHOP_HOST` - Bind address (default: 127.0.0.1)
//! - `OWNSHOP_PORT` - Listen port (default: 3000)
//! - `OWNSHOP_BASE_URL` - Public URL for the storefront (default: `http://localhost:3000`)
//! - `OWNSHOP_SESSION_TTL_SECS` - Session inactivity expiry (default: 86400)
//! - `OWNSHOP_SESSION_CAPACITY` - Most sessions held in memory (default: 100000)
//! - `OWNSHOP_AUTH_LATENCY_MS` - Simulated credential check latency (default: 500)
//! - `OWNSHOP_OPEN_SELLER_SIGNUP` - Let unknown emails sign in as new sellers (default: true)
//! - `GENAI_API_KEY` - Text-generation API key; AI helpers are disabled without it
//! - `GENAI_MODEL` - Model name (default: gemini-2.0-flash)
//! - `GENAI_BASE_URL` - API base URL (default: `https://generativelanguage.googleapis.com`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Default text-generation model.
pub const DEFAULT_GENAI_MODEL: &str = "gemini-2.0-flash";

/// Default text-generation API base URL.
pub const DEFAULT_GENAI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "put-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Session inactivity expiry
    pub session_ttl: Duration,
    /// Most sessions held in memory before the least recently used are evicted
    pub session_capacity: u64,
    /// Mock credential check configuration
    pub auth: AuthConfig,
    /// Text-generation provider, if configured
    pub genai: Option<GenAiConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry performance trace sample rate
    pub sentry_traces_sample_rate: f32,
}

/// Settings for the mock credential directory.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Artificial delay applied to admin/seller credential checks
    pub latency: Duration,
    /// Whether unknown emails may sign in as brand new sellers
    pub open_seller_signup: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(500),
            open_seller_signup: true,
        }
    }
}

/// Text-generation API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct GenAiConfig {
    /// API key sent with every request
    pub api_key: SecretString,
    /// Model name (e.g., gemini-2.0-flash)
    pub model: String,
    /// API base URL without a trailing slash
    pub base_url: String,
}

impl std::fmt::Debug for GenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid, or if the
    /// API key looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Build configuration from an explicit variable map.
    ///
    /// # Errors
    ///
    /// See [`StorefrontConfig::from_env`].
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let env = Env(vars);

        let host = env.parse_or("OWNSHOP_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = env.parse_or("OWNSHOP_PORT", 3000_u16)?;
        let base_url = env.get_or("OWNSHOP_BASE_URL", "http://localhost:3000");
        Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("OWNSHOP_BASE_URL".to_string(), e.to_string())
        })?;
        let session_ttl = Duration::from_secs(env.parse_or("OWNSHOP_SESSION_TTL_SECS", 86_400_u64)?);
        let session_capacity = env.parse_or("OWNSHOP_SESSION_CAPACITY", 100_000_u64)?;

        let auth = AuthConfig {
            latency: Duration::from_millis(env.parse_or("OWNSHOP_AUTH_LATENCY_MS", 500_u64)?),
            open_seller_signup: env.parse_or("OWNSHOP_OPEN_SELLER_SIGNUP", true)?,
        };

        let genai = GenAiConfig::from_env(&env)?;

        Ok(Self {
            host,
            port,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_ttl,
            session_capacity,
            auth,
            genai,
            sentry_dsn: env.get("SENTRY_DSN"),
            sentry_environment: env.get("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: env.parse_or("SENTRY_SAMPLE_RATE", 1.0_f32)?,
            sentry_traces_sample_rate: env.parse_or("SENTRY_TRACES_SAMPLE_RATE", 0.0_f32)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies must be marked `Secure`.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl GenAiConfig {
    fn from_env(env: &Env<'_>) -> Result<Option<Self>, ConfigError> {
        let Some(api_key) = env.get("GENAI_API_KEY") else {
            return Ok(None);
        };
        validate_secret_strength(&api_key, "GENAI_API_KEY")?;

        Ok(Some(Self {
            api_key: SecretString::from(api_key),
            model: env.get_or("GENAI_MODEL", DEFAULT_GENAI_MODEL),
            base_url: env
                .get_or("GENAI_BASE_URL", DEFAULT_GENAI_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
        }))
    }

    /// Whether the key is non-empty after trimming.
    #[must_use]
    pub fn has_key(&self) -> bool {
        !self.api_key.expose_secret().trim().is_empty()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Borrowed view over the variable map.
struct Env<'a>(&'a HashMap<String, String>);

impl Env<'_> {
    /// Get an optional variable, treating blank values as unset.
    fn get(&self, key: &str) -> Option<String> {
        self.0
            .get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Get a variable with a default value.
    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to a default when unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get(key).map_or(Ok(default), |raw| {
            raw.parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}
