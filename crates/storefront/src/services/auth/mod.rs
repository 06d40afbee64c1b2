//! Mock credential service.
//!
//! A fixed allow-list standing in for a real identity provider: one admin
//! account and a handful of known vendors. Checks sleep for a configurable
//! latency to mimic a remote call.

mod error;

pub use error::AuthError;

use std::collections::HashMap;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use ownshop_core::Email;

use crate::config::AuthConfig;

/// Password shared by the demo accounts.
pub const DEMO_PASSWORD: &str = "password";

/// Demo administrator email.
pub const DEMO_ADMIN_EMAIL: &str = "admin@example.com";

/// Demo vendors: email and store name.
pub const DEMO_VENDORS: &[(&str, &str)] = &[
    ("seller@techwonders.com", "Tech Wonders"),
    ("seller@soundscape.com", "SoundScape"),
];

struct Account {
    password: SecretString,
    store_name: Option<String>,
}

impl Account {
    fn password_matches(&self, password: &str) -> bool {
        self.password.expose_secret() == password
    }
}

/// A seller accepted by the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedSeller {
    pub email: Email,
    /// Registered store name; `None` for a newly onboarded seller.
    pub store_name: Option<String>,
}

/// In-memory allow-list of admin and vendor accounts.
pub struct CredentialDirectory {
    admins: HashMap<String, Account>,
    vendors: HashMap<String, Account>,
    latency: Duration,
    open_seller_signup: bool,
}

impl std::fmt::Debug for CredentialDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialDirectory")
            .field("admins", &self.admins.keys().collect::<Vec<_>>())
            .field("vendors", &self.vendors.keys().collect::<Vec<_>>())
            .field("latency", &self.latency)
            .field("open_seller_signup", &self.open_seller_signup)
            .finish()
    }
}

impl CredentialDirectory {
    /// The demo directory with the given latency and sign-up policy.
    #[must_use]
    pub fn demo(config: &AuthConfig) -> Self {
        let account = |store_name: Option<&str>| Account {
            password: SecretString::from(DEMO_PASSWORD),
            store_name: store_name.map(str::to_string),
        };

        Self {
            admins: HashMap::from([(DEMO_ADMIN_EMAIL.to_string(), account(None))]),
            vendors: DEMO_VENDORS
                .iter()
                .map(|(email, store)| ((*email).to_string(), account(Some(store))))
                .collect(),
            latency: config.latency,
            open_seller_signup: config.open_seller_signup,
        }
    }

    /// Check admin credentials.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` unless the email is a known
    /// admin and the password matches.
    #[instrument(skip(self, password))]
    pub async fn verify_admin(&self, email: &str, password: &str) -> Result<Email, AuthError> {
        self.simulate_latency().await;
        let email = Email::parse(email)?;

        match self.admins.get(&normalize(&email)) {
            Some(account) if account.password_matches(password) => Ok(email),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    /// Check seller credentials.
    ///
    /// Known vendors must present their password. Unknown emails are
    /// onboarded as new sellers when open sign-up is enabled and a password
    /// was given.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` for a malformed email, or
    /// `AuthError::InvalidCredentials` when the check fails.
    #[instrument(skip(self, password))]
    pub async fn verify_seller(
        &self,
        email: &str,
        password: &str,
    ) -> Result<VerifiedSeller, AuthError> {
        self.simulate_latency().await;
        let email = Email::parse(email)?;

        match self.vendors.get(&normalize(&email)) {
            Some(account) if account.password_matches(password) => Ok(VerifiedSeller {
                email,
                store_name: account.store_name.clone(),
            }),
            Some(_) => Err(AuthError::InvalidCredentials),
            None if self.open_seller_signup && !password.is_empty() => {
                tracing::info!(email = %email, "Onboarding new seller");
                Ok(VerifiedSeller {
                    email,
                    store_name: None,
                })
            }
            None => Err(AuthError::InvalidCredentials),
        }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

fn normalize(email: &Email) -> String {
    email.as_str().to_lowercase()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn directory(open_seller_signup: bool) -> CredentialDirectory {
        CredentialDirectory::demo(&AuthConfig {
            latency: Duration::ZERO,
            open_seller_signup,
        })
    }

    #[tokio::test]
    async fn test_verify_admin() {
        let directory = directory(true);
        let email = directory
            .verify_admin("admin@example.com", "password")
            .await
            .unwrap();
        assert_eq!(email.as_str(), "admin@example.com");

        assert!(matches!(
            directory.verify_admin("x@x.com", "wrong").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            directory.verify_admin("admin@example.com", "wrong").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            directory.verify_admin("not-an-email", "password").await,
            Err(AuthError::InvalidEmail(_))
        ));
    }

    #[tokio::test]
    async fn test_verify_known_vendor() {
        let directory = directory(true);
        let seller = directory
            .verify_seller("Seller@SoundScape.com", "password")
            .await
            .unwrap();
        assert_eq!(seller.store_name.as_deref(), Some("SoundScape"));

        assert!(matches!(
            directory.verify_seller("seller@soundscape.com", "nope").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_unknown_vendor_signup_policy() {
        let seller = directory(true)
            .verify_seller("new@vendor.io", "secret")
            .await
            .unwrap();
        assert_eq!(seller.store_name, None);

        assert!(directory(true).verify_seller("new@vendor.io", "").await.is_err());
        assert!(directory(false).verify_seller("new@vendor.io", "secret").await.is_err());
    }

    #[test]
    fn test_debug_hides_passwords() {
        let debug = format!("{:?}", directory(true));
        assert!(debug.contains("admin@example.com"));
        assert!(!debug.contains("password\""));
    }
}
