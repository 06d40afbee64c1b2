//! Signed-in identities and the homepage banner.

use serde::{Deserialize, Serialize};

use crate::{Email, UserId};

/// A signed-in identity.
///
/// Persisted in the session as `{"uid", "email", "storeName"?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: UserId,
    pub email: Email,
    /// Set for sellers only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
}

impl User {
    /// A customer identity derived from an email.
    #[must_use]
    pub fn customer(email: Email) -> Self {
        Self {
            uid: UserId::local(&email),
            email,
            store_name: None,
        }
    }

    /// A seller identity; the store name defaults to `"<email>'s Store"`.
    #[must_use]
    pub fn seller(email: Email, store_name: Option<String>) -> Self {
        let store_name = store_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| email.default_store_name());
        Self {
            uid: UserId::local(&email),
            email,
            store_name: Some(store_name),
        }
    }

    /// The built-in administrator identity.
    #[must_use]
    pub fn admin(email: Email) -> Self {
        Self {
            uid: UserId::admin(),
            email,
            store_name: None,
        }
    }
}

const DEFAULT_BANNER_TITLE: &str = "Seasonal hot picks";
const DEFAULT_BANNER_IMAGE: &str = "https://images.unsplash.com/photo-1667409702771-14213044ccc7?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&q=80&w=1080";

/// The homepage banner. Always present; only an admin may replace it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub title: String,
    pub image_url: String,
}

impl Default for Banner {
    fn default() -> Self {
        Self {
            title: DEFAULT_BANNER_TITLE.to_string(),
            image_url: DEFAULT_BANNER_IMAGE.to_string(),
        }
    }
}
