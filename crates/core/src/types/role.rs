//! Identity roles.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Role of a signed-in identity.
///
/// Roles are mutually exclusive. A guest has no identity and therefore no
/// role, which callers model as `Option<Role>::None`.
///
/// The serialized form is the session marker persisted under `authRole`:
/// customers are stored as `user` for compatibility with the browser demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// A shopper who can fill a cart.
    #[serde(rename = "user")]
    Customer,
    /// A vendor who manages the products of one store.
    #[serde(rename = "seller")]
    Seller,
    /// The site administrator (banner, dashboards).
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    /// Session marker string for this role.
    #[must_use]
    pub const fn marker(&self) -> &'static str {
        match self {
            Self::Customer => "user",
            Self::Seller => "seller",
            Self::Admin => "admin",
        }
    }

    /// Parse a persisted session marker. Unknown markers yield `None`.
    #[must_use]
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "user" => Some(Self::Customer),
            "seller" => Some(Self::Seller),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_round_trip() {
        for role in [Role::Customer, Role::Seller, Role::Admin] {
            assert_eq!(Role::from_marker(role.marker()), Some(role));
        }
        assert_eq!(Role::from_marker("guest"), None);
        assert_eq!(Role::from_marker("Admin"), None);
    }

    #[test]
    fn test_serde_uses_marker() {
        assert_eq!(serde_json::to_string(&Role::Customer).unwrap(), "\"user\"");
        let role: Role = serde_json::from_str("\"seller\"").unwrap();
        assert_eq!(role, Role::Seller);
    }
}
