//! User role with closed, least-privilege-default normalization.
//!
//! The upstream API emits role labels in either English or Spanish, and in
//! arbitrary casing. Everything funnels through [`Role::normalize`], which is
//! total: an unrecognized label degrades to [`Role::Client`] rather than
//! failing, so malformed upstream data can never grant elevated access.

use core::convert::Infallible;
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Full access to marketplace administration.
    Admin,
    /// Manages own products, sales, and reports.
    Vendor,
    /// Regular shopper. Least-privileged role and the fallback for
    /// unrecognized labels.
    #[default]
    Client,
}

impl Role {
    /// Map an arbitrary role label to the closed role set.
    ///
    /// Case-insensitive and whitespace-trimmed. Accepts both the English and
    /// Spanish labels the upstream API is known to emit. Any other input maps
    /// to [`Role::Client`] with a warning diagnostic.
    ///
    /// This function is idempotent: normalizing an already-canonical label
    /// returns the same role.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "admin" => Self::Admin,
            "vendor" | "vendedor" => Self::Vendor,
            "client" | "cliente" => Self::Client,
            other => {
                tracing::warn!(role = other, "unrecognized role label, defaulting to client");
                Self::Client
            }
        }
    }

    /// Canonical lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Vendor => "vendor",
            Self::Client => "client",
        }
    }

    /// Whether this role may access the admin dashboard.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Whether this role may access the vendor dashboard.
    #[must_use]
    pub const fn is_vendor(self) -> bool {
        matches!(self, Self::Vendor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::normalize(s))
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Deserialization routes through `normalize` so loading a persisted identity
// (or an upstream auth response) re-normalizes the role on every load and can
// never fail on this field.
impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::normalize(&raw))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_canonical_labels() {
        assert_eq!(Role::normalize("admin"), Role::Admin);
        assert_eq!(Role::normalize("vendor"), Role::Vendor);
        assert_eq!(Role::normalize("client"), Role::Client);
    }

    #[test]
    fn test_normalize_spanish_labels() {
        assert_eq!(Role::normalize("vendedor"), Role::Vendor);
        assert_eq!(Role::normalize("cliente"), Role::Client);
    }

    #[test]
    fn test_normalize_is_case_insensitive_and_trims() {
        assert_eq!(Role::normalize("Vendedor"), Role::Vendor);
        assert_eq!(Role::normalize("  ADMIN  "), Role::Admin);
        assert_eq!(Role::normalize("Cliente\n"), Role::Client);
    }

    #[test]
    fn test_normalize_unknown_defaults_to_client() {
        assert_eq!(Role::normalize("superuser"), Role::Client);
        assert_eq!(Role::normalize(""), Role::Client);
        assert_eq!(Role::normalize("root"), Role::Client);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["admin", "Vendedor", "cliente", "garbage", ""] {
            let once = Role::normalize(raw);
            let twice = Role::normalize(once.as_str());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_serialize_canonical() {
        assert_eq!(serde_json::to_string(&Role::Vendor).unwrap(), "\"vendor\"");
    }

    #[test]
    fn test_deserialize_normalizes() {
        let role: Role = serde_json::from_str("\"Vendedor\"").unwrap();
        assert_eq!(role, Role::Vendor);

        // Unknown labels still deserialize, to the least-privileged role.
        let role: Role = serde_json::from_str("\"mystery\"").unwrap();
        assert_eq!(role, Role::Client);
    }
}
