//! The authenticated user identity.

use serde::{Deserialize, Serialize};

use crate::types::{Role, UserId};

/// Identity of the logged-in user, as held in the session.
///
/// Created from a successful upstream login or rehydrated from the persisted
/// session; the `role` field re-normalizes on every deserialization (see
/// [`Role`]), so a stored identity with a raw upstream label loads with the
/// canonical role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Upstream user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address as the upstream reported it.
    pub email: String,
    /// Normalized role.
    pub role: Role,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_renormalizes_role() {
        let raw = r#"{"id": 3, "name": "Ana", "email": "ana@example.com", "role": "Vendedor"}"#;
        let identity: Identity = serde_json::from_str(raw).unwrap();
        assert_eq!(identity.role, Role::Vendor);
    }

    #[test]
    fn test_deserialize_unknown_role_degrades_to_client() {
        let raw = r#"{"id": 3, "name": "Ana", "email": "ana@example.com", "role": "owner"}"#;
        let identity: Identity = serde_json::from_str(raw).unwrap();
        assert_eq!(identity.role, Role::Client);
    }

    #[test]
    fn test_roundtrip_is_canonical() {
        let identity = Identity {
            id: UserId::new(1),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            role: Role::Admin,
        };
        let json = serde_json::to_string(&identity).unwrap();
        let back: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, identity);
        assert!(json.contains("\"admin\""));
    }
}
