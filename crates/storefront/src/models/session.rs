//! Session-related types.
//!
//! The session is the storefront's only persistent state: the authenticated
//! identity plus its bearer token, the shopping cart, and the applied coupon
//! all live under the keys below.

use serde::{Deserialize, Serialize};

use electrohub_core::Identity;

/// The authenticated part of a session: identity plus the upstream token.
///
/// Handlers that call authenticated upstream endpoints receive this via the
/// `RequireAuth`/`RequireRole` extractors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    /// The logged-in user.
    pub identity: Identity,
    /// Opaque bearer token for upstream API calls.
    pub token: String,
}

/// Session keys for persisted state.
pub mod session_keys {
    /// Key for the serialized identity record.
    pub const USER: &str = "user";

    /// Key for the opaque bearer token.
    pub const TOKEN: &str = "token";

    /// Key for the serialized cart line items.
    pub const CART: &str = "cart";

    /// Key for the applied coupon code.
    pub const COUPON: &str = "coupon";
}
