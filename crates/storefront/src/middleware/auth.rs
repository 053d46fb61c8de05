//! Authentication state: session store helpers and extractors.
//!
//! The session holds the identity/token pair committed at login. Every
//! request rehydrates it through [`restore_identity`]; there is no error
//! state - a corrupt persisted identity (or token) is discarded wholesale
//! and the request proceeds unauthenticated.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use electrohub_core::{Identity, Role};

use crate::models::{AuthSession, session_keys};

// =============================================================================
// Session store operations
// =============================================================================

/// Rehydrate the authenticated state from the session.
///
/// Requires both the identity record and the token to be present; with
/// either one missing the session counts as unauthenticated. A payload that
/// fails to deserialize discards both keys, silently - there is nothing to
/// retry against and no error to surface.
///
/// The identity's role re-normalizes on every load (see
/// [`electrohub_core::Role`]), so a stored raw upstream label can never
/// bypass the closed role set.
pub async fn restore_identity(session: &Session) -> Option<AuthSession> {
    let token = match session.get::<String>(session_keys::TOKEN).await {
        Ok(token) => token,
        Err(_) => {
            discard_auth_state(session).await;
            return None;
        }
    };

    let identity = match session.get::<Identity>(session_keys::USER).await {
        Ok(identity) => identity,
        Err(_) => {
            discard_auth_state(session).await;
            return None;
        }
    };

    match (identity, token) {
        (Some(identity), Some(token)) => Some(AuthSession { identity, token }),
        _ => None,
    }
}

/// Commit a fresh login to the session.
///
/// Purely a local state commit: the upstream authentication exchange has
/// already happened and its result is written through to session storage.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn establish_session(
    session: &Session,
    identity: &Identity,
    token: &str,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::USER, identity).await?;
    session.insert(session_keys::TOKEN, token).await?;
    Ok(())
}

/// Clear the authenticated state (logout). No network call.
///
/// The cart is deliberately left alone: it belongs to the visitor, not to
/// the authenticated identity.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_session(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<serde_json::Value>(session_keys::USER)
        .await?;
    session
        .remove::<serde_json::Value>(session_keys::TOKEN)
        .await?;
    Ok(())
}

/// Drop both auth keys after a corrupt read, ignoring secondary failures.
async fn discard_auth_state(session: &Session) {
    tracing::warn!("corrupt session auth state, discarding");
    let _ = session
        .remove::<serde_json::Value>(session_keys::USER)
        .await;
    let _ = session
        .remove::<serde_json::Value>(session_keys::TOKEN)
        .await;
}

// =============================================================================
// Extractors
// =============================================================================

/// Error returned when a route's authentication requirement is not met.
pub enum AuthRejection {
    /// Redirect to the login page (not logged in).
    RedirectToLogin,
    /// Logged in but the role does not grant access.
    Forbidden,
    /// Session machinery unavailable.
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Forbidden => StatusCode::FORBIDDEN.into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

/// Extractor that optionally gets the authenticated session.
///
/// Never rejects; pages that render for guests and users alike use this.
pub struct OptionalAuth(pub Option<AuthSession>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth = match parts.extensions.get::<Session>() {
            Some(session) => restore_identity(session).await,
            None => None,
        };

        Ok(Self(auth))
    }
}

/// Extractor that requires an authenticated session of any role.
///
/// # Example
///
/// ```rust,ignore
/// async fn orders(RequireAuth(auth): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", auth.identity.name)
/// }
/// ```
pub struct RequireAuth(pub AuthSession);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        restore_identity(session)
            .await
            .map(Self)
            .ok_or(AuthRejection::RedirectToLogin)
    }
}

/// Implement a role-gated extractor on top of [`RequireAuth`].
macro_rules! require_role {
    ($name:ident, $role:expr, $doc:literal) => {
        #[doc = $doc]
        pub struct $name(pub AuthSession);

        impl<S> FromRequestParts<S> for $name
        where
            S: Send + Sync,
        {
            type Rejection = AuthRejection;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &S,
            ) -> Result<Self, Self::Rejection> {
                let RequireAuth(auth) = RequireAuth::from_request_parts(parts, state).await?;
                if auth.identity.role == $role {
                    Ok(Self(auth))
                } else {
                    Err(AuthRejection::Forbidden)
                }
            }
        }
    };
}

require_role!(
    RequireAdmin,
    Role::Admin,
    "Extractor that requires an authenticated admin."
);
require_role!(
    RequireVendor,
    Role::Vendor,
    "Extractor that requires an authenticated vendor."
);
require_role!(
    RequireClient,
    Role::Client,
    "Extractor that requires an authenticated client."
);
