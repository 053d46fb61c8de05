//! Authentication service.
//!
//! Validates credentials locally (format only - passwords are never checked
//! here) and delegates the actual exchange to the upstream auth endpoints.
//! On success the caller commits the returned identity/token pair to the
//! session; see `crate::middleware::auth`.

mod error;

pub use error::AuthError;

use electrohub_core::Email;

use crate::api::{ApiClient, ApiError, AuthResponse, RegisterRequest};

/// Minimum password length accepted by the register form.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
///
/// Thin wrapper over the upstream auth endpoints with form-level validation
/// and friendlier error mapping.
pub struct AuthService<'a> {
    api: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` for a malformed email and
    /// `AuthError::InvalidCredentials` when the upstream rejects the pair.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        let email = Email::parse(email)?;

        self.api
            .login(email.as_str(), password)
            .await
            .map_err(|e| match e {
                ApiError::Unauthorized
                | ApiError::NotFound(_)
                | ApiError::Upstream { status: 400, .. } => AuthError::InvalidCredentials,
                other => AuthError::Api(other),
            })
    }

    /// Register a new account. The upstream logs the user straight in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail`, `AuthError::WeakPassword`, or
    /// `AuthError::PasswordMismatch` for local validation failures, and
    /// `AuthError::UserAlreadyExists` when the upstream reports a conflict.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<AuthResponse, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;
        if password != password_confirm {
            return Err(AuthError::PasswordMismatch);
        }

        let request = RegisterRequest {
            name: name.trim().to_string(),
            email: email.as_str().to_string(),
            password: password.to_string(),
        };

        self.api.register(&request).await.map_err(|e| match e {
            ApiError::Upstream { status: 409, .. } => AuthError::UserAlreadyExists,
            other => AuthError::Api(other),
        })
    }
}

/// Validate password requirements for registration.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password_too_short() {
        assert!(matches!(
            validate_password("short"),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[test]
    fn test_validate_password_ok() {
        assert!(validate_password("long-enough-password").is_ok());
    }
}
