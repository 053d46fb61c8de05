//! Authentication route handlers.
//!
//! The forms post to the upstream auth endpoints through `AuthService`; a
//! successful exchange is committed to the session (identity + token) and
//! the user lands on the page their role calls for.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use electrohub_core::{Identity, Role};

use crate::error::Result;
use crate::filters;
use crate::middleware::{clear_session, establish_session};
use crate::services::auth::AuthService;
use crate::state::AppState;

// =============================================================================
// Forms
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub user: Option<Identity>,
    pub error: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub user: Option<Identity>,
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Landing page after login, by role.
const fn landing_page(role: Role) -> &'static str {
    match role {
        Role::Admin => "/dashboard/admin",
        Role::Vendor => "/dashboard/vendor",
        Role::Client => "/",
    }
}

/// Display the login page.
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate {
        user: None,
        error: None,
    }
}

/// Login action.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let service = AuthService::new(state.api());

    match service.login(&form.email, &form.password).await {
        Ok(auth) => {
            establish_session(&session, &auth.user, &auth.token).await?;
            tracing::info!(user_id = %auth.user.id, role = %auth.user.role, "login");
            Ok(Redirect::to(landing_page(auth.user.role)).into_response())
        }
        Err(e) => Ok(LoginTemplate {
            user: None,
            error: Some(e.user_message()),
        }
        .into_response()),
    }
}

/// Display the registration page.
pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate {
        user: None,
        error: None,
    }
}

/// Registration action. The upstream logs the new account straight in.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    let service = AuthService::new(state.api());

    match service
        .register(
            &form.name,
            &form.email,
            &form.password,
            &form.password_confirm,
        )
        .await
    {
        Ok(auth) => {
            establish_session(&session, &auth.user, &auth.token).await?;
            tracing::info!(user_id = %auth.user.id, "registered");
            Ok(Redirect::to(landing_page(auth.user.role)).into_response())
        }
        Err(e) => Ok(RegisterTemplate {
            user: None,
            error: Some(e.user_message()),
        }
        .into_response()),
    }
}

/// Logout action: clear the session's auth state, keep the cart.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Response> {
    clear_session(&session).await?;
    Ok(Redirect::to("/").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landing_page_by_role() {
        assert_eq!(landing_page(Role::Admin), "/dashboard/admin");
        assert_eq!(landing_page(Role::Vendor), "/dashboard/vendor");
        assert_eq!(landing_page(Role::Client), "/");
    }
}
