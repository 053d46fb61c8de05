//! Customer dashboard: order history.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use electrohub_core::Identity;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

use super::SaleView;

/// Query parameters for post-checkout feedback.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub success: Option<String>,
}

/// Customer dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/customer.html")]
pub struct CustomerDashboardTemplate {
    pub user: Option<Identity>,
    pub orders: Vec<SaleView>,
    pub checkout_success: bool,
}

/// Display the customer's order history.
///
/// Any authenticated role may look at its own orders; the upstream scopes
/// the sales list by the bearer token.
#[instrument(skip(state, auth))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse> {
    let sales = state.api().sales(&auth.token).await?;

    Ok(CustomerDashboardTemplate {
        orders: sales.iter().map(SaleView::from).collect(),
        user: Some(auth.identity),
        checkout_success: query.success.is_some(),
    })
}
