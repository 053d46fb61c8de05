//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use electrohub_core::Identity;

use crate::filters;
use crate::middleware::OptionalAuth;
use crate::routes::products::ProductView;
use crate::state::AppState;

/// Number of products featured on the home page.
const FEATURED_COUNT: usize = 6;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub user: Option<Identity>,
    pub featured: Vec<ProductView>,
}

/// Display the home page with a handful of featured products.
///
/// An upstream catalog failure degrades to an empty shelf rather than an
/// error page.
#[instrument(skip(state, auth))]
pub async fn home(
    State(state): State<AppState>,
    OptionalAuth(auth): OptionalAuth,
) -> impl IntoResponse {
    let featured = match state.api().products().await {
        Ok(products) => products
            .iter()
            .take(FEATURED_COUNT)
            .map(ProductView::from)
            .collect(),
        Err(e) => {
            tracing::warn!("Failed to fetch featured products: {e}");
            Vec::new()
        }
    };

    HomeTemplate {
        user: auth.map(|a| a.identity),
        featured,
    }
}
