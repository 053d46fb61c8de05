//! Admin dashboard: vendors, clients, and product administration.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use electrohub_core::{Identity, ProductId};

use crate::api::{ClientRecord, ProductInput, Vendor};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::routes::products::ProductView;
use crate::state::AppState;

/// Product form data shared by the admin and vendor dashboards.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub stock: i32,
    pub description: Option<String>,
}

impl From<ProductForm> for ProductInput {
    fn from(form: ProductForm) -> Self {
        Self {
            name: form.name,
            category: form.category,
            price: form.price,
            stock: form.stock,
            description: form.description.filter(|d| !d.trim().is_empty()),
        }
    }
}

/// Admin dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/admin.html")]
pub struct AdminDashboardTemplate {
    pub user: Option<Identity>,
    pub vendors: Vec<Vendor>,
    pub clients: Vec<ClientRecord>,
    pub products: Vec<ProductView>,
}

/// Display the admin dashboard.
#[instrument(skip(state, auth))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
) -> Result<impl IntoResponse> {
    let api = state.api();
    let vendors = api.vendors(&auth.token).await?;
    let clients = api.clients(&auth.token).await?;
    let products = api.products().await?;

    Ok(AdminDashboardTemplate {
        user: Some(auth.identity),
        vendors,
        clients,
        products: products.iter().map(ProductView::from).collect(),
    })
}

/// Create a product.
#[instrument(skip(state, auth, form))]
pub async fn create_product(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    state
        .api()
        .create_product(&auth.token, &form.into())
        .await?;
    Ok(Redirect::to("/dashboard/admin").into_response())
}

/// Update a product.
#[instrument(skip(state, auth, form))]
pub async fn update_product(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    Path(id): Path<i32>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    state
        .api()
        .update_product(&auth.token, ProductId::new(id), &form.into())
        .await?;
    Ok(Redirect::to("/dashboard/admin").into_response())
}

/// Delete a product.
#[instrument(skip(state, auth))]
pub async fn delete_product(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Response> {
    state
        .api()
        .delete_product(&auth.token, ProductId::new(id))
        .await?;
    Ok(Redirect::to("/dashboard/admin").into_response())
}
