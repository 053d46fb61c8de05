//! Vendor dashboard: own products, sales, clients, and reports.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use electrohub_core::{ClientId, Identity, ProductId, SaleId};

use crate::api::{ClientSummary, ReportSummary};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireVendor;
use crate::routes::products::ProductView;
use crate::state::AppState;

use super::SaleView;
use super::admin::ProductForm;

/// Vendor dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/vendor.html")]
pub struct VendorDashboardTemplate {
    pub user: Option<Identity>,
    pub products: Vec<ProductView>,
    pub sales: Vec<SaleView>,
    pub clients: Vec<ClientSummary>,
    pub report: Option<ReportSummary>,
}

/// Per-client sales template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/vendor_client.html")]
pub struct VendorClientTemplate {
    pub user: Option<Identity>,
    pub client_id: i32,
    pub sales: Vec<SaleView>,
}

/// Sale status form data.
#[derive(Debug, Deserialize)]
pub struct SaleStatusForm {
    pub status: String,
}

/// Display the vendor dashboard.
///
/// The report summary is decoration; if the upstream report endpoint is
/// down, the rest of the dashboard still renders.
#[instrument(skip(state, auth))]
pub async fn index(
    State(state): State<AppState>,
    RequireVendor(auth): RequireVendor,
) -> Result<impl IntoResponse> {
    let api = state.api();
    let products = api.my_products(&auth.token).await?;
    let sales = api.sales(&auth.token).await?;
    let clients = api.client_summaries(&auth.token).await?;
    let report = match api.report_summary(&auth.token).await {
        Ok(report) => Some(report),
        Err(e) => {
            tracing::warn!("Failed to fetch report summary: {e}");
            None
        }
    };

    Ok(VendorDashboardTemplate {
        user: Some(auth.identity),
        products: products.iter().map(ProductView::from).collect(),
        sales: sales.iter().map(SaleView::from).collect(),
        clients,
        report,
    })
}

/// Create a product owned by this vendor.
#[instrument(skip(state, auth, form))]
pub async fn create_product(
    State(state): State<AppState>,
    RequireVendor(auth): RequireVendor,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    state
        .api()
        .create_product(&auth.token, &form.into())
        .await?;
    Ok(Redirect::to("/dashboard/vendor").into_response())
}

/// Update one of this vendor's products.
#[instrument(skip(state, auth, form))]
pub async fn update_product(
    State(state): State<AppState>,
    RequireVendor(auth): RequireVendor,
    Path(id): Path<i32>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    state
        .api()
        .update_product(&auth.token, ProductId::new(id), &form.into())
        .await?;
    Ok(Redirect::to("/dashboard/vendor").into_response())
}

/// Delete one of this vendor's products.
#[instrument(skip(state, auth))]
pub async fn delete_product(
    State(state): State<AppState>,
    RequireVendor(auth): RequireVendor,
    Path(id): Path<i32>,
) -> Result<Response> {
    state
        .api()
        .delete_product(&auth.token, ProductId::new(id))
        .await?;
    Ok(Redirect::to("/dashboard/vendor").into_response())
}

/// Update the status of a sale.
#[instrument(skip(state, auth))]
pub async fn update_sale_status(
    State(state): State<AppState>,
    RequireVendor(auth): RequireVendor,
    Path(id): Path<i32>,
    Form(form): Form<SaleStatusForm>,
) -> Result<Response> {
    state
        .api()
        .update_sale_status(&auth.token, SaleId::new(id), &form.status)
        .await?;
    Ok(Redirect::to("/dashboard/vendor").into_response())
}

/// Sales for one of this vendor's clients.
#[instrument(skip(state, auth))]
pub async fn client_sales(
    State(state): State<AppState>,
    RequireVendor(auth): RequireVendor,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let sales = state
        .api()
        .sales_by_client(&auth.token, ClientId::new(id))
        .await?;

    Ok(VendorClientTemplate {
        user: Some(auth.identity),
        client_id: id,
        sales: sales.iter().map(SaleView::from).collect(),
    })
}

/// Download the vendor sales report as a PDF.
///
/// The PDF is generated upstream; this proxies the bytes with download
/// headers.
#[instrument(skip(state, auth))]
pub async fn report_pdf(
    State(state): State<AppState>,
    RequireVendor(auth): RequireVendor,
) -> Result<Response> {
    let bytes = state.api().sales_report_pdf(&auth.token).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"sales-report.pdf\"",
            ),
        ],
        bytes,
    )
        .into_response())
}
