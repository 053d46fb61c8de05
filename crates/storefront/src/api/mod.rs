//! Upstream ElectroHub REST API client.
//!
//! All business logic (pricing, inventory, order lifecycle, reports,
//! authentication) lives in the upstream service; this client is the only
//! path to it. Authentication is a bearer token obtained from the login
//! endpoint and carried in the user's session, so every authenticated call
//! takes the token explicitly.
//!
//! # Example
//!
//! ```rust,ignore
//! use electrohub_storefront::api::ApiClient;
//!
//! let api = ApiClient::new(&config.api);
//!
//! // Public catalog
//! let products = api.products().await?;
//!
//! // Authenticated call
//! let auth = api.login("ana@example.com", "secret").await?;
//! let sales = api.sales(&auth.token).await?;
//! ```

pub mod types;

pub use types::*;

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

use electrohub_core::{ClientId, ProductId, SaleId};

use crate::config::ApiConfig;

/// Errors that can occur when talking to the upstream API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be parsed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found upstream.
    #[error("not found: {0}")]
    NotFound(String),

    /// The bearer token was missing, expired, or insufficient.
    #[error("unauthorized")]
    Unauthorized,

    /// Any other non-success upstream response.
    #[error("upstream error ({status}): {message}")]
    Upstream {
        /// HTTP status code returned upstream.
        status: u16,
        /// Human-readable message extracted from the response body.
        message: String,
    },
}

/// Client for the upstream ElectroHub REST API.
///
/// Cheaply cloneable; the `reqwest::Client` and endpoint are shared via `Arc`.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client.
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
            }),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Issue a request and decode the JSON response.
    async fn request<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let mut request = self.inner.client.request(method, self.endpoint(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_string()));
        }

        // Read the body as text first for better error diagnostics.
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                message: extract_message(&text),
            });
        }

        debug!(path, status = status.as_u16(), "upstream response");
        Ok(serde_json::from_str(&text)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T, ApiError> {
        self.request::<(), T>(Method::GET, path, token, None).await
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Exchange credentials for a token and identity.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.request(Method::POST, "/api/auth/login", None, Some(&body))
            .await
    }

    /// Register a new account; the upstream logs the user straight in.
    #[instrument(skip(self, request))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.request(Method::POST, "/api/auth/register", None, Some(&request))
            .await
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Full public product catalog.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        self.get("/api/products", None).await
    }

    /// Products owned by the authenticated vendor.
    #[instrument(skip(self, token))]
    pub async fn my_products(&self, token: &str) -> Result<Vec<Product>, ApiError> {
        self.get("/api/products/my-products", Some(token)).await
    }

    /// Create a product (vendor or admin).
    #[instrument(skip(self, token, product))]
    pub async fn create_product(
        &self,
        token: &str,
        product: &ProductInput,
    ) -> Result<Product, ApiError> {
        self.request(Method::POST, "/api/products", Some(token), Some(&product))
            .await
    }

    /// Update a product (vendor or admin).
    #[instrument(skip(self, token, product))]
    pub async fn update_product(
        &self,
        token: &str,
        id: ProductId,
        product: &ProductInput,
    ) -> Result<Product, ApiError> {
        self.request(
            Method::PUT,
            &format!("/api/products/{id}"),
            Some(token),
            Some(&product),
        )
        .await
    }

    /// Delete a product (vendor or admin).
    #[instrument(skip(self, token))]
    pub async fn delete_product(&self, token: &str, id: ProductId) -> Result<(), ApiError> {
        // The upstream replies with a JSON acknowledgement we don't need.
        let _: serde_json::Value = self
            .request::<(), _>(Method::DELETE, &format!("/api/products/{id}"), Some(token), None)
            .await?;
        Ok(())
    }

    // =========================================================================
    // Sales
    // =========================================================================

    /// Sales visible to the authenticated user (own orders for clients,
    /// own product sales for vendors).
    #[instrument(skip(self, token))]
    pub async fn sales(&self, token: &str) -> Result<Vec<Sale>, ApiError> {
        self.get("/api/sales", Some(token)).await
    }

    /// Record one sale line. Checkout posts one of these per cart line.
    #[instrument(skip(self, token))]
    pub async fn create_sale(&self, token: &str, sale: &SaleInput) -> Result<Sale, ApiError> {
        self.request(Method::POST, "/api/sales", Some(token), Some(&sale))
            .await
    }

    /// Update the status of a sale (vendor).
    #[instrument(skip(self, token))]
    pub async fn update_sale_status(
        &self,
        token: &str,
        id: SaleId,
        status: &str,
    ) -> Result<Sale, ApiError> {
        let body = SaleStatusInput {
            status: status.to_string(),
        };
        self.request(
            Method::PUT,
            &format!("/api/sales/{id}/status"),
            Some(token),
            Some(&body),
        )
        .await
    }

    /// Sales for one client of the authenticated vendor.
    #[instrument(skip(self, token))]
    pub async fn sales_by_client(
        &self,
        token: &str,
        client_id: ClientId,
    ) -> Result<Vec<Sale>, ApiError> {
        self.get(&format!("/api/sales/by-client/{client_id}"), Some(token))
            .await
    }

    // =========================================================================
    // Clients & vendors
    // =========================================================================

    /// All registered clients (admin).
    #[instrument(skip(self, token))]
    pub async fn clients(&self, token: &str) -> Result<Vec<ClientRecord>, ApiError> {
        self.get("/api/clients", Some(token)).await
    }

    /// Per-client order/spend summaries (vendor).
    #[instrument(skip(self, token))]
    pub async fn client_summaries(&self, token: &str) -> Result<Vec<ClientSummary>, ApiError> {
        self.get("/api/clients/summary", Some(token)).await
    }

    /// All registered vendors (admin).
    #[instrument(skip(self, token))]
    pub async fn vendors(&self, token: &str) -> Result<Vec<Vendor>, ApiError> {
        self.get("/api/vendors", Some(token)).await
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// Aggregated sales report for the authenticated vendor.
    #[instrument(skip(self, token))]
    pub async fn report_summary(&self, token: &str) -> Result<ReportSummary, ApiError> {
        self.get("/api/reports/summary", Some(token)).await
    }

    /// The vendor sales report as a rendered PDF.
    ///
    /// Report generation happens upstream; this just streams the bytes
    /// through so the dashboard can offer a download.
    #[instrument(skip(self, token))]
    pub async fn sales_report_pdf(&self, token: &str) -> Result<Vec<u8>, ApiError> {
        let response = self
            .inner
            .client
            .get(self.endpoint("/api/reports/sales-pdf"))
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                message: extract_message(&text),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Pull a human-readable message out of an upstream error body.
///
/// The upstream usually replies with `{"message": "..."}`; fall back to the
/// raw body, or the bare status, when it doesn't.
fn extract_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct UpstreamMessage {
        message: String,
    }

    serde_json::from_str::<UpstreamMessage>(body)
        .map(|m| m.message)
        .unwrap_or_else(|_| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "no response body".to_string()
            } else {
                trimmed.to_string()
            }
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message_from_json() {
        assert_eq!(
            extract_message(r#"{"message": "Producto no encontrado"}"#),
            "Producto no encontrado"
        );
    }

    #[test]
    fn test_extract_message_fallbacks() {
        assert_eq!(extract_message("plain text error"), "plain text error");
        assert_eq!(extract_message("   "), "no response body");
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = ApiConfig {
            base_url: url::Url::parse("https://api.electrohub.test/").unwrap(),
        };
        let client = ApiClient::new(&config);
        assert_eq!(
            client.endpoint("/api/products"),
            "https://api.electrohub.test/api/products"
        );
    }
}
