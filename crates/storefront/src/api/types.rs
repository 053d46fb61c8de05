//! Typed payloads for the upstream ElectroHub REST API.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use electrohub_core::{ClientId, Identity, ProductId, SaleId, UserId, VendorId};

// =============================================================================
// Auth
// =============================================================================

/// Credentials sent to the login endpoint.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload for the registration endpoint.
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Successful auth exchange: an opaque bearer token plus the identity.
///
/// The identity's role arrives in whatever label the upstream uses; it is
/// normalized during deserialization (see `electrohub_core::Role`).
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: Identity,
}

// =============================================================================
// Catalog
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub stock: i32,
    /// Discount percentage, when the product is on offer.
    #[serde(default)]
    pub discount: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub vendor_id: Option<VendorId>,
}

/// Fields for creating or updating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub stock: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// =============================================================================
// Sales
// =============================================================================

/// One recorded sale line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub product_id: ProductId,
    pub user_id: UserId,
    pub quantity: u32,
    /// Upstream-owned lifecycle label (e.g. "pendiente", "enviado").
    /// Displayed as-is; the storefront never interprets it.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for recording one sale line at checkout.
#[derive(Debug, Serialize)]
pub struct SaleInput {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Payload for a sale status update.
#[derive(Debug, Serialize)]
pub struct SaleStatusInput {
    pub status: String,
}

// =============================================================================
// Clients & vendors
// =============================================================================

/// A registered client account.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientRecord {
    pub id: ClientId,
    pub name: String,
    pub email: String,
}

/// Per-client aggregate for the vendor dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSummary {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub total_orders: u32,
    #[serde(default)]
    pub total_spent: Option<Decimal>,
}

/// A registered vendor account.
#[derive(Debug, Clone, Deserialize)]
pub struct Vendor {
    pub id: VendorId,
    pub name: String,
    pub email: String,
}

// =============================================================================
// Reports
// =============================================================================

/// Aggregated vendor sales report.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSummary {
    #[serde(default)]
    pub total_sales: u32,
    #[serde(default)]
    pub total_revenue: Option<Decimal>,
    #[serde(default)]
    pub top_products: Vec<TopProduct>,
}

/// One entry in the report's best-sellers list.
#[derive(Debug, Clone, Deserialize)]
pub struct TopProduct {
    pub name: String,
    #[serde(default)]
    pub units_sold: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use electrohub_core::Role;

    #[test]
    fn test_auth_response_normalizes_role() {
        let raw = r#"{
            "token": "opaque-token",
            "user": {"id": 5, "name": "Ana", "email": "ana@example.com", "role": "Vendedor"}
        }"#;
        let auth: AuthResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(auth.user.role, Role::Vendor);
    }

    #[test]
    fn test_product_tolerates_missing_optionals() {
        let raw = r#"{"id": 1, "name": "Arduino Uno", "category": "boards", "price": "18.50", "stock": 12}"#;
        let product: Product = serde_json::from_str(raw).unwrap();
        assert!(product.discount.is_none());
        assert!(product.description.is_none());
        assert!(product.vendor_id.is_none());
        assert_eq!(product.price, "18.50".parse().unwrap());
    }

    #[test]
    fn test_product_discount_parses_from_string() {
        let raw = r#"{"id": 1, "name": "ESP32", "category": "boards", "price": "9.99", "stock": 4, "discount": "15"}"#;
        let product: Product = serde_json::from_str(raw).unwrap();
        assert_eq!(product.discount, Some("15".parse().unwrap()));
    }

    #[test]
    fn test_sale_tolerates_sparse_payload() {
        let raw = r#"{"id": 9, "product_id": 1, "user_id": 5, "quantity": 2}"#;
        let sale: Sale = serde_json::from_str(raw).unwrap();
        assert!(sale.status.is_none());
        assert!(sale.created_at.is_none());
    }
}
