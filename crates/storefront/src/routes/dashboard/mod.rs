//! Role-scoped dashboard route handlers.
//!
//! Three dashboards, one per role, each behind its own extractor:
//! - `customer` - order history for the logged-in client
//! - `vendor` - own products, sales, clients, and reports
//! - `admin` - vendors, clients, and product administration

pub mod admin;
pub mod customer;
pub mod vendor;

use rust_decimal::Decimal;

use crate::api::Sale;

/// Sale display data shared by the customer and vendor dashboards.
#[derive(Clone)]
pub struct SaleView {
    pub id: i32,
    pub product_name: String,
    pub quantity: u32,
    pub status: String,
    pub total: Option<Decimal>,
    pub placed_at: Option<String>,
}

impl From<&Sale> for SaleView {
    fn from(sale: &Sale) -> Self {
        Self {
            id: sale.id.as_i32(),
            product_name: sale
                .product_name
                .clone()
                .unwrap_or_else(|| format!("Product #{}", sale.product_id)),
            quantity: sale.quantity,
            status: sale.status.clone().unwrap_or_else(|| "pending".to_string()),
            total: sale.total,
            placed_at: sale.created_at.map(|ts| ts.format("%Y-%m-%d").to_string()),
        }
    }
}
