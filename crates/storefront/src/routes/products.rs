//! Product catalog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use electrohub_core::Identity;

use crate::api::Product;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub stock: i32,
    /// Discount percentage, present only when greater than zero.
    pub discount: Option<Decimal>,
    /// Price after the discount. Display only; the cart keeps the listed
    /// price, matching what checkout posts upstream.
    pub discounted_price: Option<Decimal>,
    pub description: Option<String>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        let discount = product.discount.filter(|d| *d > Decimal::ZERO);
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            stock: product.stock,
            discount,
            discounted_price: discount
                .map(|d| product.price * (Decimal::from(100) - d) / Decimal::from(100)),
            description: product.description.clone(),
        }
    }
}

/// Catalog filter query parameters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub user: Option<Identity>,
    pub products: Vec<ProductView>,
    pub categories: Vec<String>,
    pub selected_category: Option<String>,
    pub query: Option<String>,
}

/// Display the product listing page.
///
/// Filtering happens here rather than upstream: the catalog is small and the
/// upstream API only offers the full list.
#[instrument(skip(state, auth))]
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(auth): OptionalAuth,
    Query(query): Query<CatalogQuery>,
) -> impl IntoResponse {
    let products = match state.api().products().await {
        Ok(products) => products,
        Err(e) => {
            tracing::warn!("Failed to fetch products: {e}");
            Vec::new()
        }
    };

    let mut categories: Vec<String> = products.iter().map(|p| p.category.clone()).collect();
    categories.sort();
    categories.dedup();

    let needle = query.q.as_deref().map(str::to_lowercase);
    let filtered: Vec<ProductView> = products
        .iter()
        .filter(|p| {
            query
                .category
                .as_deref()
                .is_none_or(|category| p.category == category)
        })
        .filter(|p| {
            needle
                .as_deref()
                .is_none_or(|needle| p.name.to_lowercase().contains(needle))
        })
        .map(ProductView::from)
        .collect();

    ProductsIndexTemplate {
        user: auth.map(|a| a.identity),
        products: filtered,
        categories,
        selected_category: query.category,
        query: query.q,
    }
}

/// One category section on the offers page.
#[derive(Clone)]
pub struct OfferSection {
    pub category: String,
    pub products: Vec<ProductView>,
}

/// Offers page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/offers.html")]
pub struct OffersTemplate {
    pub user: Option<Identity>,
    pub sections: Vec<OfferSection>,
    pub total_offers: usize,
}

/// Group the discounted products by category, categories sorted by name.
///
/// Products without a positive discount are left out. Within a category the
/// catalog order is kept.
fn group_offers(products: &[Product]) -> Vec<OfferSection> {
    let mut discounted: Vec<&Product> = products
        .iter()
        .filter(|p| p.discount.is_some_and(|d| d > Decimal::ZERO))
        .collect();
    discounted.sort_by(|a, b| a.category.cmp(&b.category));

    let mut sections: Vec<OfferSection> = Vec::new();
    for product in discounted {
        match sections.last_mut() {
            Some(section) if section.category == product.category => {
                section.products.push(ProductView::from(product));
            }
            _ => sections.push(OfferSection {
                category: product.category.clone(),
                products: vec![ProductView::from(product)],
            }),
        }
    }
    sections
}

/// Display the offers page: every product with a discount, by category.
#[instrument(skip(state, auth))]
pub async fn offers(
    State(state): State<AppState>,
    OptionalAuth(auth): OptionalAuth,
) -> impl IntoResponse {
    let products = match state.api().products().await {
        Ok(products) => products,
        Err(e) => {
            tracing::warn!("Failed to fetch products for offers: {e}");
            Vec::new()
        }
    };

    let sections = group_offers(&products);
    let total_offers = sections.iter().map(|s| s.products.len()).sum();

    OffersTemplate {
        user: auth.map(|a| a.identity),
        sections,
        total_offers,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use electrohub_core::ProductId;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn product(id: i32, category: &str, price: &str, discount: Option<&str>) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            category: category.to_string(),
            price: dec(price),
            stock: 10,
            discount: discount.map(dec),
            description: None,
            vendor_id: None,
        }
    }

    #[test]
    fn test_product_view_computes_discounted_price() {
        let view = ProductView::from(&product(1, "boards", "20.00", Some("10")));
        assert_eq!(view.discount, Some(dec("10")));
        assert_eq!(view.discounted_price, Some(dec("18.00")));
        // The listed price stays what the cart will carry.
        assert_eq!(view.price, dec("20.00"));
    }

    #[test]
    fn test_product_view_ignores_non_positive_discount() {
        let view = ProductView::from(&product(1, "boards", "20.00", Some("0")));
        assert!(view.discount.is_none());
        assert!(view.discounted_price.is_none());

        let view = ProductView::from(&product(1, "boards", "20.00", None));
        assert!(view.discounted_price.is_none());
    }

    #[test]
    fn test_group_offers_filters_and_groups_by_category() {
        let products = vec![
            product(1, "sensors", "4.00", Some("10")),
            product(2, "boards", "18.50", None),
            product(3, "boards", "9.99", Some("15")),
            product(4, "sensors", "6.00", Some("20")),
            product(5, "cables", "2.00", Some("0")),
        ];

        let sections = group_offers(&products);
        let categories: Vec<&str> = sections.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(categories, vec!["boards", "sensors"]);
        assert_eq!(sections[0].products.len(), 1);
        assert_eq!(sections[1].products.len(), 2);
        assert_eq!(sections[1].products[0].id, 1);
    }

    #[test]
    fn test_group_offers_empty_without_discounts() {
        let products = vec![product(1, "boards", "18.50", None)];
        assert!(group_offers(&products).is_empty());
    }
}
