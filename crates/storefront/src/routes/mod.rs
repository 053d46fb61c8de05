//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /products               - Product listing (category filter + search)
//! GET  /offers                 - Discounted products grouped by category
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (returns count badge, triggers cart-updated)
//! POST /cart/update            - Update quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! POST /cart/coupon            - Apply a coupon code
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! POST /checkout               - One sale per cart line, then clear
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Dashboards (role-gated)
//! GET  /dashboard              - Customer order history
//! GET  /dashboard/admin        - Admin: vendors, clients, product admin
//! POST /dashboard/admin/products          - Create product
//! POST /dashboard/admin/products/{id}     - Update product
//! POST /dashboard/admin/products/{id}/delete - Delete product
//! GET  /dashboard/vendor       - Vendor: products, sales, clients, reports
//! POST /dashboard/vendor/products         - Create product
//! POST /dashboard/vendor/products/{id}    - Update product
//! POST /dashboard/vendor/products/{id}/delete - Delete product
//! POST /dashboard/vendor/sales/{id}/status    - Update sale status
//! GET  /dashboard/vendor/clients/{id}     - Sales for one client
//! GET  /dashboard/vendor/report.pdf       - Sales report PDF download
//! ```

pub mod auth;
pub mod cart;
pub mod dashboard;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/coupon", post(cart::apply_coupon))
        .route("/count", get(cart::count))
}

/// Create the dashboard routes router.
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::customer::index))
        .route("/admin", get(dashboard::admin::index))
        .route("/admin/products", post(dashboard::admin::create_product))
        .route("/admin/products/{id}", post(dashboard::admin::update_product))
        .route(
            "/admin/products/{id}/delete",
            post(dashboard::admin::delete_product),
        )
        .route("/vendor", get(dashboard::vendor::index))
        .route("/vendor/products", post(dashboard::vendor::create_product))
        .route(
            "/vendor/products/{id}",
            post(dashboard::vendor::update_product),
        )
        .route(
            "/vendor/products/{id}/delete",
            post(dashboard::vendor::delete_product),
        )
        .route(
            "/vendor/sales/{id}/status",
            post(dashboard::vendor::update_sale_status),
        )
        .route("/vendor/clients/{id}", get(dashboard::vendor::client_sales))
        .route("/vendor/report.pdf", get(dashboard::vendor::report_pdf))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalog
        .route("/products", get(products::index))
        .route("/offers", get(products::offers))
        // Cart
        .nest("/cart", cart_routes())
        // Checkout
        .route("/checkout", post(cart::checkout))
        // Auth
        .nest("/auth", auth_routes())
        // Dashboards
        .nest("/dashboard", dashboard_routes())
}
