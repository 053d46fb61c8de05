//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself is the pure `electrohub_core::Cart` aggregate; every
//! handler follows the same two-step contract: load the cart from the
//! session, mutate the value, persist it back. A corrupt persisted cart
//! deserializes to the empty cart, silently.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use electrohub_core::{Cart, Identity, LineItem, ProductId};

use crate::error::Result;
use crate::filters;
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::session_keys;
use crate::state::AppState;

// =============================================================================
// Session persistence (load -> mutate -> save)
// =============================================================================

/// Load the cart from the session.
///
/// Missing or unparseable persisted state yields the empty cart; a corrupt
/// payload is discarded so the next save starts clean. Never errors.
pub async fn load_cart(session: &Session) -> Cart {
    match session.get::<Cart>(session_keys::CART).await {
        Ok(Some(cart)) => cart,
        Ok(None) => Cart::new(),
        Err(_) => {
            tracing::warn!("corrupt persisted cart, starting empty");
            let _ = session
                .remove::<serde_json::Value>(session_keys::CART)
                .await;
            Cart::new()
        }
    }
}

/// Persist the cart to the session. Called after every mutation.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_cart(
    session: &Session,
    cart: &Cart,
) -> std::result::Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}

/// The coupon code applied to this session, if any.
async fn load_coupon(session: &Session) -> Option<String> {
    session
        .get::<String>(session_keys::COUPON)
        .await
        .ok()
        .flatten()
}

/// Discount percentage for a coupon code, if the code is recognized.
fn coupon_discount_pct(code: &str) -> Option<u32> {
    match code.trim().to_uppercase().as_str() {
        "DESC10" => Some(10),
        "DESC20" => Some(20),
        _ => None,
    }
}

// =============================================================================
// View models
// =============================================================================

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub line_total: Decimal,
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.as_i32(),
            name: item.name.clone(),
            price: item.price,
            quantity: item.quantity,
            line_total: item.line_total(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: Decimal,
    pub discount_pct: u32,
    pub discount: Decimal,
    pub total: Decimal,
    pub coupon: Option<String>,
    pub item_count: u32,
}

impl CartView {
    /// Build the display model, applying the session coupon if present.
    ///
    /// The subtotal is the cart's derived total; the discount is display
    /// arithmetic only - checkout posts undiscounted lines and pricing
    /// stays upstream's responsibility.
    #[must_use]
    pub fn build(cart: &Cart, coupon: Option<String>) -> Self {
        let subtotal = cart.total();
        let discount_pct = coupon
            .as_deref()
            .and_then(coupon_discount_pct)
            .unwrap_or(0);
        let discount = subtotal * Decimal::from(discount_pct) / Decimal::from(100);
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal,
            discount_pct,
            discount,
            total: subtotal - discount,
            coupon,
            item_count: cart.item_count(),
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data. Name and price are the display snapshot from the
/// product card the visitor clicked; they are never re-synced.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: i32,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: i32,
}

/// Coupon form data.
#[derive(Debug, Deserialize)]
pub struct CouponForm {
    pub code: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub user: Option<Identity>,
    pub cart: CartView,
    pub error: Option<String>,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Query parameters for cart page feedback.
#[derive(Debug, Deserialize)]
pub struct CartMessageQuery {
    pub error: Option<String>,
}

fn cart_error_message(code: &str) -> String {
    match code {
        "coupon" => "That coupon code is not valid".to_string(),
        "checkout" => "Could not complete the purchase. Your cart was kept - please try again".to_string(),
        _ => "Something went wrong".to_string(),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart page.
#[instrument(skip(session, auth))]
pub async fn show(
    session: Session,
    OptionalAuth(auth): OptionalAuth,
    axum::extract::Query(query): axum::extract::Query<CartMessageQuery>,
) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    let coupon = load_coupon(&session).await;

    CartShowTemplate {
        user: auth.map(|a| a.identity),
        cart: CartView::build(&cart, coupon),
        error: query.error.as_deref().map(cart_error_message),
    }
}

/// Add an item to the cart (HTMX).
///
/// A repeat add for the same product accumulates its quantity. Returns the
/// count badge with an HTMX trigger so other fragments refresh.
#[instrument(skip(session))]
pub async fn add(session: Session, Form(form): Form<AddToCartForm>) -> Result<Response> {
    let mut cart = load_cart(&session).await;
    cart.add(
        ProductId::new(form.id),
        form.name,
        form.price,
        form.quantity.unwrap_or(1),
    );
    save_cart(&session, &cart).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.item_count(),
        },
    )
        .into_response())
}

/// Update a cart line's quantity (HTMX).
///
/// A quantity of zero or below removes the line.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<Response> {
    let mut cart = load_cart(&session).await;
    cart.update_quantity(ProductId::new(form.id), form.quantity);
    save_cart(&session, &cart).await?;

    let coupon = load_coupon(&session).await;
    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::build(&cart, coupon),
        },
    )
        .into_response())
}

/// Remove an item from the cart (HTMX).
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Response> {
    let mut cart = load_cart(&session).await;
    cart.remove(ProductId::new(form.id));
    save_cart(&session, &cart).await?;

    let coupon = load_coupon(&session).await;
    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::build(&cart, coupon),
        },
    )
        .into_response())
}

/// Apply a coupon code to the session.
#[instrument(skip(session))]
pub async fn apply_coupon(session: Session, Form(form): Form<CouponForm>) -> Result<Response> {
    let code = form.code.trim().to_uppercase();
    if coupon_discount_pct(&code).is_some() {
        session.insert(session_keys::COUPON, &code).await?;
        Ok(Redirect::to("/cart").into_response())
    } else {
        session
            .remove::<serde_json::Value>(session_keys::COUPON)
            .await?;
        Ok(Redirect::to("/cart?error=coupon").into_response())
    }
}

/// Get the cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    CartCountTemplate {
        count: cart.item_count(),
    }
}

/// Checkout: record one sale per cart line upstream.
///
/// The cart clears only after every sale call succeeds; any failure keeps
/// the cart intact so the visitor can retry.
#[instrument(skip(state, session, auth))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(auth): RequireAuth,
) -> Result<Response> {
    let mut cart = load_cart(&session).await;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    for item in cart.items() {
        let sale = crate::api::SaleInput {
            user_id: auth.identity.id,
            product_id: item.id,
            quantity: item.quantity,
        };
        if let Err(e) = state.api().create_sale(&auth.token, &sale).await {
            tracing::error!(product_id = %item.id, "Checkout sale failed: {e}");
            return Ok(Redirect::to("/cart?error=checkout").into_response());
        }
    }

    cart.clear();
    save_cart(&session, &cart).await?;
    session
        .remove::<serde_json::Value>(session_keys::COUPON)
        .await?;

    Ok(Redirect::to("/dashboard?success=1").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap_or_default()
    }

    #[test]
    fn test_coupon_codes() {
        assert_eq!(coupon_discount_pct("DESC10"), Some(10));
        assert_eq!(coupon_discount_pct("desc20"), Some(20));
        assert_eq!(coupon_discount_pct(" desc10 "), Some(10));
        assert_eq!(coupon_discount_pct("DESC50"), None);
        assert_eq!(coupon_discount_pct(""), None);
    }

    #[test]
    fn test_cart_view_applies_discount() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), "Breadboard", dec("10.00"), 2);

        let view = CartView::build(&cart, Some("DESC10".to_string()));
        assert_eq!(view.subtotal, dec("20.00"));
        assert_eq!(view.discount, dec("2.00"));
        assert_eq!(view.total, dec("18.00"));
        assert_eq!(view.discount_pct, 10);
    }

    #[test]
    fn test_cart_view_without_coupon() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), "Arduino", dec("18.50"), 3);

        let view = CartView::build(&cart, None);
        assert_eq!(view.subtotal, dec("55.50"));
        assert_eq!(view.discount, Decimal::ZERO);
        assert_eq!(view.total, dec("55.50"));
        assert_eq!(view.item_count, 3);
    }

    #[test]
    fn test_unknown_coupon_leaves_total_alone() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), "Sensor", dec("4.00"), 1);

        let view = CartView::build(&cart, Some("BOGUS".to_string()));
        assert_eq!(view.total, view.subtotal);
        assert_eq!(view.discount_pct, 0);
    }
}
