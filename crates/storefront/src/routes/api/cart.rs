//! Cart JSON API.
//!
//! `GET /api/cart` returns the session's cart for the checkout flow;
//! `POST /api/cart` dispatches one intent, using the same
//! `{"type": "add_to_cart", ...}` shape as the form handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use bookstore_core::{Cart, CartChange, CurrencyCode, Price};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use super::ApiError;
use crate::routes::cart::{CartIntent, apply_intent};
use crate::services::read_cart;
use crate::state::AppState;

/// One cart line. Amounts are exact decimal strings.
#[derive(Debug, Serialize)]
pub struct CartLineResponse {
    pub product_id: String,
    pub title: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

/// The session's cart.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub currency: &'static str,
    pub items: Vec<CartLineResponse>,
    pub item_count: u64,
    /// Exact sum of the line totals.
    pub subtotal: String,
    /// Subtotal rounded to two decimals with the currency symbol.
    pub subtotal_display: String,
}

impl CartResponse {
    #[must_use]
    pub fn new(cart: &Cart, currency: CurrencyCode) -> Self {
        let subtotal = cart.subtotal();
        Self {
            currency: currency.code(),
            items: cart
                .items()
                .iter()
                .map(|item| CartLineResponse {
                    product_id: item.product_id.to_string(),
                    title: item.title.clone(),
                    quantity: item.quantity.get(),
                    unit_price: item.unit_price.amount.to_string(),
                    line_total: item.line_total().amount.to_string(),
                })
                .collect(),
            item_count: cart.total_quantity(),
            subtotal: subtotal.to_string(),
            subtotal_display: Price::new(subtotal, currency).display(),
        }
    }
}

/// Result of dispatching an intent.
#[derive(Debug, Serialize)]
pub struct DispatchResponse {
    /// What the store did, e.g. `inserted` or `unchanged`.
    pub change: &'static str,
    pub changed: bool,
    pub cart: CartResponse,
}

impl DispatchResponse {
    fn new(change: &CartChange, cart: &Cart, currency: CurrencyCode) -> Self {
        Self {
            change: change.kind(),
            changed: change.is_mutation(),
            cart: CartResponse::new(cart, currency),
        }
    }
}

/// Get the session's cart.
///
/// GET /api/cart
///
/// # Errors
///
/// Returns `ApiError` if the session store fails.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<CartResponse>, ApiError> {
    let cart = read_cart(&session).await?;
    Ok(Json(CartResponse::new(&cart, state.catalog().currency())))
}

/// Dispatch a cart intent.
///
/// POST /api/cart
///
/// # Errors
///
/// Returns `ApiError` for malformed bodies, invalid or unknown product ids,
/// and session store failures.
#[instrument(skip_all)]
pub async fn dispatch(
    State(state): State<AppState>,
    session: Session,
    body: Result<Json<CartIntent>, JsonRejection>,
) -> Result<Json<DispatchResponse>, ApiError> {
    let Json(intent) = body.map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.body_text()))?;

    let (change, cart) = apply_intent(&state, session, intent).await?;
    Ok(Json(DispatchResponse::new(
        &change,
        &cart,
        state.catalog().currency(),
    )))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bookstore_core::{CartStore, Catalog, Quantity};

    use super::*;

    #[test]
    fn test_cart_response_keeps_exact_subtotal() {
        let catalog = Catalog::from_json(
            r#"{"books": [{"id": "a", "title": "Alpha", "category": "fiction", "price": "0.335"}]}"#,
        )
        .unwrap();
        let mut store = CartStore::new();
        let change = store.add_to_cart(
            catalog.iter().next().unwrap().clone(),
            Quantity::new(3).unwrap(),
        );

        let response = DispatchResponse::new(&change, store.cart(), catalog.currency());
        assert_eq!(response.change, "inserted");
        assert!(response.changed);
        assert_eq!(response.cart.currency, "USD");
        assert_eq!(response.cart.subtotal, "1.005");
        assert_eq!(response.cart.subtotal_display, "$1.01");
        assert_eq!(response.cart.items.first().unwrap().quantity, 3);
    }
}
