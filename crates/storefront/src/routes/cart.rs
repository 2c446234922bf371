//! Cart route handlers.
//!
//! Every intent is a plain form post that goes through the session's
//! [`SessionCart`] and then redirects back (post/redirect/get). The cart count
//! badge in the header is an HTMX fragment.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use bookstore_core::{
    Cart, CartAction, CartChange, Catalog, CurrencyCode, Price, ProductId, Quantity,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::dialog::DialogView;
use super::layout::{Layout, LayoutContext};
use super::local_redirect;
use crate::error::{AppError, Result};
use crate::filters;
use crate::services::{SessionCart, load_dialog, read_cart, resolve_product};
use crate::state::AppState;

// =============================================================================
// View Models
// =============================================================================

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub category: String,
    pub cover_image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    /// Decrease is disabled at quantity one.
    pub at_minimum: bool,
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    /// Build the view from the current cart. The subtotal is rounded to two
    /// decimals here and nowhere else.
    #[must_use]
    pub fn new(cart: &Cart, currency: CurrencyCode) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CartItemView {
                    id: item.product_id.to_string(),
                    title: item.title.clone(),
                    category: item.category.clone(),
                    cover_image: item.cover_image.clone(),
                    quantity: item.quantity.get(),
                    price: item.unit_price.display(),
                    line_price: item.line_total().display(),
                    at_minimum: item.quantity == Quantity::ONE,
                })
                .collect(),
            subtotal: Price::new(cart.subtotal(), currency).display(),
            item_count: cart.total_quantity(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Intents
// =============================================================================

/// A cart intent as received from a form or the JSON API.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartIntent {
    AddToCart {
        product_id: String,
        quantity: Option<i64>,
    },
    RemoveFromCart {
        product_id: String,
    },
    IncreaseQuantity {
        product_id: String,
    },
    DecreaseQuantity {
        product_id: String,
    },
    ClearCart,
}

impl CartIntent {
    /// Validate the intent into a cart action.
    ///
    /// Adds look the product up in the catalog and snapshot it; a missing
    /// quantity means one, and quantities below one are clamped to one.
    /// Other intents only need a well-formed id, so lines for books that
    /// have since left the catalog can still be edited.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for malformed ids and `NotFound` for adds of
    /// unknown books.
    pub fn resolve(self, catalog: &Catalog) -> Result<CartAction> {
        let action = match self {
            Self::AddToCart {
                product_id,
                quantity,
            } => CartAction::Add {
                product: resolve_product(catalog, &product_id)?.clone(),
                quantity: Quantity::clamped(quantity.unwrap_or(1)),
            },
            Self::RemoveFromCart { product_id } => CartAction::Remove(parse_id(&product_id)?),
            Self::IncreaseQuantity { product_id } => {
                CartAction::Increase(parse_id(&product_id)?)
            }
            Self::DecreaseQuantity { product_id } => {
                CartAction::Decrease(parse_id(&product_id)?)
            }
            Self::ClearCart => CartAction::Clear,
        };
        Ok(action)
    }
}

fn parse_id(raw: &str) -> Result<ProductId> {
    ProductId::parse(raw.trim()).map_err(|e| AppError::BadRequest(format!("product_id: {e}")))
}

/// Resolve and apply `intent` to the session's cart, returning the change
/// and the resulting cart.
///
/// # Errors
///
/// Returns an error if the intent is invalid or the session store fails.
pub async fn apply_intent(
    state: &AppState,
    session: Session,
    intent: CartIntent,
) -> Result<(CartChange, Cart)> {
    let action = intent.resolve(state.catalog())?;
    let action_name = action.name();

    let mut cart = SessionCart::load(session).await?;
    let change = cart.dispatch(action);
    let cart = cart.save().await?;

    tracing::info!(
        action = action_name,
        change = change.kind(),
        lines = cart.len(),
        "Cart intent applied"
    );
    Ok((change, cart))
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub quantity: Option<i64>,
    pub return_to: Option<String>,
}

/// Single-line intent form data (increase, decrease, remove).
#[derive(Debug, Deserialize)]
pub struct LineForm {
    pub product_id: String,
    pub return_to: Option<String>,
}

/// Clear cart form data.
#[derive(Debug, Deserialize)]
pub struct ClearForm {
    pub return_to: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub layout: Layout,
    pub cart: CartView,
    pub dialog: Option<DialogView>,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(state, session, page))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    page: LayoutContext,
) -> Result<CartShowTemplate> {
    let cart = read_cart(&session).await?;
    let dialog = load_dialog(&session).await?;

    Ok(CartShowTemplate {
        layout: page.render().await,
        cart: CartView::new(&cart, state.catalog().currency()),
        dialog: DialogView::new(&dialog, state.catalog(), "/cart"),
    })
}

/// Add a book to the cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let intent = CartIntent::AddToCart {
        product_id: form.product_id,
        quantity: form.quantity,
    };
    let (change, _) = apply_intent(&state, session, intent).await?;
    Ok(back_to(form.return_to.as_deref(), &change))
}

/// Increase a line's quantity by one.
#[instrument(skip(state, session))]
pub async fn increase(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LineForm>,
) -> Result<Response> {
    let intent = CartIntent::IncreaseQuantity {
        product_id: form.product_id,
    };
    let (change, _) = apply_intent(&state, session, intent).await?;
    Ok(back_to(form.return_to.as_deref(), &change))
}

/// Decrease a line's quantity by one, never below one.
#[instrument(skip(state, session))]
pub async fn decrease(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LineForm>,
) -> Result<Response> {
    let intent = CartIntent::DecreaseQuantity {
        product_id: form.product_id,
    };
    let (change, _) = apply_intent(&state, session, intent).await?;
    Ok(back_to(form.return_to.as_deref(), &change))
}

/// Remove a line from the cart.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LineForm>,
) -> Result<Response> {
    let intent = CartIntent::RemoveFromCart {
        product_id: form.product_id,
    };
    let (change, _) = apply_intent(&state, session, intent).await?;
    Ok(back_to(form.return_to.as_deref(), &change))
}

/// Empty the cart.
#[instrument(skip(state, session))]
pub async fn clear(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ClearForm>,
) -> Result<Response> {
    let (change, _) = apply_intent(&state, session, CartIntent::ClearCart).await?;
    Ok(back_to(form.return_to.as_deref(), &change))
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<CartCountTemplate> {
    let cart = read_cart(&session).await?;
    Ok(CartCountTemplate {
        count: cart.total_quantity(),
    })
}

/// Response header that makes HTMX refresh the cart count badge.
pub const CART_UPDATED: (&str, &str) = ("HX-Trigger", "cart-updated");

fn back_to(return_to: Option<&str>, change: &CartChange) -> Response {
    let redirect = Redirect::to(&local_redirect(return_to, "/cart"));
    if change.is_mutation() {
        ([CART_UPDATED], redirect).into_response()
    } else {
        redirect.into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::{StatusCode, header};
    use bookstore_core::{CartStore, Catalog, Unchanged};
    use tower_sessions::MemoryStore;

    use super::*;
    use crate::config::StorefrontConfig;

    const CATALOG: &str = r#"{"currency": "USD", "books": [
        {"id": "a", "title": "Alpha", "category": "fiction", "price": "5.00"},
        {"id": "b", "title": "Beta", "category": "horror", "price": "3.50"}
    ]}"#;

    fn catalog() -> Catalog {
        Catalog::from_json(CATALOG).unwrap()
    }

    fn state() -> AppState {
        let config =
            StorefrontConfig::from_lookup(|key| {
                (key == "STOREFRONT_BASE_URL").then(|| "http://localhost:3000".to_string())
            })
            .unwrap();
        AppState::new(config, catalog())
    }

    fn add(id: &str, quantity: Option<i64>) -> CartIntent {
        CartIntent::AddToCart {
            product_id: id.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_cart_view_formats_subtotal() {
        let catalog = catalog();
        let mut store = CartStore::new();
        store.dispatch(add("a", Some(2)).resolve(&catalog).unwrap());
        store.dispatch(add("b", None).resolve(&catalog).unwrap());

        let view = CartView::new(store.cart(), catalog.currency());
        assert_eq!(view.subtotal, "$13.50");
        assert_eq!(view.item_count, 3);

        let first = view.items.first().unwrap();
        assert_eq!(first.line_price, "$10.00");
        assert_eq!(first.price, "$5.00");
        assert!(!first.at_minimum);
        assert!(view.items.get(1).unwrap().at_minimum);
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::new(&Cart::default(), CurrencyCode::USD);
        assert!(view.is_empty());
        assert_eq!(view.subtotal, "$0.00");
    }

    #[test]
    fn test_resolve_clamps_quantity() {
        let catalog = catalog();
        for raw in [Some(0), Some(-3), None] {
            match add("a", raw).resolve(&catalog).unwrap() {
                CartAction::Add { quantity, .. } => assert_eq!(quantity, Quantity::ONE),
                other => panic!("unexpected action {other:?}"),
            }
        }
    }

    #[test]
    fn test_resolve_rejects_bad_ids() {
        let catalog = catalog();
        assert!(matches!(
            add("zzz", None).resolve(&catalog),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            CartIntent::RemoveFromCart {
                product_id: "a/b".to_string()
            }
            .resolve(&catalog),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            CartIntent::DecreaseQuantity {
                product_id: "not-in-catalog".to_string()
            }
            .resolve(&catalog),
            Ok(CartAction::Decrease(_))
        ));
    }

    #[test]
    fn test_intent_json_shape() {
        let intent: CartIntent =
            serde_json::from_str(r#"{"type": "add_to_cart", "product_id": "a", "quantity": 2}"#)
                .unwrap();
        assert!(matches!(intent, CartIntent::AddToCart { quantity: Some(2), .. }));

        let intent: CartIntent = serde_json::from_str(r#"{"type": "clear_cart"}"#).unwrap();
        assert!(matches!(intent, CartIntent::ClearCart));
    }

    #[tokio::test]
    async fn test_apply_intent_replaces_quantity() {
        let state = state();
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);

        apply_intent(&state, session.clone(), add("a", Some(1)))
            .await
            .unwrap();
        let (change, cart) = apply_intent(&state, session, add("a", Some(3)))
            .await
            .unwrap();

        assert_eq!(change.kind(), "quantity_replaced");
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_back_to_signals_cart_update() {
        let inserted = CartChange::Inserted {
            quantity: Quantity::ONE,
        };
        let response = back_to(Some("/books/a"), &inserted);
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/books/a");
        assert_eq!(response.headers()["hx-trigger"], "cart-updated");

        let response = back_to(
            Some("https://evil.example"),
            &CartChange::Unchanged(Unchanged::AlreadyEmpty),
        );
        assert_eq!(response.headers()[header::LOCATION], "/cart");
        assert!(response.headers().get("hx-trigger").is_none());
    }
}
