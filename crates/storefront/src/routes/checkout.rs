//! Checkout route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use super::cart::CartView;
use super::layout::{Layout, LayoutContext};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentCustomer;
use crate::services::read_cart;
use crate::state::AppState;

/// Checkout summary template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    pub layout: Layout,
    pub customer: CurrentCustomer,
    pub cart: CartView,
}

/// Display the read-only order summary. Requires a signed-in customer; an
/// empty cart sends the customer back to the cart page.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    session: Session,
    page: LayoutContext,
) -> Result<Response> {
    let cart = read_cart(&session).await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    Ok(CheckoutTemplate {
        layout: page.render().await,
        customer,
        cart: CartView::new(&cart, state.catalog().currency()),
    }
    .into_response())
}
