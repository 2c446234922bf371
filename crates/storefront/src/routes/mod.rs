//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (book listing, `?category=` filter)
//! GET  /books/{id}             - Book detail
//! GET  /about                  - About page
//! GET  /orders                 - Orders page
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! GET  /register               - Register page
//! POST /register               - Register action
//! POST /logout                 - Logout action
//!
//! # Cart (form posts, redirect back)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (product_id, quantity?)
//! POST /cart/increase          - Increase quantity
//! POST /cart/decrease          - Decrease quantity (floor of one)
//! POST /cart/remove            - Remove line
//! POST /cart/clear             - Empty the cart
//! GET  /cart/count             - Cart count badge (HTMX fragment)
//! POST /cart/dialog/{event}    - Quantity dialog: open|increment|decrement|confirm|cancel
//!
//! # Checkout (requires sign-in)
//! GET  /checkout               - Order summary
//!
//! # JSON API
//! GET  /api/cart               - Current cart
//! POST /api/cart               - Dispatch a cart intent
//! ```

pub mod api;
pub mod auth;
pub mod books;
pub mod cart;
pub mod checkout;
pub mod dialog;
pub mod home;
pub mod layout;
pub mod pages;

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
        .route("/increase", post(cart::increase))
        .route("/decrease", post(cart::decrease))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
        .route("/dialog/{event}", post(dialog::handle_event))
}

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/cart", get(api::cart::show).post(api::cart::dispatch))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/books/{id}", get(books::show))
        .route("/about", get(pages::about))
        .route("/orders", get(pages::orders))
        .merge(auth_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", get(checkout::show))
        .nest("/api", api_routes())
}

/// Resolve a user-supplied redirect target to a local path.
///
/// Only absolute paths on this site are accepted; anything else
/// (`https://…`, protocol-relative `//host`, backslash tricks) falls back to
/// `fallback`.
#[must_use]
pub fn local_redirect(target: Option<&str>, fallback: &str) -> String {
    match target.map(str::trim) {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path.to_string()
        }
        _ => fallback.to_string(),
    }
}
