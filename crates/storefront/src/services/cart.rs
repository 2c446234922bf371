//! Session-scoped cart store.
//!
//! Each browser session owns one cart. A request loads it into a
//! [`CartStore`], dispatches intents through the store, and writes the result
//! back. Handlers never edit line items directly.

use bookstore_core::{Cart, CartAction, CartChange, CartStore, Catalog, ProductId, ProductRef};
use tower_sessions::{Session, session};

use crate::error::{AppError, add_breadcrumb};
use crate::models::session_keys;

/// A session's cart, checked out for the duration of one request.
#[derive(Debug)]
pub struct SessionCart {
    session: Session,
    store: CartStore,
    dirty: bool,
}

impl SessionCart {
    /// Load the cart stored in `session`, or an empty one.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn load(session: Session) -> Result<Self, session::Error> {
        let cart = read_cart(&session).await?;
        let mut store = CartStore::from_cart(cart);
        store.subscribe(log_transition);

        Ok(Self {
            session,
            store,
            dirty: false,
        })
    }

    /// Read access to the current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        self.store.cart()
    }

    /// Apply an action through the store.
    pub fn dispatch(&mut self, action: CartAction) -> CartChange {
        let name = action.name();
        let change = self.store.dispatch(action);
        if change.is_mutation() {
            self.dirty = true;
            add_breadcrumb("cart", name, &[]);
        }
        change
    }

    /// Persist the cart if any dispatch changed it, returning the final cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be written.
    pub async fn save(self) -> Result<Cart, session::Error> {
        let cart = self.store.into_cart();
        if self.dirty {
            self.session.insert(session_keys::CART, &cart).await?;
        }
        Ok(cart)
    }
}

/// Read the session's cart without taking the writer role.
///
/// A stored cart that no longer deserializes (e.g. a catalog id format
/// change) is discarded and treated as empty.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn read_cart(session: &Session) -> Result<Cart, session::Error> {
    match session.get::<Cart>(session_keys::CART).await {
        Ok(cart) => Ok(cart.unwrap_or_default()),
        Err(session::Error::SerdeJson(e)) => {
            tracing::warn!(error = %e, "Discarding unreadable cart from session");
            Ok(Cart::default())
        }
        Err(e) => Err(e),
    }
}

/// Resolve a raw product id from a request against the catalog.
///
/// # Errors
///
/// Returns `BadRequest` for a malformed id and `NotFound` for an unknown one.
pub fn resolve_product<'a>(catalog: &'a Catalog, raw_id: &str) -> Result<&'a ProductRef, AppError> {
    let id = ProductId::parse(raw_id.trim())
        .map_err(|e| AppError::BadRequest(format!("product_id: {e}")))?;
    catalog
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("book {id}")))
}

fn log_transition(cart: &Cart, change: &CartChange) {
    tracing::debug!(
        lines = cart.len(),
        units = cart.total_quantity(),
        subtotal = %cart.subtotal(),
        ?change,
        "cart transition"
    );
}
