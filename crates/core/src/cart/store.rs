//! The cart store: single writer, synchronous subscribers.

use core::fmt;

use super::line_item::{Cart, CartLineItem};
use crate::types::{ProductId, ProductRef, Quantity};

/// A mutation request against the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Insert `product`, or replace the quantity of its existing line.
    Add {
        product: ProductRef,
        quantity: Quantity,
    },
    Remove(ProductId),
    Increase(ProductId),
    /// Decrease by one; never goes below one.
    Decrease(ProductId),
    Clear,
}

impl CartAction {
    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add_to_cart",
            Self::Remove(_) => "remove_from_cart",
            Self::Increase(_) => "increase_quantity",
            Self::Decrease(_) => "decrease_quantity",
            Self::Clear => "clear_cart",
        }
    }
}

/// Why a dispatched action left the cart as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unchanged {
    /// The product has no line in the cart.
    NotInCart,
    /// Decrease requested at quantity one.
    AtMinimumQuantity,
    /// Increase requested at [`Quantity::MAX`].
    AtMaximumQuantity,
    /// Add requested with the quantity the line already has.
    SameQuantity,
    /// Clear requested on an empty cart.
    AlreadyEmpty,
}

/// What a dispatched action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    Inserted {
        quantity: Quantity,
    },
    QuantityReplaced {
        previous: Quantity,
        current: Quantity,
    },
    Increased {
        current: Quantity,
    },
    Decreased {
        current: Quantity,
    },
    Removed,
    Cleared {
        removed: usize,
    },
    Unchanged(Unchanged),
}

impl CartChange {
    /// Whether the cart differs from before the dispatch.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        !matches!(self, Self::Unchanged(_))
    }

    /// Stable snake_case name, used in API responses.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Inserted { .. } => "inserted",
            Self::QuantityReplaced { .. } => "quantity_replaced",
            Self::Increased { .. } => "increased",
            Self::Decreased { .. } => "decreased",
            Self::Removed => "removed",
            Self::Cleared { .. } => "cleared",
            Self::Unchanged(_) => "unchanged",
        }
    }
}

impl Cart {
    /// Apply `action` to the cart. Total: every action has a defined outcome.
    pub(crate) fn apply(&mut self, action: CartAction) -> CartChange {
        match action {
            CartAction::Add { product, quantity } => match self.get_mut(product.id()) {
                Some(item) if item.quantity == quantity => {
                    CartChange::Unchanged(Unchanged::SameQuantity)
                }
                Some(item) => {
                    let previous = item.quantity;
                    item.quantity = quantity;
                    CartChange::QuantityReplaced {
                        previous,
                        current: quantity,
                    }
                }
                None => {
                    self.push(CartLineItem::from_product(&product, quantity));
                    CartChange::Inserted { quantity }
                }
            },
            CartAction::Remove(product_id) => match self.remove(&product_id) {
                Some(_) => CartChange::Removed,
                None => CartChange::Unchanged(Unchanged::NotInCart),
            },
            CartAction::Increase(product_id) => match self.get_mut(&product_id) {
                Some(item) if item.quantity == Quantity::MAX => {
                    CartChange::Unchanged(Unchanged::AtMaximumQuantity)
                }
                Some(item) => {
                    item.quantity = item.quantity.increment();
                    CartChange::Increased {
                        current: item.quantity,
                    }
                }
                None => CartChange::Unchanged(Unchanged::NotInCart),
            },
            CartAction::Decrease(product_id) => match self.get_mut(&product_id) {
                Some(item) => match item.quantity.decrement() {
                    Some(current) => {
                        item.quantity = current;
                        CartChange::Decreased { current }
                    }
                    None => CartChange::Unchanged(Unchanged::AtMinimumQuantity),
                },
                None => CartChange::Unchanged(Unchanged::NotInCart),
            },
            CartAction::Clear => match self.clear() {
                0 => CartChange::Unchanged(Unchanged::AlreadyEmpty),
                removed => CartChange::Cleared { removed },
            },
        }
    }
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Cart, &CartChange) + Send>;

/// Owns a [`Cart`] and is the only component allowed to change it.
///
/// Every dispatch runs to completion and then calls each subscriber, in
/// subscription order, with the new cart and the [`CartChange`] that was
/// applied. Subscribers are notified for no-op dispatches too.
///
/// # Example
///
/// ```
/// use bookstore_core::{CartStore, Quantity};
/// # use bookstore_core::{CurrencyCode, ProductPayload};
/// # let product = ProductPayload {
/// #     id: "book-1".into(), title: "Dune".into(), category: "sci-fi".into(),
/// #     price: "5.00".parse().unwrap(), old_price: None, cover_image: String::new(),
/// #     description: String::new(), trending: false,
/// # }.validate(CurrencyCode::USD).unwrap();
///
/// let mut store = CartStore::new();
/// store.add_to_cart(product.clone(), Quantity::new(2).unwrap());
/// store.decrease_quantity(product.id());
/// store.decrease_quantity(product.id());
///
/// assert_eq!(store.cart().get(product.id()).unwrap().quantity, Quantity::ONE);
/// ```
#[derive(Default)]
pub struct CartStore {
    cart: Cart,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl CartStore {
    /// A store holding an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store taking ownership of an existing cart.
    #[must_use]
    pub fn from_cart(cart: Cart) -> Self {
        Self {
            cart,
            ..Self::default()
        }
    }

    /// Read access to the current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Release the cart, dropping all subscribers.
    #[must_use]
    pub fn into_cart(self) -> Cart {
        self.cart
    }

    /// Register a callback invoked after every dispatch.
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&Cart, &CartChange) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscriber. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    /// Apply `action`, then notify subscribers.
    pub fn dispatch(&mut self, action: CartAction) -> CartChange {
        let change = self.cart.apply(action);
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&self.cart, &change);
        }
        change
    }

    /// Add `product`, or replace the quantity of its existing line.
    pub fn add_to_cart(&mut self, product: ProductRef, quantity: Quantity) -> CartChange {
        self.dispatch(CartAction::Add { product, quantity })
    }

    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> CartChange {
        self.dispatch(CartAction::Remove(product_id.clone()))
    }

    pub fn increase_quantity(&mut self, product_id: &ProductId) -> CartChange {
        self.dispatch(CartAction::Increase(product_id.clone()))
    }

    pub fn decrease_quantity(&mut self, product_id: &ProductId) -> CartChange {
        self.dispatch(CartAction::Decrease(product_id.clone()))
    }

    pub fn clear_cart(&mut self) -> CartChange {
        self.dispatch(CartAction::Clear)
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}
