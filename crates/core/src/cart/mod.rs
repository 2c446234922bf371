//! Shopping cart state.
//!
//! - [`Cart`] - insertion-ordered line items, at most one per product
//! - [`CartStore`] - the single writer for a cart; applies [`CartAction`]s and
//!   notifies subscribers after every dispatch
//! - [`QuantityDialog`] - the "set quantity, then add" selection flow
//!
//! Adding a product that is already in the cart **replaces** its quantity
//! with the requested one; quantities are never summed.

mod dialog;
mod line_item;
mod store;

pub use dialog::{DialogEvent, DialogOutcome, QuantityDialog};
pub use line_item::{Cart, CartError, CartLineItem};
pub use store::{CartAction, CartChange, CartStore, SubscriptionId, Unchanged};
