//! Bookstore Core - Shared domain library.
//!
//! This crate provides the types and state logic used across the bookstore:
//! - `storefront` - Public-facing bookstore site
//! - `cli` - Command-line tools for catalog management
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no HTTP, no session handling. This keeps the cart rules testable in
//! isolation and usable from any front end.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product ids, prices, quantities and emails
//! - [`catalog`] - Validated product catalog loaded from JSON
//! - [`cart`] - Cart line items, the single-writer cart store, and the
//!   quantity-selection dialog state machine

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;

pub use cart::{
    Cart, CartAction, CartChange, CartError, CartLineItem, CartStore, DialogEvent, DialogOutcome,
    QuantityDialog, SubscriptionId, Unchanged,
};
pub use catalog::{Catalog, CatalogError};
pub use types::*;
