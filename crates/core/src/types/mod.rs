//! Core types for the bookstore.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod quantity;

pub use email::{Email, EmailError};
pub use id::{ProductId, ProductIdError};
pub use price::{CurrencyCode, Price};
pub use product::{MAX_PRICE, MAX_PRICE_SCALE, ProductError, ProductPayload, ProductRef};
pub use quantity::{Quantity, QuantityError};
