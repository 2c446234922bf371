//! Cart line items and the cart collection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId, ProductRef, Quantity};

/// Errors raised when rebuilding a [`Cart`] from stored line items.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("cart contains more than one line for product {0}")]
    DuplicateLine(ProductId),
}

/// One product-and-quantity pairing in the cart.
///
/// Display metadata and the unit price are copied from the product when the
/// line is first created and are not refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub product_id: ProductId,
    pub title: String,
    pub category: String,
    pub cover_image: String,
    pub unit_price: Price,
    pub quantity: Quantity,
}

impl CartLineItem {
    /// Snapshot `product` into a new line.
    #[must_use]
    pub fn from_product(product: &ProductRef, quantity: Quantity) -> Self {
        Self {
            product_id: product.id().clone(),
            title: product.title().to_owned(),
            category: product.category().to_owned(),
            cover_image: product.cover_image().to_owned(),
            unit_price: product.unit_price(),
            quantity,
        }
    }

    /// `unit_price * quantity`, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// The ordered collection of line items in a session.
///
/// Only [`CartStore`](super::CartStore) mutates a cart. Everything else reads
/// it through [`Cart::items`] and the derived accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLineItem>", into = "Vec<CartLineItem>")]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| &item.product_id == product_id)
    }

    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Exact sum of `unit_price * quantity` over all lines. Catalog prices are
    /// bounded so the sum never reaches the saturation point.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |acc, item| {
                acc.saturating_add(item.line_total().amount)
            })
    }

    pub(crate) fn get_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLineItem> {
        self.items
            .iter_mut()
            .find(|item| &item.product_id == product_id)
    }

    pub(crate) fn push(&mut self, item: CartLineItem) {
        debug_assert!(!self.contains(&item.product_id));
        self.items.push(item);
    }

    pub(crate) fn remove(&mut self, product_id: &ProductId) -> Option<CartLineItem> {
        let index = self
            .items
            .iter()
            .position(|item| &item.product_id == product_id)?;
        Some(self.items.remove(index))
    }

    pub(crate) fn clear(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();
        removed
    }
}

impl TryFrom<Vec<CartLineItem>> for Cart {
    type Error = CartError;

    fn try_from(items: Vec<CartLineItem>) -> Result<Self, Self::Error> {
        let mut cart = Self::new();
        for item in items {
            if cart.contains(&item.product_id) {
                return Err(CartError::DuplicateLine(item.product_id));
            }
            cart.items.push(item);
        }
        Ok(cart)
    }
}

impl From<Cart> for Vec<CartLineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::types::CurrencyCode;

    fn line(id: &str, price: &str, quantity: u32) -> CartLineItem {
        CartLineItem {
            product_id: ProductId::parse(id).unwrap(),
            title: id.to_uppercase(),
            category: "fiction".to_string(),
            cover_image: format!("{id}.png"),
            unit_price: Price::new(Decimal::from_str(price).unwrap(), CurrencyCode::USD),
            quantity: Quantity::new(quantity).unwrap(),
        }
    }

    #[test]
    fn test_subtotal_is_exact() {
        let cart = Cart::try_from(vec![line("a", "0.1", 1), line("b", "0.2", 1)]).unwrap();
        assert_eq!(cart.subtotal(), Decimal::from_str("0.3").unwrap());
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_rebuild_rejects_duplicate_lines() {
        let result = Cart::try_from(vec![line("a", "1", 1), line("a", "1", 2)]);
        assert_eq!(
            result,
            Err(CartError::DuplicateLine(ProductId::parse("a").unwrap()))
        );
    }

    #[test]
    fn test_serde_preserves_order() {
        let cart = Cart::try_from(vec![line("b", "2", 1), line("a", "1", 3)]).unwrap();
        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        let ids: Vec<_> = restored
            .items()
            .iter()
            .map(|item| item.product_id.as_str())
            .collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn test_deserialize_rejects_duplicate_lines() {
        let json = serde_json::to_string(&vec![line("a", "1", 1), line("a", "1", 1)]).unwrap();
        assert!(serde_json::from_str::<Cart>(&json).is_err());
    }
}
