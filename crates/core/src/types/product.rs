//! Product references supplied by the catalog.
//!
//! [`ProductPayload`] is the raw, deserialized shape of a catalog entry.
//! [`ProductRef`] is the validated form the cart accepts; the only way to
//! obtain one is [`ProductPayload::validate`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CurrencyCode, Price, ProductId, ProductIdError};

/// Highest accepted unit price.
///
/// With at most [`MAX_PRICE_SCALE`] decimal places, a line total at
/// [`Quantity::MAX`](super::Quantity::MAX) and the sum of any realistic
/// number of lines stay well inside `Decimal`'s 96-bit mantissa, so cart
/// arithmetic is exact.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Most decimal places accepted in a unit price.
pub const MAX_PRICE_SCALE: u32 = 4;

/// Errors raised while validating a [`ProductPayload`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// The id is not a valid [`ProductId`].
    #[error("invalid product id: {0}")]
    InvalidId(#[from] ProductIdError),
    /// The title is empty after trimming.
    #[error("product title cannot be empty")]
    EmptyTitle,
    /// The price is below zero.
    #[error("product price cannot be negative (got {0})")]
    NegativePrice(Decimal),
    /// The price is above [`MAX_PRICE`].
    #[error("product price cannot exceed {MAX_PRICE} (got {0})")]
    PriceTooLarge(Decimal),
    /// The price has more than [`MAX_PRICE_SCALE`] decimal places.
    #[error("product price cannot have more than {MAX_PRICE_SCALE} decimal places (got {0})")]
    PriceTooPrecise(Decimal),
    /// The pre-sale price is below zero.
    #[error("product old price cannot be negative (got {0})")]
    NegativeOldPrice(Decimal),
}

/// A catalog entry as it appears in the catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    /// Price before discount, shown struck through.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub old_price: Option<Decimal>,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub trending: bool,
}

impl ProductPayload {
    /// Validate the payload into a [`ProductRef`] priced in `currency`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] if the id is malformed, the title is empty,
    /// either price is negative, or the price is above [`MAX_PRICE`] or has
    /// more than [`MAX_PRICE_SCALE`] decimal places.
    pub fn validate(self, currency: CurrencyCode) -> Result<ProductRef, ProductError> {
        let id = ProductId::parse(self.id.trim())?;

        let title = self.title.trim();
        if title.is_empty() {
            return Err(ProductError::EmptyTitle);
        }

        let unit_price = Price::new(self.price, currency);
        if unit_price.is_negative() {
            return Err(ProductError::NegativePrice(self.price));
        }
        if self.price > MAX_PRICE {
            return Err(ProductError::PriceTooLarge(self.price));
        }
        if self.price.normalize().scale() > MAX_PRICE_SCALE {
            return Err(ProductError::PriceTooPrecise(self.price));
        }

        let old_price = match self.old_price {
            Some(amount) => {
                let price = Price::new(amount, currency);
                if price.is_negative() {
                    return Err(ProductError::NegativeOldPrice(amount));
                }
                Some(price)
            }
            None => None,
        };

        Ok(ProductRef {
            id,
            title: title.to_owned(),
            category: self.category.trim().to_owned(),
            unit_price,
            old_price,
            cover_image: self.cover_image.trim().to_owned(),
            description: self.description,
            trending: self.trending,
        })
    }
}

/// A validated product, as handed to the cart when an add intent originates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRef {
    id: ProductId,
    title: String,
    category: String,
    unit_price: Price,
    old_price: Option<Price>,
    cover_image: String,
    description: String,
    trending: bool,
}

impl ProductRef {
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Current selling price of one unit.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        self.unit_price
    }

    #[must_use]
    pub const fn old_price(&self) -> Option<Price> {
        self.old_price
    }

    /// Cover image file name, relative to the image root.
    #[must_use]
    pub fn cover_image(&self) -> &str {
        &self.cover_image
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn trending(&self) -> bool {
        self.trending
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::types::Quantity;

    fn payload() -> ProductPayload {
        ProductPayload {
            id: "book-1".to_string(),
            title: " The Hobbit ".to_string(),
            category: "fiction".to_string(),
            price: Decimal::from_str("10.00").unwrap(),
            old_price: None,
            cover_image: "book-1.png".to_string(),
            description: String::new(),
            trending: false,
        }
    }

    #[test]
    fn test_validate_trims_title() {
        let product = payload().validate(CurrencyCode::USD).unwrap();
        assert_eq!(product.title(), "The Hobbit");
        assert_eq!(product.id().as_str(), "book-1");
        assert_eq!(product.unit_price().display(), "$10.00");
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let mut bad = payload();
        bad.price = Decimal::from_str("-1").unwrap();
        assert!(matches!(
            bad.validate(CurrencyCode::USD),
            Err(ProductError::NegativePrice(_))
        ));
    }

    #[test]
    fn test_validate_bounds_price() {
        let mut at_limit = payload();
        at_limit.price = Decimal::from_str("1000000.0000").unwrap();
        assert!(at_limit.validate(CurrencyCode::USD).is_ok());

        let mut huge = payload();
        huge.price = Decimal::from_str("20000000000000000000").unwrap();
        assert!(matches!(
            huge.validate(CurrencyCode::USD),
            Err(ProductError::PriceTooLarge(_))
        ));

        let mut precise = payload();
        precise.price = Decimal::from_str("0.12345").unwrap();
        assert!(matches!(
            precise.validate(CurrencyCode::USD),
            Err(ProductError::PriceTooPrecise(_))
        ));
    }

    #[test]
    fn test_max_price_line_total_is_exact() {
        let mut priciest = payload();
        priciest.price = Decimal::from_str("999999.9999").unwrap();
        let product = priciest.validate(CurrencyCode::USD).unwrap();

        let total = product.unit_price().times(Quantity::MAX);
        assert_eq!(
            total.amount,
            Decimal::from_str("999999.9999").unwrap() * Decimal::from(u32::MAX)
        );
        assert!(total.amount < Decimal::MAX);
        assert_eq!(total.amount.to_string(), "4294967294570503.2705");
    }

    #[test]
    fn test_validate_rejects_negative_old_price() {
        let mut bad = payload();
        bad.old_price = Some(Decimal::from_str("-3").unwrap());
        assert!(matches!(
            bad.validate(CurrencyCode::USD),
            Err(ProductError::NegativeOldPrice(_))
        ));
    }

    #[test]
    fn test_validate_rejects_missing_identity() {
        let mut bad = payload();
        bad.id = "  ".to_string();
        assert_eq!(
            bad.validate(CurrencyCode::USD),
            Err(ProductError::InvalidId(ProductIdError::Empty))
        );

        let mut bad = payload();
        bad.title = String::new();
        assert_eq!(
            bad.validate(CurrencyCode::USD),
            Err(ProductError::EmptyTitle)
        );
    }

    #[test]
    fn test_payload_prices_are_strings() {
        let json = r#"{"id":"b2","title":"Dune","price":"3.50","old_price":"5.00"}"#;
        let parsed: ProductPayload = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.price, Decimal::from_str("3.50").unwrap());
        assert_eq!(parsed.old_price, Some(Decimal::from_str("5.00").unwrap()));
        assert!(parsed.category.is_empty());
    }
}
