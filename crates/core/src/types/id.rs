//! Opaque product identifiers.
//!
//! Product ids come from the catalog and appear in URLs (`/books/{id}`), so
//! they are restricted to a URL-safe alphabet and validated on every
//! construction path, including deserialization.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ProductId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductIdError {
    /// The input string is empty.
    #[error("product id cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("product id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[A-Za-z0-9_-]`.
    #[error("product id contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// Unique identifier of a product in the catalog.
///
/// ## Examples
///
/// ```
/// use bookstore_core::ProductId;
///
/// assert!(ProductId::parse("6712ab09f3").is_ok());
/// assert!(ProductId::parse("the-hobbit").is_ok());
///
/// assert!(ProductId::parse("").is_err());
/// assert!(ProductId::parse("../etc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Maximum length of a product id.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `ProductId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than
    /// [`Self::MAX_LENGTH`], or contains characters other than ASCII
    /// letters, digits, `-` and `_`.
    pub fn parse(s: &str) -> Result<Self, ProductIdError> {
        if s.is_empty() {
            return Err(ProductIdError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(ProductIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(ProductIdError::InvalidCharacter(c));
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = ProductIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ProductId {
    type Error = ProductIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_ids() {
        assert!(ProductId::parse("a").is_ok());
        assert!(ProductId::parse("6712ab09f3c4e1d2a8b7c6d5").is_ok());
        assert!(ProductId::parse("the_hobbit-1937").is_ok());
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(ProductId::parse(""), Err(ProductIdError::Empty));
    }

    #[test]
    fn test_parse_rejects_path_characters() {
        assert_eq!(
            ProductId::parse("books/1"),
            Err(ProductIdError::InvalidCharacter('/'))
        );
        assert_eq!(
            ProductId::parse("a b"),
            Err(ProductIdError::InvalidCharacter(' '))
        );
    }

    #[test]
    fn test_parse_rejects_too_long() {
        let long = "x".repeat(ProductId::MAX_LENGTH + 1);
        assert!(matches!(
            ProductId::parse(&long),
            Err(ProductIdError::TooLong { .. })
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let id: ProductId = serde_json::from_str("\"book-1\"").unwrap();
        assert_eq!(id.as_str(), "book-1");
        assert!(serde_json::from_str::<ProductId>("\"\"").is_err());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"book-1\"");
    }
}
