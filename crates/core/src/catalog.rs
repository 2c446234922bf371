//! Product catalog.
//!
//! The catalog is a JSON document listing every book the store sells:
//!
//! ```json
//! {
//!   "currency": "USD",
//!   "books": [
//!     { "id": "book-1", "title": "Dune", "category": "sci-fi", "price": "9.99" }
//!   ]
//! }
//! ```
//!
//! Every entry is validated into a [`ProductRef`] when the catalog is built;
//! a single bad entry rejects the whole document.

use std::collections::HashMap;

use serde::Deserialize;

use crate::types::{CurrencyCode, ProductError, ProductId, ProductPayload, ProductRef};

/// Errors raised while loading a catalog.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid book at index {index}: {source}")]
    Product {
        index: usize,
        #[source]
        source: ProductError,
    },
    #[error("duplicate book id: {0}")]
    DuplicateId(ProductId),
}

/// Raw catalog document.
#[derive(Debug, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub currency: CurrencyCode,
    pub books: Vec<ProductPayload>,
}

/// A validated, read-only product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    currency: CurrencyCode,
    products: Vec<ProductRef>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Parse and validate a catalog document.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the JSON is malformed, any entry fails
    /// validation, or two entries share an id.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Validate an already-parsed document.
    ///
    /// # Errors
    ///
    /// See [`Catalog::from_json`].
    pub fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        let currency = document.currency;
        let mut products = Vec::with_capacity(document.books.len());
        let mut index = HashMap::with_capacity(document.books.len());

        for (position, payload) in document.books.into_iter().enumerate() {
            let product = payload
                .validate(currency)
                .map_err(|source| CatalogError::Product {
                    index: position,
                    source,
                })?;
            if index.insert(product.id().clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(product.id().clone()));
            }
            products.push(product);
        }

        Ok(Self {
            currency,
            products,
            index,
        })
    }

    /// Currency every product is priced in.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&ProductRef> {
        self.index.get(id).and_then(|&i| self.products.get(i))
    }

    /// Products in document order.
    pub fn iter(&self) -> impl Iterator<Item = &ProductRef> {
        self.products.iter()
    }

    /// Products flagged as trending, in document order.
    pub fn trending(&self) -> impl Iterator<Item = &ProductRef> {
        self.products.iter().filter(|product| product.trending())
    }

    /// Distinct non-empty categories, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self
            .products
            .iter()
            .map(ProductRef::category)
            .filter(|category| !category.is_empty())
            .collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
