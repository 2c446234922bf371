//! Application state shared across handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bookstore_core::{Catalog, CatalogError};

use crate::config::StorefrontConfig;

/// Catalog compiled into the binary, used when no catalog path is configured.
const BUILTIN_CATALOG: &str = include_str!("../content/books.json");

/// Error loading the product catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog {origin}: {source}")]
    Invalid {
        origin: String,
        #[source]
        source: CatalogError,
    },
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Cart state is not held here;
/// each session owns its own cart.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }
}

/// Load the catalog from `path`, or the built-in catalog when `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails validation.
pub async fn load_catalog(path: Option<&Path>) -> Result<Catalog, CatalogLoadError> {
    let Some(path) = path else {
        return builtin_catalog();
    };

    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    Catalog::from_json(&json).map_err(|source| CatalogLoadError::Invalid {
        origin: path.display().to_string(),
        source,
    })
}

/// The catalog compiled into the binary.
///
/// # Errors
///
/// Returns an error if the embedded document fails validation.
pub fn builtin_catalog() -> Result<Catalog, CatalogLoadError> {
    Catalog::from_json(BUILTIN_CATALOG).map_err(|source| CatalogLoadError::Invalid {
        origin: "(built-in)".to_string(),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = builtin_catalog().unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.trending().count() > 0);
    }

    #[tokio::test]
    async fn test_load_catalog_missing_file() {
        let result = load_catalog(Some(Path::new("/nonexistent/books.json"))).await;
        assert!(matches!(result, Err(CatalogLoadError::Io { .. })));
    }

    #[tokio::test]
    async fn test_load_catalog_defaults_to_builtin() {
        let catalog = load_catalog(None).await.unwrap();
        assert_eq!(catalog.len(), builtin_catalog().unwrap().len());
    }
}
