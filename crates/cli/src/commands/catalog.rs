//! Catalog commands.
//!
//! Both commands run the same validation the storefront runs at startup, so a
//! file that passes `check` will load.

use std::path::{Path, PathBuf};

use bookstore_core::{Catalog, CatalogError, ProductRef};
use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogCommandError {
    /// The catalog file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog failed validation.
    #[error("Invalid catalog {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: CatalogError,
    },
}

/// Filters for `catalog list`.
#[derive(Debug, Default)]
pub struct ListFilter {
    pub category: Option<String>,
    pub trending: bool,
}

impl ListFilter {
    fn matches(&self, book: &ProductRef) -> bool {
        (!self.trending || book.trending())
            && self
                .category
                .as_deref()
                .is_none_or(|category| book.category() == category)
    }
}

/// Validate a catalog file and print a summary.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid catalog.
#[allow(clippy::print_stdout)]
pub async fn check(path: &Path) -> Result<(), CatalogCommandError> {
    let catalog = load(path).await?;

    tracing::info!(path = %path.display(), books = catalog.len(), "Catalog is valid");
    println!("{}", summary(&catalog));
    Ok(())
}

/// Print the books in a catalog file, one per line.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid catalog.
#[allow(clippy::print_stdout)]
pub async fn list(path: &Path, filter: &ListFilter) -> Result<(), CatalogCommandError> {
    let catalog = load(path).await?;

    let mut shown = 0_usize;
    for book in catalog.iter().filter(|book| filter.matches(book)) {
        println!("{}", format_row(book));
        shown += 1;
    }

    tracing::info!(shown, total = catalog.len(), "Listed books");
    Ok(())
}

async fn load(path: &Path) -> Result<Catalog, CatalogCommandError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogCommandError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    Catalog::from_json(&json).map_err(|source| CatalogCommandError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

fn summary(catalog: &Catalog) -> String {
    format!(
        "{} books in {} ({} trending); categories: {}",
        catalog.len(),
        catalog.currency().code(),
        catalog.trending().count(),
        catalog.categories().join(", ")
    )
}

fn format_row(book: &ProductRef) -> String {
    format!(
        "{:<40} {:<12} {:>10}{}  {}",
        book.id().as_str(),
        book.category(),
        book.unit_price().display(),
        if book.trending() { " *" } else { "  " },
        book.title()
    )
}
