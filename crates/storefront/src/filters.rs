//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns the content hash for main.css.
///
/// The hash is computed at build time from the CSS file content.
///
/// Usage in templates: `{{ ""|css_hash }}`
#[askama::filter_fn]
pub fn css_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("CSS_HASH"))
}

/// Shown for books without a cover image.
pub const PLACEHOLDER_COVER: &str = "placeholder.svg";

/// Path of a book cover image under `/static/images/books`.
///
/// Usage in templates: `{{ book.cover_image|cover_url }}`
#[askama::filter_fn]
pub fn cover_url(file_name: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(cover_path(&file_name.to_string()))
}

/// Path of a cover image file, falling back to [`PLACEHOLDER_COVER`].
#[must_use]
pub fn cover_path(file_name: &str) -> String {
    let file_name = match file_name.trim() {
        "" => PLACEHOLDER_COVER,
        name => name,
    };
    format!("/static/images/books/{file_name}")
}
