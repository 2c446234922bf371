//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use bookstore_core::ProductRef;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::dialog::DialogView;
use super::layout::{Layout, LayoutContext};
use crate::error::Result;
use crate::filters;
use crate::services::load_dialog;
use crate::state::AppState;

/// Book display data for listing templates.
#[derive(Debug, Clone)]
pub struct BookCard {
    pub id: String,
    pub title: String,
    pub category: String,
    pub cover_image: String,
    pub price: String,
    pub old_price: Option<String>,
}

impl From<&ProductRef> for BookCard {
    fn from(product: &ProductRef) -> Self {
        Self {
            id: product.id().to_string(),
            title: product.title().to_string(),
            category: product.category().to_string(),
            cover_image: product.cover_image().to_string(),
            price: product.unit_price().display(),
            old_price: product.old_price().map(|p| p.display()),
        }
    }
}

/// Category filter link.
#[derive(Debug, Clone)]
pub struct CategoryLink {
    pub name: String,
    pub active: bool,
}

/// Home page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub category: Option<String>,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub trending: Vec<BookCard>,
    pub books: Vec<BookCard>,
    pub categories: Vec<CategoryLink>,
    pub active_category: Option<String>,
    pub dialog: Option<DialogView>,
}

/// Display the home page: trending books, then the full listing, optionally
/// filtered to one category.
#[instrument(skip(state, session, page))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    page: LayoutContext,
    Query(query): Query<HomeQuery>,
) -> Result<HomeTemplate> {
    let catalog = state.catalog();
    let active_category = query.category.filter(|c| !c.is_empty());

    let books = catalog
        .iter()
        .filter(|book| {
            active_category
                .as_deref()
                .is_none_or(|category| book.category() == category)
        })
        .map(BookCard::from)
        .collect();

    let categories = catalog
        .categories()
        .into_iter()
        .map(|name| CategoryLink {
            name: name.to_string(),
            active: active_category.as_deref() == Some(name),
        })
        .collect();

    let dialog = load_dialog(&session).await?;

    Ok(HomeTemplate {
        layout: page.render().await,
        trending: catalog.trending().map(BookCard::from).collect(),
        books,
        categories,
        active_category,
        dialog: DialogView::new(&dialog, catalog, "/"),
    })
}
