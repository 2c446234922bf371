//! Book detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tower_sessions::Session;
use tracing::instrument;

use super::dialog::DialogView;
use super::home::BookCard;
use super::layout::{Layout, LayoutContext};
use crate::error::Result;
use crate::filters;
use crate::services::{load_dialog, resolve_product};
use crate::state::AppState;

/// Book detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "books/show.html")]
pub struct BookShowTemplate {
    pub layout: Layout,
    pub book: BookCard,
    pub description: String,
    pub path: String,
    pub dialog: Option<DialogView>,
}

/// Display a book.
#[instrument(skip(state, session, page))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    page: LayoutContext,
    Path(id): Path<String>,
) -> Result<BookShowTemplate> {
    let product = resolve_product(state.catalog(), &id)?;
    let path = format!("/books/{}", product.id());
    let dialog = load_dialog(&session).await?;

    Ok(BookShowTemplate {
        layout: page.render().await,
        book: BookCard::from(product),
        description: product.description().to_string(),
        dialog: DialogView::new(&dialog, state.catalog(), &path),
        path,
    })
}
