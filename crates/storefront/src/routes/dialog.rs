//! Quantity-selection dialog handlers.
//!
//! The dialog lives in the session. Each button posts one event to
//! `/cart/dialog/{event}`; a confirm adds the chosen quantity to the cart and
//! queues a notice, everything else only moves the dialog.

use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use bookstore_core::{Catalog, DialogEvent, DialogOutcome, ProductId, QuantityDialog};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::cart::{CART_UPDATED, CartIntent, apply_intent};
use super::local_redirect;
use crate::error::{AppError, Result};
use crate::models::Notice;
use crate::services::{load_dialog, push_notice, save_dialog};
use crate::state::AppState;

/// Notice queued after a confirmed add.
pub const ADDED_NOTICE: &str = "Product Added to the Cart";

/// Open dialog display data.
#[derive(Debug, Clone)]
pub struct DialogView {
    pub product_id: String,
    pub title: String,
    pub price: String,
    pub quantity: u32,
    /// Decrement is disabled at quantity one.
    pub at_minimum: bool,
    /// Page the dialog was opened from.
    pub return_to: String,
}

impl DialogView {
    /// View for an open dialog, or `None` when it is closed or the book it
    /// was opened for is no longer in the catalog.
    #[must_use]
    pub fn new(dialog: &QuantityDialog, catalog: &Catalog, return_to: &str) -> Option<Self> {
        let QuantityDialog::Open {
            product_id,
            quantity,
        } = dialog
        else {
            return None;
        };
        let product = catalog.get(product_id)?;

        Some(Self {
            product_id: product_id.to_string(),
            title: product.title().to_string(),
            price: product.unit_price().display(),
            quantity: quantity.get(),
            at_minimum: quantity.get() == 1,
            return_to: return_to.to_string(),
        })
    }
}

/// Dialog form data. `product_id` is only read by `open`.
#[derive(Debug, Deserialize)]
pub struct DialogForm {
    pub product_id: Option<String>,
    pub return_to: Option<String>,
}

/// Parse the `{event}` path segment and form into a dialog event.
///
/// # Errors
///
/// Returns `BadRequest` for unknown events and `open` without a valid id,
/// and `NotFound` when opening for a book not in the catalog.
pub fn parse_event(catalog: &Catalog, event: &str, form: &DialogForm) -> Result<DialogEvent> {
    let event = match event {
        "open" => {
            let raw = form
                .product_id
                .as_deref()
                .ok_or_else(|| AppError::BadRequest("product_id is required".to_string()))?;
            let id = ProductId::parse(raw.trim())
                .map_err(|e| AppError::BadRequest(format!("product_id: {e}")))?;
            if catalog.get(&id).is_none() {
                return Err(AppError::NotFound(format!("book {id}")));
            }
            DialogEvent::RequestAdd(id)
        }
        "increment" => DialogEvent::Increment,
        "decrement" => DialogEvent::Decrement,
        "confirm" => DialogEvent::Confirm,
        "cancel" => DialogEvent::Cancel,
        other => return Err(AppError::BadRequest(format!("unknown dialog event: {other}"))),
    };
    Ok(event)
}

/// Handle a dialog event.
#[instrument(skip(state, session, form))]
pub async fn handle_event(
    State(state): State<AppState>,
    session: Session,
    Path(event): Path<String>,
    Form(form): Form<DialogForm>,
) -> Result<Response> {
    let event = parse_event(state.catalog(), &event, &form)?;
    let redirect = Redirect::to(&local_redirect(form.return_to.as_deref(), "/"));

    let dialog = load_dialog(&session).await?;
    let (dialog, outcome) = dialog.handle(event);
    save_dialog(&session, &dialog).await?;

    if let Some(DialogOutcome {
        product_id,
        quantity,
    }) = outcome
    {
        let intent = CartIntent::AddToCart {
            product_id: product_id.to_string(),
            quantity: Some(i64::from(quantity.get())),
        };
        apply_intent(&state, session.clone(), intent).await?;
        push_notice(&session, Notice::success(ADDED_NOTICE)).await;
        return Ok(([CART_UPDATED], redirect).into_response());
    }

    Ok(redirect.into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bookstore_core::Quantity;

    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"{"books": [{"id": "a", "title": "Alpha", "category": "fiction", "price": "4.25"}]}"#,
        )
        .unwrap()
    }

    fn form(product_id: Option<&str>) -> DialogForm {
        DialogForm {
            product_id: product_id.map(str::to_string),
            return_to: None,
        }
    }

    #[test]
    fn test_parse_events() {
        let catalog = catalog();
        assert_eq!(
            parse_event(&catalog, "open", &form(Some("a"))).unwrap(),
            DialogEvent::RequestAdd(ProductId::parse("a").unwrap())
        );
        assert_eq!(
            parse_event(&catalog, "confirm", &form(None)).unwrap(),
            DialogEvent::Confirm
        );
        assert!(matches!(
            parse_event(&catalog, "open", &form(None)),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            parse_event(&catalog, "open", &form(Some("b"))),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            parse_event(&catalog, "explode", &form(None)),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_dialog_view() {
        let catalog = catalog();
        assert!(DialogView::new(&QuantityDialog::Closed, &catalog, "/").is_none());

        let open = QuantityDialog::Open {
            product_id: ProductId::parse("a").unwrap(),
            quantity: Quantity::new(2).unwrap(),
        };
        let view = DialogView::new(&open, &catalog, "/books/a").unwrap();
        assert_eq!(view.title, "Alpha");
        assert_eq!(view.price, "$4.25");
        assert_eq!(view.quantity, 2);
        assert!(!view.at_minimum);
        assert_eq!(view.return_to, "/books/a");
    }
}
