//! Quantity dialog state stored in the session.

use bookstore_core::QuantityDialog;
use tower_sessions::{Session, session};

use crate::models::session_keys;

/// The session's dialog state; closed when absent or unreadable.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load_dialog(session: &Session) -> Result<QuantityDialog, session::Error> {
    match session
        .get::<QuantityDialog>(session_keys::QUANTITY_DIALOG)
        .await
    {
        Ok(dialog) => Ok(dialog.unwrap_or_default()),
        Err(session::Error::SerdeJson(e)) => {
            tracing::warn!(error = %e, "Discarding unreadable quantity dialog from session");
            Ok(QuantityDialog::Closed)
        }
        Err(e) => Err(e),
    }
}

/// Store the dialog state. A closed dialog is removed from the session.
///
/// # Errors
///
/// Returns an error if the session store cannot be written.
pub async fn save_dialog(session: &Session, dialog: &QuantityDialog) -> Result<(), session::Error> {
    if dialog.is_open() {
        session.insert(session_keys::QUANTITY_DIALOG, dialog).await
    } else {
        session
            .remove::<QuantityDialog>(session_keys::QUANTITY_DIALOG)
            .await
            .map(|_| ())
    }
}
