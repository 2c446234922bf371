//! One-shot advisory notices ("Product Added to the Cart").
//!
//! Notices are best effort: a failure to store or read one is logged and
//! otherwise ignored, so it can never affect cart state or fail a request.

use tower_sessions::Session;

use crate::models::{Notice, session_keys};

/// Queue a notice for the next rendered page.
pub async fn push_notice(session: &Session, notice: Notice) {
    if let Err(e) = session.insert(session_keys::NOTICE, &notice).await {
        tracing::warn!(error = %e, message = %notice.message, "Failed to queue notice");
    }
}

/// Take the pending notice, if any. It will not be shown again.
pub async fn take_notice(session: &Session) -> Option<Notice> {
    session
        .remove::<Notice>(session_keys::NOTICE)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to read notice");
            None
        })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_notice_is_shown_once() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        push_notice(&session, Notice::success("Product Added to the Cart")).await;

        assert_eq!(
            take_notice(&session).await,
            Some(Notice::success("Product Added to the Cart"))
        );
        assert_eq!(take_notice(&session).await, None);
    }
}
