//! Per-page layout data shared by every full-page template.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::middleware::OptionalAuth;
use crate::models::{CurrentCustomer, Notice};
use crate::services::take_notice;

/// Header and notice data rendered by `base.html`.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub customer: Option<CurrentCustomer>,
    pub notice: Option<Notice>,
}

/// Extractor for [`Layout`].
///
/// The pending notice stays in the session until [`LayoutContext::render`]
/// is called, so handlers that redirect instead of rendering leave it for
/// the next page.
#[derive(Debug, Clone)]
pub struct LayoutContext {
    customer: Option<CurrentCustomer>,
    session: Option<Session>,
}

impl LayoutContext {
    /// Take the pending notice and build the layout for a page about to be
    /// rendered.
    pub async fn render(self) -> Layout {
        let notice = match &self.session {
            Some(session) => take_notice(session).await,
            None => None,
        };
        Layout {
            customer: self.customer,
            notice,
        }
    }
}

impl<S> FromRequestParts<S> for LayoutContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let OptionalAuth(customer) = OptionalAuth::from_request_parts(parts, state).await?;
        let session = parts.extensions.get::<Session>().cloned();

        Ok(Self { customer, session })
    }
}
