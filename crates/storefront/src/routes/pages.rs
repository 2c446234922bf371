//! Static page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use tracing::instrument;

use super::layout::{Layout, LayoutContext};
use crate::filters;

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub layout: Layout,
}

/// Orders page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/orders.html")]
pub struct OrdersTemplate {
    pub layout: Layout,
}

/// Display the about page.
#[instrument(skip(page))]
pub async fn about(page: LayoutContext) -> AboutTemplate {
    AboutTemplate {
        layout: page.render().await,
    }
}

/// Display the orders page. Orders are not persisted, so this only points
/// the customer at their cart.
#[instrument(skip(page))]
pub async fn orders(page: LayoutContext) -> OrdersTemplate {
    OrdersTemplate {
        layout: page.render().await,
    }
}
