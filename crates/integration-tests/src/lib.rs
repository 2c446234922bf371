//! End-to-end tests for the bookstore storefront.
//!
//! Each test starts the full storefront router on an ephemeral port and
//! drives it with a cookie-keeping HTTP client, the way a browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bookstore-integration-tests
//! ```

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::net::SocketAddr;

use bookstore_core::Catalog;
use bookstore_storefront::{app, config::StorefrontConfig, state::AppState};
use reqwest::{Client, redirect::Policy};
use tower_sessions::MemoryStore;

/// A storefront running in the background of the current test.
pub struct TestServer {
    addr: SocketAddr,
}

impl TestServer {
    /// Start a storefront serving the built-in catalog.
    pub async fn start() -> Self {
        let catalog =
            bookstore_storefront::state::builtin_catalog().expect("built-in catalog is valid");
        Self::with_catalog(catalog).await
    }

    /// Start a storefront serving `catalog`.
    pub async fn with_catalog(catalog: Catalog) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("listener has an address");

        let config = StorefrontConfig::from_lookup(|key| match key {
            "STOREFRONT_BASE_URL" => Some(format!("http://{addr}")),
            _ => None,
        })
        .expect("test configuration is valid");

        let router = app(AppState::new(config, catalog), MemoryStore::default());
        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("test server failed");
        });

        Self { addr }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// A fresh browser: its own cookie jar, redirects not followed.
    #[must_use]
    pub fn browser(&self) -> Client {
        Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("Failed to create HTTP client")
    }
}
