//! Domain models for storefront.
//!
//! Cart and catalog types live in `bookstore-core`; this module holds the
//! session-scoped types that only make sense inside the web layer.

pub mod session;

pub use session::{CurrentCustomer, Notice, NoticeLevel, keys as session_keys};
