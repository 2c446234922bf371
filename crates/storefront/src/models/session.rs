//! Session-related types.
//!
//! Types stored in the session alongside the cart.

use serde::{Deserialize, Serialize};

use bookstore_core::Email;

/// Session-stored customer identity.
///
/// Only used by the checkout guard; there are no stored accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentCustomer {
    pub email: Email,
    /// Name given at registration, if any.
    pub display_name: Option<String>,
}

impl CurrentCustomer {
    /// Name to greet the customer with.
    #[must_use]
    pub fn greeting_name(&self) -> &str {
        self.display_name
            .as_deref()
            .unwrap_or_else(|| self.email.local_part())
    }
}

/// Severity of a one-shot notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Info,
}

/// Advisory message shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// CSS modifier for templates.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self.level {
            NoticeLevel::Success => "notice notice-success",
            NoticeLevel::Info => "notice notice-info",
        }
    }
}

/// Session keys.
pub mod keys {
    /// Key for the session's cart line items.
    pub const CART: &str = "cart";

    /// Key for the quantity-selection dialog state.
    pub const QUANTITY_DIALOG: &str = "quantity_dialog";

    /// Key for the signed-in customer.
    pub const CURRENT_CUSTOMER: &str = "current_customer";

    /// Key for the pending one-shot notice.
    pub const NOTICE: &str = "notice";
}
