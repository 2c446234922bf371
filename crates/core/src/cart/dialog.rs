//! Quantity-selection dialog.
//!
//! The dialog lets a customer pick a quantity before a product is added:
//!
//! ```text
//!            RequestAdd(p)
//!   Closed ───────────────▶ Open(p, 1)
//!                           │  Increment  → Open(p, q + 1)
//!                           │  Decrement  → Open(p, max(q - 1, 1))
//!                           │  Confirm    → Closed, emits add(p, q)
//!                           └─ Cancel     → Closed
//! ```
//!
//! The dialog never touches the cart itself. A confirmed selection is handed
//! back to the caller, which turns it into a cart action.

use serde::{Deserialize, Serialize};

use crate::types::{ProductId, Quantity};

/// Current state of the dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QuantityDialog {
    #[default]
    Closed,
    Open {
        product_id: ProductId,
        quantity: Quantity,
    },
}

/// User input to the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogEvent {
    /// Open the dialog for a product, starting at quantity one.
    RequestAdd(ProductId),
    Increment,
    Decrement,
    Confirm,
    Cancel,
}

/// A confirmed selection, ready to become an add-to-cart action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogOutcome {
    pub product_id: ProductId,
    pub quantity: Quantity,
}

impl QuantityDialog {
    /// Apply `event`, returning the next state and any confirmed selection.
    ///
    /// Events other than [`DialogEvent::RequestAdd`] are ignored while
    /// closed. A `RequestAdd` while open restarts the dialog for the new
    /// product.
    #[must_use]
    pub fn handle(self, event: DialogEvent) -> (Self, Option<DialogOutcome>) {
        match (self, event) {
            (_, DialogEvent::RequestAdd(product_id)) => (
                Self::Open {
                    product_id,
                    quantity: Quantity::ONE,
                },
                None,
            ),
            (Self::Open { product_id, quantity }, DialogEvent::Increment) => (
                Self::Open {
                    product_id,
                    quantity: quantity.increment(),
                },
                None,
            ),
            (Self::Open { product_id, quantity }, DialogEvent::Decrement) => (
                Self::Open {
                    product_id,
                    quantity: quantity.decrement_or_one(),
                },
                None,
            ),
            (Self::Open { product_id, quantity }, DialogEvent::Confirm) => (
                Self::Closed,
                Some(DialogOutcome {
                    product_id,
                    quantity,
                }),
            ),
            (Self::Open { .. } | Self::Closed, DialogEvent::Cancel)
            | (
                Self::Closed,
                DialogEvent::Increment | DialogEvent::Decrement | DialogEvent::Confirm,
            ) => (Self::Closed, None),
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// The product the dialog is open for.
    #[must_use]
    pub const fn product_id(&self) -> Option<&ProductId> {
        match self {
            Self::Open { product_id, .. } => Some(product_id),
            Self::Closed => None,
        }
    }

    /// The currently selected quantity, if open.
    #[must_use]
    pub const fn quantity(&self) -> Option<Quantity> {
        match self {
            Self::Open { quantity, .. } => Some(*quantity),
            Self::Closed => None,
        }
    }
}
