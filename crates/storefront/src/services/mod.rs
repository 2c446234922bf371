//! Session-backed services used by route handlers.
//!
//! - [`cart`] - loads the session's cart into a `CartStore`, dispatches, persists
//! - [`dialog`] - quantity-selection dialog state
//! - [`notice`] - one-shot advisory notices

pub mod cart;
pub mod dialog;
pub mod notice;

pub use cart::{SessionCart, read_cart, resolve_product};
pub use dialog::{load_dialog, save_dialog};
pub use notice::{push_notice, take_notice};
