//! Error types for checkout.

use crate::cart_actor::CartError;
use crate::notice::Notice;
use crate::order_actor::OrderError;
use thiserror::Error;

/// Why a checkout did not reach `Success` or `Fallback`.
///
/// Network problems never show up here: they downgrade to a guest identity
/// or to the fallback path.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    /// Nothing to order. No request was made and nothing was stored.
    #[error("Cart is empty")]
    EmptyCart,

    /// Another checkout is still running.
    #[error("Checkout already in progress")]
    InProgress,

    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    #[error("Order history error: {0}")]
    History(#[from] OrderError),

    #[error("Could not encode order: {0}")]
    Payload(String),
}

impl Notice for CheckoutError {
    fn notice(&self) -> String {
        match self {
            CheckoutError::EmptyCart => "Your cart is empty!".to_string(),
            CheckoutError::InProgress => "Your order is already being placed.".to_string(),
            _ => "An error occurred during checkout. Please try again.".to_string(),
        }
    }
}
