//! Turning the cart into an order.
//!
//! ```text
//! Idle → ValidatingCart → ResolvingIdentity → SubmittingOrder → Success
//!              │                                     ├──────→ Fallback
//!              └→ Rejected (empty cart)              └──────→ Failed
//! ```
//!
//! [`CheckoutOrchestrator`] drives one run at a time and publishes each state
//! on a `watch` channel.

pub mod error;
pub mod identity;
pub mod orchestrator;
pub mod payload;

pub use error::*;
pub use identity::IdentityResolver;
pub use orchestrator::*;
pub use payload::*;

use crate::model::Order;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckoutState {
    #[default]
    Idle,
    ValidatingCart,
    ResolvingIdentity,
    SubmittingOrder,
    /// The server accepted the order.
    Success,
    /// The server did not confirm; the order was kept locally.
    Fallback,
    Failed,
    /// The cart was empty.
    Rejected,
}

impl CheckoutState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            CheckoutState::Success | CheckoutState::Fallback | CheckoutState::Failed | CheckoutState::Rejected
        )
    }
}

/// Result of a checkout that produced an order.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutOutcome {
    /// [`CheckoutState::Success`] or [`CheckoutState::Fallback`].
    pub state: CheckoutState,
    pub order: Order,
    /// The ordered lines were taken out of the cart.
    pub cart_cleared: bool,
    /// Payment page for this order.
    pub redirect: String,
}

impl CheckoutOutcome {
    /// Text for the confirmation toast.
    pub fn notice(&self) -> &'static str {
        match self.state {
            CheckoutState::Success => "Order placed successfully! Redirecting to payment...",
            _ => "Order saved on this device. Redirecting to payment...",
        }
    }
}

pub fn payment_redirect(order_id: &str) -> String {
    format!("payment.html?orderId={order_id}")
}
