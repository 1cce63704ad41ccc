//! Error types for the Cart actor.

use crate::model::UnknownSize;
use crate::notice::Notice;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// No line exists at the given position.
    #[error("No cart item at position {index} (cart has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid size: {0}")]
    InvalidSize(String),

    /// The cart could not be written to the local store.
    #[error("Could not save cart: {0}")]
    Storage(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CartError {
    fn from(msg: String) -> Self {
        CartError::ActorCommunicationError(msg)
    }
}

impl From<UnknownSize> for CartError {
    fn from(e: UnknownSize) -> Self {
        CartError::InvalidSize(e.0)
    }
}

impl Notice for CartError {
    fn notice(&self) -> String {
        match self {
            CartError::IndexOutOfRange { .. } => "That item is no longer in your cart.".to_string(),
            CartError::InvalidSize(size) => format!("Please choose a size ({size} is not on the menu)."),
            _ => "Your cart could not be updated. Please try again.".to_string(),
        }
    }
}
