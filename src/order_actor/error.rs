//! Error types for the Order History actor.

use crate::notice::Notice;
use thiserror::Error;

/// Errors that can occur during order history operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The history could not be written to the local store.
    #[error("Could not save order history: {0}")]
    Storage(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}

impl Notice for OrderError {
    fn notice(&self) -> String {
        "Your order history could not be updated.".to_string()
    }
}
