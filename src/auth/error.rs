//! Error types for the auth session.

use crate::notice::Notice;
use crate::transport::TransportError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    /// Registration form: password and confirmation differ. Nothing was sent.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// The server answered with a non-2xx status.
    #[error("Rejected by server: {0}")]
    Rejected(String),

    /// Login succeeded but the response carried no token.
    #[error("No token received from server")]
    MissingToken,

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The session could not be written to the local store.
    #[error("Session storage error: {0}")]
    Storage(String),
}

impl Notice for AuthError {
    fn notice(&self) -> String {
        match self {
            AuthError::Rejected(message) => message.clone(),
            AuthError::Transport(_) => "Could not reach the server. Please try again.".to_string(),
            AuthError::Storage(_) => "Could not save your session.".to_string(),
            other => other.to_string(),
        }
    }
}
