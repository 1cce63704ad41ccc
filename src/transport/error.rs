//! Error types for remote calls.

use crate::notice::Notice;
use thiserror::Error;

/// Errors raised before a response status is available.
///
/// A non-2xx response is *not* an error at this layer; it arrives as an
/// [`ApiResponse`](super::ApiResponse) and the caller decides what it means.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    /// No backend serves this route (e.g. order submission in mock mode).
    #[error("Route not available: {0}")]
    Unreachable(String),

    #[error("Request timed out")]
    Timeout,

    /// Connection refused, DNS failure, TLS failure and the like.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body could not be read.
    #[error("Invalid response body: {0}")]
    InvalidBody(String),

    /// The mock backend could not read or write its accounts.
    #[error("Mock backend error: {0}")]
    Backend(String),

    #[error("HTTP client setup failed: {0}")]
    Setup(String),
}

impl Notice for TransportError {
    fn notice(&self) -> String {
        match self {
            TransportError::Timeout => "The server took too long to answer.".to_string(),
            _ => "Could not reach the server. Please try again.".to_string(),
        }
    }
}
