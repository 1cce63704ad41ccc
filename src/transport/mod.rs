//! Remote calls to the shop API.
//!
//! Everything that leaves the device goes through [`Transport`]. Two
//! implementations exist:
//!
//! - [`HttpTransport`]: real requests with `reqwest`.
//! - [`MockTransport`]: answers the auth routes from the local store so the
//!   storefront works without a server. Every other route is unreachable.
//!
//! [`ShopConfig`](crate::config::ShopConfig) picks one at startup.

pub mod error;
pub mod http;
pub mod mock;

pub use error::*;
pub use http::HttpTransport;
pub use mock::MockTransport;

use async_trait::async_trait;
use serde_json::Value;

/// Route paths, relative to the API base URL's host.
pub mod paths {
    pub const LOGIN: &str = "/api/auth/login";
    pub const REGISTER: &str = "/api/auth/register";
    pub const LOGOUT: &str = "/api/auth/logout";
    pub const ME: &str = "/api/auth/me";
    pub const ORDERS: &str = "/api/orders";
    pub const BOOKINGS: &str = "/api/bookings";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    /// Sent as `Authorization: Bearer <token>`.
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            bearer: None,
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            bearer: None,
            body: Some(body),
        }
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

/// Status and JSON body of a completed request.
///
/// Bodies that are not JSON arrive as a JSON string; empty bodies as `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The server's `message` field, if it sent one.
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }
}

/// A way of reaching the shop API.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_helpers() {
        let ok = ApiResponse::new(201, json!({ "message": "Booked" }));
        assert!(ok.is_success());
        assert_eq!(ok.message(), Some("Booked"));

        let bad = ApiResponse::new(404, Value::String("Not Found".into()));
        assert!(!bad.is_success());
        assert_eq!(bad.message(), None);
    }
}
