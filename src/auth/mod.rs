//! Login, registration and logout.
//!
//! A session is two store entries: the raw bearer token under
//! [`keys::TOKEN`] and the signed-in [`UserIdentity`] as JSON under
//! [`keys::USER`]. Checkout reads both when it resolves who is ordering.

pub mod error;

pub use error::*;

use crate::model::UserIdentity;
use crate::storage::{keys, load_json, save_json, KeyValueStore};
use crate::transport::{paths, ApiRequest, Transport};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Clone)]
pub struct AuthService {
    transport: Arc<dyn Transport>,
    store: Arc<dyn KeyValueStore>,
}

impl AuthService {
    pub fn new(transport: Arc<dyn Transport>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { transport, store }
    }

    /// Creates an account. Does not sign in.
    #[instrument(skip(self, password, confirm_password))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<UserIdentity, AuthError> {
        if password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let body = json!({ "name": name, "email": email, "password": password });
        let response = self.transport.send(ApiRequest::post(paths::REGISTER, body)).await?;
        if !response.is_success() {
            let message = response.message().unwrap_or("Registration failed");
            return Err(AuthError::Rejected(message.to_string()));
        }

        let user = parse_user(response.body.get("user"))
            .unwrap_or_else(|| UserIdentity::new("", name).with_email(email));
        info!(user_id = %user.id, "Registered");
        Ok(user)
    }

    /// Signs in and stores the session.
    ///
    /// Returns the user the server sent back, if any.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<UserIdentity>, AuthError> {
        let body = json!({ "email": email, "password": password });
        let response = self.transport.send(ApiRequest::post(paths::LOGIN, body)).await?;
        if !response.is_success() {
            let message = response.message().unwrap_or("Login failed");
            return Err(AuthError::Rejected(message.to_string()));
        }

        let success = response.body.get("success").and_then(Value::as_bool).unwrap_or(false);
        let token = match response.body.get("token").and_then(Value::as_str) {
            Some(token) if success && !token.is_empty() => token,
            _ => return Err(AuthError::MissingToken),
        };
        self.store
            .set(keys::TOKEN, token)
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        let user = parse_user(response.body.get("user"));
        if let Some(user) = &user {
            save_json(self.store.as_ref(), keys::USER, user)
                .map_err(|e| AuthError::Storage(e.to_string()))?;
        }
        info!(user_id = user.as_ref().map(|u| u.id.as_str()), "Logged in");
        Ok(user)
    }

    /// Ends the session. The local session is removed even if the server call fails.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), AuthError> {
        let mut request = ApiRequest::get(paths::LOGOUT);
        if let Some(token) = self.token() {
            request = request.with_bearer(token);
        }
        if let Err(e) = self.transport.send(request).await {
            warn!(error = %e, "Logout request failed, clearing local session anyway");
        }

        let token = self.store.remove(keys::TOKEN);
        let user = self.store.remove(keys::USER);
        token.and(user).map_err(|e| AuthError::Storage(e.to_string()))?;
        info!("Logged out");
        Ok(())
    }

    /// The stored user, if it is usable.
    pub fn current_user(&self) -> Option<UserIdentity> {
        match load_json::<UserIdentity>(self.store.as_ref(), keys::USER) {
            Ok(user) => user.filter(UserIdentity::is_valid),
            Err(e) => {
                warn!(error = %e, "Could not read stored user");
                None
            }
        }
    }

    pub fn token(&self) -> Option<String> {
        match self.store.get(keys::TOKEN) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Could not read stored token");
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

fn parse_user(value: Option<&Value>) -> Option<UserIdentity> {
    value
        .and_then(|v| serde_json::from_value::<UserIdentity>(v.clone()).ok())
        .filter(UserIdentity::is_valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::Notice;
    use crate::storage::MemoryStore;
    use crate::transport::{ApiResponse, TransportError};
    use async_trait::async_trait;

    /// Answers every request with the same response.
    struct Canned(ApiResponse);

    #[async_trait]
    impl Transport for Canned {
        async fn send(&self, _request: ApiRequest) -> Result<ApiResponse, TransportError> {
            Ok(self.0.clone())
        }
    }

    struct Offline;

    #[async_trait]
    impl Transport for Offline {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
            Err(TransportError::Unreachable(request.path))
        }
    }

    #[tokio::test]
    async fn test_password_mismatch_sends_nothing() {
        let auth = AuthService::new(Arc::new(Offline), Arc::new(MemoryStore::new()));
        let err = auth.register("Ada", "ada@example.com", "a", "b").await.unwrap_err();
        assert_eq!(err, AuthError::PasswordMismatch);
    }

    #[tokio::test]
    async fn test_success_without_token() {
        let response = ApiResponse::new(200, json!({ "success": true }));
        let auth = AuthService::new(Arc::new(Canned(response)), Arc::new(MemoryStore::new()));
        let err = auth.login("ada@example.com", "secret").await.unwrap_err();
        assert_eq!(err, AuthError::MissingToken);
        assert!(!auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_rejected_login_uses_server_message() {
        let response = ApiResponse::new(401, json!({ "message": "Invalid email or password" }));
        let auth = AuthService::new(Arc::new(Canned(response)), Arc::new(MemoryStore::new()));
        let err = auth.login("ada@example.com", "nope").await.unwrap_err();
        assert_eq!(err.notice(), "Invalid email or password");

        let response = ApiResponse::new(500, Value::Null);
        let auth = AuthService::new(Arc::new(Canned(response)), Arc::new(MemoryStore::new()));
        let err = auth.login("ada@example.com", "nope").await.unwrap_err();
        assert_eq!(err, AuthError::Rejected("Login failed".to_string()));
    }

    #[tokio::test]
    async fn test_logout_clears_session_when_offline() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::TOKEN, "abc").unwrap();
        store.set(keys::USER, r#"{"id":"1","name":"Ada"}"#).unwrap();

        let auth = AuthService::new(Arc::new(Offline), store.clone());
        assert_eq!(auth.current_user().unwrap().name, "Ada");

        auth.logout().await.unwrap();
        assert!(!auth.is_authenticated());
        assert_eq!(auth.current_user(), None);
    }
}
