//! Frontend-only backend for the auth routes.
//!
//! Accounts live under [`keys::MOCK_USERS`] in the same store as the cart.
//! Passwords and tokens are plain base64: this backend exists so the shop can
//! be exercised without a server, it is not a security boundary.

use super::{paths, ApiRequest, ApiResponse, Method, Transport, TransportError};
use crate::model::MockAccount;
use crate::storage::{keys, load_json, save_json, KeyValueStore};
use crate::util::{now_millis, now_rfc3339};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

#[derive(Debug, Default, Deserialize)]
struct Credentials {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

/// [`Transport`] that serves `/api/auth/*` from the local store.
pub struct MockTransport {
    store: Arc<dyn KeyValueStore>,
    // Serializes read-modify-write of the account list.
    accounts: Mutex<()>,
}

impl MockTransport {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            accounts: Mutex::new(()),
        }
    }

    fn load_accounts(&self) -> Result<Vec<MockAccount>, TransportError> {
        load_json(self.store.as_ref(), keys::MOCK_USERS)
            .map(Option::unwrap_or_default)
            .map_err(|e| TransportError::Backend(e.to_string()))
    }

    async fn register(&self, body: Option<Value>) -> Result<ApiResponse, TransportError> {
        let creds = parse_credentials(body);
        if creds.name.trim().is_empty() || creds.email.trim().is_empty() || creds.password.is_empty() {
            return Ok(ApiResponse::new(400, json!({ "message": "Name, email and password are required" })));
        }

        let _guard = self.accounts.lock().await;
        let mut accounts = self.load_accounts()?;
        if accounts.iter().any(|a| a.email == creds.email) {
            return Ok(ApiResponse::new(400, json!({ "message": "User already exists with this email" })));
        }

        let account = MockAccount {
            id: now_millis().to_string(),
            name: creds.name,
            email: creds.email,
            password: STANDARD.encode(&creds.password),
            created_at: now_rfc3339(),
        };
        let user = account.identity();
        accounts.push(account);
        save_json(self.store.as_ref(), keys::MOCK_USERS, &accounts)
            .map_err(|e| TransportError::Backend(e.to_string()))?;

        info!(user_id = %user.id, "Mock account registered");
        Ok(ApiResponse::new(
            200,
            json!({ "success": true, "message": "Registration successful", "user": user }),
        ))
    }

    async fn login(&self, body: Option<Value>) -> Result<ApiResponse, TransportError> {
        let creds = parse_credentials(body);
        let accounts = self.load_accounts()?;
        let encoded = STANDARD.encode(&creds.password);

        match accounts.iter().find(|a| a.email == creds.email && a.password == encoded) {
            Some(account) => {
                let token = STANDARD.encode(format!("{}:{}", account.id, now_millis()));
                Ok(ApiResponse::new(
                    200,
                    json!({ "success": true, "token": token, "user": account.identity() }),
                ))
            }
            None => {
                warn!("Mock login rejected");
                Ok(ApiResponse::new(401, json!({ "message": "Invalid email or password" })))
            }
        }
    }

    /// Resolves the account id embedded in a token issued by [`Self::login`].
    fn me(&self, bearer: Option<&str>) -> Result<ApiResponse, TransportError> {
        let unauthorized = || ApiResponse::new(401, json!({ "message": "Not authenticated" }));
        let Some(id) = bearer.and_then(token_account_id) else {
            return Ok(unauthorized());
        };

        let accounts = self.load_accounts()?;
        Ok(match accounts.iter().find(|a| a.id == id) {
            Some(account) => ApiResponse::new(200, json!(account.identity())),
            None => unauthorized(),
        })
    }
}

fn parse_credentials(body: Option<Value>) -> Credentials {
    body.and_then(|b| serde_json::from_value(b).ok()).unwrap_or_default()
}

fn token_account_id(token: &str) -> Option<String> {
    let decoded = STANDARD.decode(token).ok()?;
    let text = String::from_utf8(decoded).ok()?;
    let (id, _) = text.split_once(':')?;
    Some(id.to_string())
}

#[async_trait]
impl Transport for MockTransport {
    #[instrument(skip(self, request), fields(method = ?request.method, path = %request.path))]
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        match (request.method, request.path.as_str()) {
            (Method::Post, paths::REGISTER) => self.register(request.body).await,
            (Method::Post, paths::LOGIN) => self.login(request.body).await,
            (_, paths::LOGOUT) => Ok(ApiResponse::new(
                200,
                json!({ "success": true, "message": "Logged out successfully" }),
            )),
            (Method::Get, paths::ME) => self.me(request.bearer.as_deref()),
            (_, path) => Err(TransportError::Unreachable(path.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn register_body(email: &str) -> Value {
        json!({ "name": "Ada", "email": email, "password": "secret" })
    }

    #[tokio::test]
    async fn test_register_then_duplicate() {
        let store = Arc::new(MemoryStore::new());
        let transport = MockTransport::new(store.clone());

        let first = transport
            .send(ApiRequest::post(paths::REGISTER, register_body("ada@example.com")))
            .await
            .unwrap();
        assert_eq!(first.status, 200);
        assert_eq!(first.body["user"]["name"], "Ada");
        assert!(store.get(keys::MOCK_USERS).unwrap().unwrap().contains("c2VjcmV0"));

        let second = transport
            .send(ApiRequest::post(paths::REGISTER, register_body("ada@example.com")))
            .await
            .unwrap();
        assert_eq!(second.status, 400);
        assert_eq!(second.message(), Some("User already exists with this email"));
    }

    #[tokio::test]
    async fn test_login_token_resolves_through_me() {
        let transport = MockTransport::new(Arc::new(MemoryStore::new()));
        transport
            .send(ApiRequest::post(paths::REGISTER, register_body("ada@example.com")))
            .await
            .unwrap();

        let bad = transport
            .send(ApiRequest::post(
                paths::LOGIN,
                json!({ "email": "ada@example.com", "password": "wrong" }),
            ))
            .await
            .unwrap();
        assert_eq!(bad.status, 401);

        let ok = transport
            .send(ApiRequest::post(
                paths::LOGIN,
                json!({ "email": "ada@example.com", "password": "secret" }),
            ))
            .await
            .unwrap();
        let token = ok.body["token"].as_str().unwrap().to_string();

        let me = transport
            .send(ApiRequest::get(paths::ME).with_bearer(token))
            .await
            .unwrap();
        assert_eq!(me.status, 200);
        assert_eq!(me.body["email"], "ada@example.com");

        let anonymous = transport.send(ApiRequest::get(paths::ME)).await.unwrap();
        assert_eq!(anonymous.status, 401);
    }

    #[tokio::test]
    async fn test_other_routes_are_unreachable() {
        let transport = MockTransport::new(Arc::new(MemoryStore::new()));
        let err = transport
            .send(ApiRequest::post(paths::ORDERS, json!({})))
            .await
            .unwrap_err();
        assert_eq!(err, TransportError::Unreachable(paths::ORDERS.to_string()));
    }
}
