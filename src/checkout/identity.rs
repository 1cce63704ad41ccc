use crate::model::UserIdentity;
use crate::storage::{keys, load_json, save_json, KeyValueStore};
use crate::transport::{paths, ApiRequest, Transport};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Works out who an order is for.
///
/// In priority order: the cached `user` entry, the user behind the stored
/// `token` (fetched from `/api/auth/me` and cached), or a fresh guest.
/// Resolution never fails.
#[derive(Clone)]
pub struct IdentityResolver {
    transport: Arc<dyn Transport>,
    store: Arc<dyn KeyValueStore>,
}

impl IdentityResolver {
    pub fn new(transport: Arc<dyn Transport>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { transport, store }
    }

    #[instrument(skip(self))]
    pub async fn resolve(&self) -> UserIdentity {
        if let Some(user) = self.cached() {
            debug!(user_id = %user.id, "Using cached identity");
            return user;
        }
        if let Some(user) = self.fetch_remote().await {
            debug!(user_id = %user.id, "Using session identity");
            return user;
        }
        let guest = UserIdentity::guest();
        debug!(user_id = %guest.id, "Using guest identity");
        guest
    }

    fn cached(&self) -> Option<UserIdentity> {
        match load_json::<UserIdentity>(self.store.as_ref(), keys::USER) {
            Ok(user) => user.filter(UserIdentity::is_valid),
            Err(e) => {
                warn!(error = %e, "Could not read cached identity");
                None
            }
        }
    }

    async fn fetch_remote(&self) -> Option<UserIdentity> {
        let token = match self.store.get(keys::TOKEN) {
            Ok(token) => token.filter(|t| !t.is_empty())?,
            Err(e) => {
                warn!(error = %e, "Could not read session token");
                return None;
            }
        };

        let response = match self.transport.send(ApiRequest::get(paths::ME).with_bearer(token)).await {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                debug!(status = response.status, "Session lookup refused");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Session lookup failed");
                return None;
            }
        };

        let user = serde_json::from_value::<UserIdentity>(response.body)
            .ok()
            .filter(UserIdentity::is_valid)?;
        if let Err(e) = save_json(self.store.as_ref(), keys::USER, &user) {
            warn!(error = %e, "Could not cache identity");
        }
        Some(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::transport::{ApiResponse, TransportError};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MeEndpoint {
        calls: AtomicUsize,
        response: Result<ApiResponse, TransportError>,
    }

    #[async_trait]
    impl Transport for MeEndpoint {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(request.path, paths::ME);
            assert_eq!(request.bearer.as_deref(), Some("tok"));
            self.response.clone()
        }
    }

    fn me(response: Result<ApiResponse, TransportError>) -> Arc<MeEndpoint> {
        Arc::new(MeEndpoint {
            calls: AtomicUsize::new(0),
            response,
        })
    }

    #[tokio::test]
    async fn test_cached_identity_skips_network() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::USER, r#"{"id":"u1","name":"Ada"}"#).unwrap();
        store.set(keys::TOKEN, "tok").unwrap();
        let transport = me(Err(TransportError::Timeout));

        let user = IdentityResolver::new(transport.clone(), store).resolve().await;
        assert_eq!(user.id, "u1");
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_token_lookup_is_cached() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::USER, r#"{"name":"no id"}"#).unwrap();
        store.set(keys::TOKEN, "tok").unwrap();
        let transport = me(Ok(ApiResponse::new(200, json!({ "id": "u7", "name": "Grace" }))));

        let user = IdentityResolver::new(transport, store.clone()).resolve().await;
        assert_eq!(user.name, "Grace");
        assert!(store.get(keys::USER).unwrap().unwrap().contains("u7"));
    }

    #[tokio::test]
    async fn test_failures_fall_back_to_guest() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::USER, "{corrupt").unwrap();
        store.set(keys::TOKEN, "tok").unwrap();

        let user = IdentityResolver::new(me(Err(TransportError::Timeout)), store.clone())
            .resolve()
            .await;
        assert!(user.is_guest());
        assert_eq!(user.name, "Guest User");
        assert_eq!(store.get(keys::USER).unwrap(), None);

        let user = IdentityResolver::new(me(Ok(ApiResponse::new(401, json!({})))), store.clone())
            .resolve()
            .await;
        assert!(user.is_guest());
    }
}
