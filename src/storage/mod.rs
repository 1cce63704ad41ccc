//! # Local Persistent Store
//!
//! A synchronous key-value string store. Every stateful part of the shop keeps its
//! data under one key (see [`keys`]) as serialized JSON text.
//!
//! Each call is atomic on its own. There is no transaction spanning several keys,
//! so the cart, the session and the order history can drift apart if a sequence
//! of writes stops halfway.
//!
//! ## Implementations
//!
//! - [`MemoryStore`] - process-local map, used by tests and ephemeral sessions.
//! - [`FileStore`] - one JSON document on disk, rewritten atomically on every write.
//!
//! ## Corrupt entries
//!
//! [`load_json`] treats unparsable text as missing: the entry is removed and the
//! caller receives `None`. Nothing ever fails because a stored blob is damaged.

pub mod error;
pub mod file;
pub mod memory;

pub use error::*;
pub use file::FileStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// Keys used in the store.
pub mod keys {
    /// Serialized `Vec<LineItem>`.
    pub const CART: &str = "coffeeCart";
    /// Serialized `UserIdentity` of the signed-in user.
    pub const USER: &str = "user";
    /// Opaque session token.
    pub const TOKEN: &str = "token";
    /// Serialized `Vec<Order>`.
    pub const ORDERS: &str = "orders";
    /// Accounts known to the mock auth backend.
    pub const MOCK_USERS: &str = "mockUsers";
}

/// A key-value string store scoped to one shop session.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Reads and deserializes the value under `key`.
///
/// A value that does not parse is removed from the store and reported as absent.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!(key, error = %e, "Discarding corrupt entry");
            store.remove(key)?;
            Ok(None)
        }
    }
}

/// Serializes `value` and writes it under `key`.
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|e| StorageError::Serialize {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_json_discards_corrupt_entry() {
        let store = MemoryStore::new();
        store.set(keys::CART, "{not json").unwrap();

        let loaded: Option<Vec<u32>> = load_json(&store, keys::CART).unwrap();

        assert!(loaded.is_none());
        assert_eq!(store.get(keys::CART).unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        save_json(&store, keys::ORDERS, &vec![1u32, 2, 3]).unwrap();

        let loaded: Option<Vec<u32>> = load_json(&store, keys::ORDERS).unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = MemoryStore::new();
        let loaded: Option<String> = load_json(&store, keys::USER).unwrap();
        assert!(loaded.is_none());
    }
}
