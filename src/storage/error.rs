//! Error types for the local store.

use crate::notice::Notice;
use thiserror::Error;

/// Errors raised by a [`KeyValueStore`](super::KeyValueStore).
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("Store I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A value could not be serialized before writing.
    #[error("Cannot serialize value for {key}: {reason}")]
    Serialize { key: String, reason: String },

    /// The store lock was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    Poisoned,
}

impl Notice for StorageError {
    fn notice(&self) -> String {
        "Your changes could not be saved on this device.".to_string()
    }
}
