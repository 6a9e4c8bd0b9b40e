//! Persistent key-value storage.
//!
//! Both stores keep their state as a single JSON record in a [`KeyValueStore`]
//! and write it through on every mutation. Backends:
//!
//! - [`MemoryStore`] - process-local map, used in tests and previews
//! - [`FileStore`] - one JSON file per key under a data directory
//!
//! Every backend has a finite capacity. A write that would exceed it fails
//! with [`StorageError::QuotaExceeded`]; callers keep their in-memory state and
//! report [`Durability::SessionOnly`] instead of failing the mutation.

mod file;
mod memory;

use std::fmt::Debug;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Default capacity for a store, matching what browsers give an origin.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Errors that can occur when reading or writing a store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The write would take the store past its capacity.
    #[error("storage quota exceeded writing {key}: {required} bytes needed, {available} available")]
    QuotaExceeded {
        key: String,
        required: usize,
        available: usize,
    },

    /// Key contains characters the backend cannot address.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// Filesystem error.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend lock poisoned by a panicking writer.
    #[error("storage backend unavailable")]
    Unavailable,
}

impl StorageError {
    /// Whether this is a capacity failure rather than a backend fault.
    #[must_use]
    pub const fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. })
    }
}

/// A durable, string-keyed, string-valued store.
///
/// Uses `&self` for all methods so one backend can be shared by the catalog
/// and the cart; implementations use interior mutability where needed.
pub trait KeyValueStore: Send + Sync + Debug {
    /// Retrieve a value by key. Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace a value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::QuotaExceeded`] if the store is full.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value. Succeeds even if the key did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// What happened to the persisted copy after a mutation.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Durability {
    /// Written through to the store.
    Persisted,
    /// Nothing changed, nothing written.
    Unchanged,
    /// In-memory state changed but the write failed; the change will not
    /// survive a reload. `warn_user` is set only the first time this happens
    /// for a given record.
    SessionOnly { warn_user: bool },
}

impl Durability {
    #[must_use]
    pub const fn is_persisted(self) -> bool {
        matches!(self, Self::Persisted)
    }

    /// Whether the user should be told their change may not persist.
    #[must_use]
    pub const fn needs_warning(self) -> bool {
        matches!(self, Self::SessionOnly { warn_user: true })
    }
}

/// One JSON record in a [`KeyValueStore`], with write-through bookkeeping.
#[derive(Debug)]
pub(crate) struct Record {
    storage: Arc<dyn KeyValueStore>,
    key: &'static str,
    warned: bool,
}

impl Record {
    pub(crate) fn new(storage: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            storage,
            key,
            warned: false,
        }
    }

    /// Read and decode the record.
    ///
    /// A missing record, an unreadable backend and an undecodable payload all
    /// come back as `None`; the last two are logged.
    pub(crate) fn load<T: DeserializeOwned>(&self) -> Option<T> {
        let raw = match self.storage.get(self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = self.key, error = %e, "Failed to read persisted record");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(
                    key = self.key,
                    error = %e,
                    "Discarding corrupt persisted record"
                );
                None
            }
        }
    }

    /// Serialize and write the record.
    pub(crate) fn save<T: Serialize + ?Sized>(&mut self, value: &T) -> Durability {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(key = self.key, error = %e, "Failed to serialize record");
                return self.session_only();
            }
        };

        match self.storage.set(self.key, &payload) {
            Ok(()) => Durability::Persisted,
            Err(e) => self.write_failed(&e),
        }
    }

    /// Delete the record from the store.
    pub(crate) fn purge(&mut self) -> Durability {
        match self.storage.remove(self.key) {
            Ok(()) => Durability::Persisted,
            Err(e) => self.write_failed(&e),
        }
    }

    fn write_failed(&mut self, error: &StorageError) -> Durability {
        if error.is_quota_exceeded() {
            tracing::warn!(key = self.key, error = %error, "Store full, change kept for this session only");
        } else {
            tracing::error!(key = self.key, error = %error, "Failed to persist record");
            crate::error::capture(error);
        }
        self.session_only()
    }

    fn session_only(&mut self) -> Durability {
        let warn_user = !self.warned;
        self.warned = true;
        Durability::SessionOnly { warn_user }
    }
}
