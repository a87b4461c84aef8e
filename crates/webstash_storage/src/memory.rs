//! In-memory key/value store.

use crate::backend::{non_empty, StorageAdapter};
use crate::error::{StorageError, StorageResult};
use crate::kind::BackendKind;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// An in-memory key/value store.
///
/// This store keeps all entries in memory and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Native hosts where the durable or session scope only has to live as
///   long as the process
///
/// # Thread Safety
///
/// This store is thread-safe and can be shared across threads.
/// [`set_if_absent`](StorageAdapter::set_if_absent) is atomic.
///
/// # Example
///
/// ```rust
/// use webstash_storage::{InMemoryStore, StorageAdapter};
///
/// let store = InMemoryStore::durable();
/// store.set("user", "alice").unwrap();
/// assert_eq!(store.get("user").unwrap().as_deref(), Some("alice"));
/// ```
#[derive(Debug)]
pub struct InMemoryStore {
    kind: BackendKind,
    available: bool,
    entries: RwLock<BTreeMap<String, String>>,
}

impl InMemoryStore {
    /// Creates an empty store serving the given backend kind.
    #[must_use]
    pub fn new(kind: BackendKind) -> Self {
        Self {
            kind,
            available: true,
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Creates an empty durable-scope store.
    #[must_use]
    pub fn durable() -> Self {
        Self::new(BackendKind::Durable)
    }

    /// Creates an empty session-scope store.
    #[must_use]
    pub fn session() -> Self {
        Self::new(BackendKind::Session)
    }

    /// Creates a store that reports itself as absent.
    ///
    /// Every read and write fails with [`StorageError::Unavailable`].
    /// Useful for exercising fallback paths.
    #[must_use]
    pub fn unavailable(kind: BackendKind) -> Self {
        Self {
            available: false,
            ..Self::new(kind)
        }
    }

    /// Creates a store with pre-existing entries.
    #[must_use]
    pub fn with_entries<I, K, V>(kind: BackendKind, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: RwLock::new(entries),
            ..Self::new(kind)
        }
    }

    /// Returns a copy of all entries.
    #[must_use]
    pub fn entries(&self) -> BTreeMap<String, String> {
        self.entries.read().clone()
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if no entries are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    fn check_available(&self) -> StorageResult<()> {
        if self.available {
            Ok(())
        } else {
            Err(StorageError::unavailable(self.kind))
        }
    }
}

impl StorageAdapter for InMemoryStore {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.check_available()?;
        Ok(non_empty(self.entries.read().get(key).cloned()))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.check_available()?;
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn set_if_absent(&self, key: &str, value: &str) -> StorageResult<String> {
        self.check_available()?;
        let mut entries = self.entries.write();
        match entries.get(key) {
            Some(existing) if !existing.is_empty() => Ok(existing.clone()),
            _ => {
                entries.insert(key.to_string(), value.to_string());
                Ok(value.to_string())
            }
        }
    }
}
