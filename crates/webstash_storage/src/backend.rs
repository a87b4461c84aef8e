//! Storage adapter trait definition.

use crate::error::StorageResult;
use crate::kind::BackendKind;

/// A raw key/value storage adapter.
///
/// Adapters are **opaque string stores**. Keys are caller-chosen strings and
/// values are always strings; adapters never interpret or transform what
/// they hold. Encryption happens above this layer.
///
/// # Invariants
///
/// - `get` returns `Ok(None)` when the key is absent or holds an empty string
/// - `set` overwrites any previous value under the same key
/// - a backend that is not present reports
///   [`StorageError::Unavailable`](crate::StorageError::Unavailable) and
///   never panics
/// - adapters must be `Send + Sync` so a dispatcher can be shared
///
/// # Implementors
///
/// - [`super::InMemoryStore`] - Durable or session scope held in memory
/// - [`super::FileStore`] - Durable scope persisted to a file
/// - [`super::CookieStore`] - Cookie scope over a [`super::CookieJar`]
pub trait StorageAdapter: Send + Sync {
    /// Returns the backend kind this adapter serves.
    fn kind(&self) -> BackendKind;

    /// Probes whether the underlying facility exists in this environment.
    fn is_available(&self) -> bool {
        true
    }

    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable or the read fails.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable or rejects the write.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Stores `value` under `key` only if no value is present.
    ///
    /// Returns the value that is stored under `key` once the call completes:
    /// either the existing one or `value`.
    ///
    /// The default implementation reads then writes and is only safe with a
    /// single writer. Adapters that can do better override it.
    ///
    /// # Errors
    ///
    /// Returns an error if the read or the write fails.
    fn set_if_absent(&self, key: &str, value: &str) -> StorageResult<String> {
        if let Some(existing) = self.get(key)? {
            return Ok(existing);
        }
        self.set(key, value)?;
        Ok(value.to_string())
    }
}

/// Maps an empty stored string to "absent".
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
