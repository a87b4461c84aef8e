//! Encryption key bootstrap.
//!
//! The key is a random identifier persisted in the backend under a reserved
//! name. It is generated once and then reused for every encrypted value on
//! that backend. **The key must never regenerate once persisted**: every
//! value encrypted under it would become unreadable.
//!
//! ## Single writer
//!
//! Bootstrap holds a lock shared by every [`KeyManager`] in the process and
//! persists through
//! [`StorageAdapter::set_if_absent`](webstash_storage::StorageAdapter::set_if_absent).
//! The key returned is always the one read back from the backend after the
//! write, so two contexts racing to bootstrap agree on whichever key landed.

use crate::config::DEFAULT_RESERVED_KEY_NAME;
use crate::dispatcher::Dispatcher;
use crate::error::{CoreError, CoreResult};
use crate::identifier::generate_identifier;
use parking_lot::{const_mutex, Mutex};
use webstash_storage::StorageError;

/// Serializes key bootstrap across all managers and dispatchers.
static BOOTSTRAP: Mutex<()> = const_mutex(());

/// Options for a key bootstrap, updated in place by
/// [`KeyManager::ensure`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyRequest {
    /// Whether encryption is requested. When false, nothing happens.
    pub encrypt: bool,
    /// Requested backend name.
    pub backend: String,
    /// Password in use. Filled in by bootstrap when empty.
    pub key: String,
}

impl KeyRequest {
    /// Creates a request for the given backend with no caller key.
    #[must_use]
    pub fn new(backend: impl Into<String>, encrypt: bool) -> Self {
        Self {
            encrypt,
            backend: backend.into(),
            key: String::new(),
        }
    }
}

/// Bootstraps and reads the persisted encryption key.
#[derive(Debug)]
pub struct KeyManager {
    reserved_name: String,
}

impl KeyManager {
    /// Creates a manager persisting keys under `reserved_name`.
    #[must_use]
    pub fn new(reserved_name: impl Into<String>) -> Self {
        Self {
            reserved_name: reserved_name.into(),
        }
    }

    /// Returns the reserved storage key.
    #[must_use]
    pub fn reserved_name(&self) -> &str {
        &self.reserved_name
    }

    /// Returns the key persisted on `backend`, generating and persisting a
    /// fresh one if none exists yet.
    ///
    /// Idempotent: once a key is stored, every call returns it unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or written.
    pub fn ensure_key(&self, dispatcher: &Dispatcher, backend: &str) -> CoreResult<String> {
        if let Some(existing) = dispatcher.get_item(backend, &self.reserved_name)? {
            tracing::debug!(backend, reserved = %self.reserved_name, "reusing encryption key");
            return Ok(existing);
        }

        let _guard = BOOTSTRAP.lock();

        if let Some(existing) = dispatcher.get_item(backend, &self.reserved_name)? {
            tracing::debug!(
                backend,
                reserved = %self.reserved_name,
                "encryption key bootstrapped concurrently"
            );
            return Ok(existing);
        }

        let fresh = generate_identifier(None);
        dispatcher.set_item_if_absent(backend, &self.reserved_name, &fresh)?;

        let persisted = dispatcher
            .get_item(backend, &self.reserved_name)?
            .ok_or_else(|| {
                StorageError::write_failed(
                    dispatcher.resolve(backend),
                    "encryption key not readable after write",
                )
            })?;
        if persisted == fresh {
            tracing::info!(backend, reserved = %self.reserved_name, "generated encryption key");
        } else {
            tracing::warn!(
                backend,
                reserved = %self.reserved_name,
                "encryption key replaced during bootstrap, using stored key"
            );
        }
        Ok(persisted)
    }

    /// Fills in `request.key` when encryption is requested.
    ///
    /// A non-empty caller key is kept as the password and nothing is
    /// bootstrapped. With encryption off the request is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if bootstrap fails.
    pub fn ensure(&self, dispatcher: &Dispatcher, request: &mut KeyRequest) -> CoreResult<()> {
        if request.encrypt && request.key.is_empty() {
            request.key = self.ensure_key(dispatcher, &request.backend)?;
        }
        Ok(())
    }

    /// Returns the key persisted on `backend` without generating one.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EncryptionKeyMissing`] if no key is stored, or a
    /// storage error if the backend cannot be read.
    pub fn require_key(&self, dispatcher: &Dispatcher, backend: &str) -> CoreResult<String> {
        dispatcher
            .get_item(backend, &self.reserved_name)?
            .ok_or_else(|| CoreError::encryption_key_missing(dispatcher.resolve(backend).name()))
    }
}

impl Default for KeyManager {
    fn default() -> Self {
        Self::new(DEFAULT_RESERVED_KEY_NAME)
    }
}
