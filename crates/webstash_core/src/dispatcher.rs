//! Routes get/set calls to the adapter for a requested backend name.
//!
//! ## Fallback policy
//!
//! A request naming a backend that is unknown, not registered, or not
//! present in the environment is **not** an error. The dispatcher silently
//! substitutes its fallback backend (the cookie store unless configured
//! otherwise) and carries on. Callers therefore cannot tell an explicit
//! request for the fallback backend from a bad name that fell back to it;
//! use [`Dispatcher::is_available`] beforehand when that matters.

use std::collections::BTreeMap;
use webstash_storage::{BackendKind, StorageAdapter, StorageError, StorageResult};

/// Selects a storage adapter per call and forwards the operation to it.
pub struct Dispatcher {
    adapters: BTreeMap<BackendKind, Box<dyn StorageAdapter>>,
    fallback: BackendKind,
}

impl Dispatcher {
    /// Creates a dispatcher with no adapters and the cookie store as fallback.
    #[must_use]
    pub fn new() -> Self {
        Self {
            adapters: BTreeMap::new(),
            fallback: BackendKind::Cookie,
        }
    }

    /// Registers an adapter under the kind it reports, replacing any
    /// adapter previously registered for that kind.
    #[must_use]
    pub fn with_adapter(mut self, adapter: Box<dyn StorageAdapter>) -> Self {
        self.register(adapter);
        self
    }

    /// Sets the backend used when a request cannot be honoured.
    #[must_use]
    pub fn with_fallback(mut self, kind: BackendKind) -> Self {
        self.fallback = kind;
        self
    }

    /// Registers an adapter under the kind it reports.
    pub fn register(&mut self, adapter: Box<dyn StorageAdapter>) {
        self.adapters.insert(adapter.kind(), adapter);
    }

    /// Returns the fallback backend.
    #[must_use]
    pub fn fallback(&self) -> BackendKind {
        self.fallback
    }

    /// Returns true if `name` is a recognized backend whose adapter is
    /// registered and present in this environment.
    #[must_use]
    pub fn is_available(&self, name: &str) -> bool {
        BackendKind::from_name(name)
            .and_then(|kind| self.adapters.get(&kind))
            .is_some_and(|adapter| adapter.is_available())
    }

    /// Resolves a requested backend name, applying the fallback policy.
    #[must_use]
    pub fn resolve(&self, name: &str) -> BackendKind {
        match BackendKind::from_name(name) {
            Some(kind) if self.is_available(name) => kind,
            _ => {
                tracing::debug!(
                    requested = name,
                    fallback = %self.fallback,
                    "backend unavailable, using fallback"
                );
                self.fallback
            }
        }
    }

    /// Returns the adapter registered for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if no adapter is registered.
    pub fn adapter(&self, kind: BackendKind) -> StorageResult<&dyn StorageAdapter> {
        self.adapters
            .get(&kind)
            .map(|adapter| &**adapter)
            .ok_or(StorageError::unavailable(kind))
    }

    /// Stores `value` under `key` on the resolved backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolved backend is unavailable or rejects
    /// the write.
    pub fn set_item(&self, backend: &str, key: &str, value: &str) -> StorageResult<()> {
        let kind = self.resolve(backend);
        self.adapter(kind)?.set(key, value)?;
        tracing::trace!(backend = %kind, key, "stored item");
        Ok(())
    }

    /// Reads the value under `key` from the resolved backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolved backend is unavailable or the read
    /// fails. An absent value is `Ok(None)`.
    pub fn get_item(&self, backend: &str, key: &str) -> StorageResult<Option<String>> {
        let kind = self.resolve(backend);
        self.adapter(kind)?.get(key)
    }

    /// Stores `value` under `key` on the resolved backend unless a value is
    /// already present, and returns whichever value ends up stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolved backend is unavailable or the
    /// operation fails.
    pub fn set_item_if_absent(
        &self,
        backend: &str,
        key: &str,
        value: &str,
    ) -> StorageResult<String> {
        let kind = self.resolve(backend);
        self.adapter(kind)?.set_if_absent(key, value)
    }

    /// [`set_item`](Self::set_item) reduced to a success flag.
    pub fn set_item_flag(&self, backend: &str, key: &str, value: &str) -> bool {
        self.set_item(backend, key, value).is_ok()
    }

    /// [`get_item`](Self::get_item) with absence and failure both mapped
    /// to `None`.
    pub fn get_item_flag(&self, backend: &str, key: &str) -> Option<String> {
        self.get_item(backend, key).ok().flatten()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("backends", &self.adapters.keys().collect::<Vec<_>>())
            .field("fallback", &self.fallback)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webstash_storage::{CookieStore, InMemoryCookieJar, InMemoryStore};

    fn full() -> Dispatcher {
        Dispatcher::new()
            .with_adapter(Box::new(InMemoryStore::durable()))
            .with_adapter(Box::new(InMemoryStore::session()))
            .with_adapter(Box::new(CookieStore::new(Box::new(InMemoryCookieJar::new()))))
    }

    #[test]
    fn set_then_get_local() {
        let d = full();
        d.set_item("localStorage", "user", "alice").unwrap();
        assert_eq!(
            d.get_item("localStorage", "user").unwrap().as_deref(),
            Some("alice")
        );
    }

    #[test]
    fn backends_are_isolated() {
        let d = full();
        d.set_item("sessionStorage", "user", "alice").unwrap();
        assert_eq!(d.get_item("localStorage", "user").unwrap(), None);
        assert_eq!(d.get_item("cookie", "user").unwrap(), None);
    }

    #[test]
    fn bogus_name_falls_back_to_cookie() {
        let d = full();
        assert!(!d.is_available("bogus"));
        assert_eq!(d.resolve("bogus"), BackendKind::Cookie);

        d.set_item("bogus", "user", "alice").unwrap();
        assert_eq!(d.get_item("cookie", "user").unwrap().as_deref(), Some("alice"));
    }

    #[test]
    fn unavailable_backend_falls_back() {
        let d = full().with_adapter(Box::new(InMemoryStore::unavailable(BackendKind::Session)));
        assert!(!d.is_available("sessionStorage"));
        assert_eq!(d.resolve("sessionStorage"), BackendKind::Cookie);
    }

    #[test]
    fn unregistered_backend_falls_back() {
        let d = Dispatcher::new()
            .with_adapter(Box::new(InMemoryStore::durable()))
            .with_fallback(BackendKind::Durable);
        assert_eq!(d.resolve("sessionStorage"), BackendKind::Durable);

        d.set_item("sessionStorage", "k", "v").unwrap();
        assert_eq!(d.get_item("localStorage", "k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn detached_cookie_fallback_fails_without_panicking() {
        let d = Dispatcher::new()
            .with_adapter(Box::new(InMemoryStore::durable()))
            .with_adapter(Box::new(CookieStore::detached()));

        assert!(d.set_item("bogus", "k", "v").unwrap_err().is_unavailable());
        assert!(d.get_item("cookie", "k").unwrap_err().is_unavailable());
        assert!(!d.set_item_flag("bogus", "k", "v"));
        assert_eq!(d.get_item_flag("bogus", "k"), None);
    }

    #[test]
    fn missing_fallback_adapter_is_unavailable() {
        let d = Dispatcher::new();
        assert!(matches!(
            d.get_item("localStorage", "k"),
            Err(StorageError::Unavailable {
                backend: BackendKind::Cookie
            })
        ));
    }

    #[test]
    fn flag_shims_mirror_results() {
        let d = full();
        assert!(d.set_item_flag("localStorage", "k", "v"));
        assert_eq!(d.get_item_flag("localStorage", "k").as_deref(), Some("v"));
        assert_eq!(d.get_item_flag("localStorage", "missing"), None);
    }

    #[test]
    fn set_if_absent_goes_through_resolution() {
        let d = full();
        assert_eq!(d.set_item_if_absent("nope", "key", "a").unwrap(), "a");
        assert_eq!(d.set_item_if_absent("cookie", "key", "b").unwrap(), "a");
    }
}
