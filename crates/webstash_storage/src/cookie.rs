//! Cookie store and the cookie-handling collaborator it delegates to.

use crate::backend::{non_empty, StorageAdapter};
use crate::error::{StorageError, StorageResult};
use crate::kind::BackendKind;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::time::{Duration, SystemTime};

/// Expiration applied to every cookie write, in days.
pub const DEFAULT_COOKIE_EXPIRY_DAYS: u32 = 7;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Reads and writes individual cookies.
///
/// This is the external collaborator behind [`CookieStore`]. In a browser
/// it wraps `document.cookie`; natively it can be any cookie jar.
pub trait CookieJar: Send + Sync {
    /// Returns the cookie value for `name`, if set and not expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the jar cannot be read.
    fn cookie(&self, name: &str) -> StorageResult<Option<String>>;

    /// Sets a cookie that expires after `expires_days` days.
    ///
    /// # Errors
    ///
    /// Returns an error if the jar rejects the cookie.
    fn set_cookie(&self, name: &str, value: &str, expires_days: u32) -> StorageResult<()>;
}

/// Cookie-backed storage adapter.
///
/// A store built with [`CookieStore::detached`] has no jar: every read and
/// write reports [`StorageError::Unavailable`] instead of panicking.
pub struct CookieStore {
    jar: Option<Box<dyn CookieJar>>,
    expiry_days: u32,
}

impl CookieStore {
    /// Creates a cookie store over the given jar.
    #[must_use]
    pub fn new(jar: Box<dyn CookieJar>) -> Self {
        Self {
            jar: Some(jar),
            expiry_days: DEFAULT_COOKIE_EXPIRY_DAYS,
        }
    }

    /// Creates a cookie store with no jar attached.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            jar: None,
            expiry_days: DEFAULT_COOKIE_EXPIRY_DAYS,
        }
    }

    /// Sets the expiration applied to cookie writes.
    #[must_use]
    pub fn with_expiry_days(mut self, days: u32) -> Self {
        self.expiry_days = days;
        self
    }

    /// Returns the expiration applied to cookie writes, in days.
    #[must_use]
    pub fn expiry_days(&self) -> u32 {
        self.expiry_days
    }

    fn jar(&self) -> StorageResult<&dyn CookieJar> {
        self.jar
            .as_deref()
            .ok_or(StorageError::unavailable(BackendKind::Cookie))
    }
}

impl std::fmt::Debug for CookieStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieStore")
            .field("attached", &self.jar.is_some())
            .field("expiry_days", &self.expiry_days)
            .finish()
    }
}

impl StorageAdapter for CookieStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Cookie
    }

    fn is_available(&self) -> bool {
        self.jar.is_some()
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(non_empty(self.jar()?.cookie(key)?))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.jar()?.set_cookie(key, value, self.expiry_days)
    }
}

/// An in-memory cookie jar that honours expiration.
#[derive(Debug, Default)]
pub struct InMemoryCookieJar {
    cookies: RwLock<BTreeMap<String, (String, SystemTime)>>,
}

impl InMemoryCookieJar {
    /// Creates an empty jar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns when the named cookie expires, if it is set.
    #[must_use]
    pub fn expires_at(&self, name: &str) -> Option<SystemTime> {
        self.cookies.read().get(name).map(|(_, at)| *at)
    }

    /// Drops every expired cookie.
    pub fn purge_expired(&self) {
        let now = SystemTime::now();
        self.cookies.write().retain(|_, (_, at)| *at > now);
    }
}

impl CookieJar for InMemoryCookieJar {
    fn cookie(&self, name: &str) -> StorageResult<Option<String>> {
        let now = SystemTime::now();
        Ok(self
            .cookies
            .read()
            .get(name)
            .filter(|(_, at)| *at > now)
            .map(|(value, _)| value.clone()))
    }

    fn set_cookie(&self, name: &str, value: &str, expires_days: u32) -> StorageResult<()> {
        let lifetime = Duration::from_secs(u64::from(expires_days) * SECONDS_PER_DAY);
        let expires = SystemTime::now()
            .checked_add(lifetime)
            .ok_or_else(|| StorageError::write_failed(BackendKind::Cookie, "expiry overflow"))?;
        self.cookies
            .write()
            .insert(name.to_string(), (value.to_string(), expires));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_set_then_get() {
        let store = CookieStore::new(Box::new(InMemoryCookieJar::new()));
        store.set("user", "alice").unwrap();
        assert_eq!(store.get("user").unwrap().as_deref(), Some("alice"));
    }

    #[test]
    fn cookie_detached_reports_unavailable() {
        let store = CookieStore::detached();
        assert!(!store.is_available());
        assert!(store.get("user").unwrap_err().is_unavailable());
        assert!(store.set("user", "alice").unwrap_err().is_unavailable());
    }

    #[test]
    fn cookie_writes_expire_after_seven_days() {
        let jar = InMemoryCookieJar::new();
        let before = SystemTime::now();
        jar.set_cookie("user", "alice", DEFAULT_COOKIE_EXPIRY_DAYS).unwrap();
        let expires = jar.expires_at("user").unwrap();
        let lifetime = expires.duration_since(before).unwrap();

        assert!(lifetime >= Duration::from_secs(7 * SECONDS_PER_DAY));
        assert!(lifetime < Duration::from_secs(7 * SECONDS_PER_DAY + 60));
    }

    #[test]
    fn cookie_expired_reads_as_absent() {
        let jar = InMemoryCookieJar::new();
        jar.set_cookie("gone", "soon", 0).unwrap();
        assert_eq!(jar.cookie("gone").unwrap(), None);

        jar.purge_expired();
        assert_eq!(jar.expires_at("gone"), None);
    }

    #[test]
    fn cookie_store_uses_configured_expiry() {
        let store = CookieStore::new(Box::new(InMemoryCookieJar::new())).with_expiry_days(0);
        assert_eq!(store.expiry_days(), 0);
        store.set("user", "alice").unwrap();
        assert_eq!(store.get("user").unwrap(), None);
    }

    #[test]
    fn cookie_default_set_if_absent() {
        let store = CookieStore::new(Box::new(InMemoryCookieJar::new()));
        assert_eq!(store.set_if_absent("key", "one").unwrap(), "one");
        assert_eq!(store.set_if_absent("key", "two").unwrap(), "one");
    }
}
