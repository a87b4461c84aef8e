//! Test fixtures and stash helpers.
//!
//! Provides convenience functions for setting up dispatchers and stashes
//! in common test scenarios.

use std::path::PathBuf;
use std::sync::Once;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;
use webstash_core::{Dispatcher, Stash, StashConfig};
use webstash_storage::{CookieStore, InMemoryCookieJar, InMemoryStore};

static TRACING: Once = Once::new();

/// Installs a test-friendly tracing subscriber once per process.
///
/// Honours `RUST_LOG`; defaults to `debug`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// A dispatcher with all three backends held in memory.
pub fn memory_dispatcher() -> Dispatcher {
    Dispatcher::new()
        .with_adapter(Box::new(InMemoryStore::durable()))
        .with_adapter(Box::new(InMemoryStore::session()))
        .with_adapter(Box::new(CookieStore::new(Box::new(InMemoryCookieJar::new()))))
}

/// A dispatcher whose cookie collaborator is missing.
pub fn dispatcher_without_cookies() -> Dispatcher {
    Dispatcher::new()
        .with_adapter(Box::new(InMemoryStore::durable()))
        .with_adapter(Box::new(InMemoryStore::session()))
        .with_adapter(Box::new(CookieStore::detached()))
}

/// A test stash with automatic cleanup.
pub struct TestStash {
    /// The stash instance.
    pub stash: Stash,
    /// The temporary directory (kept alive to prevent cleanup).
    temp_dir: Option<TempDir>,
}

impl TestStash {
    /// Creates a stash with every backend in memory.
    pub fn memory(config: StashConfig) -> Self {
        init_tracing();
        Self {
            stash: Stash::in_memory(config),
            temp_dir: None,
        }
    }

    /// Creates a stash whose durable backend is a file in a temp directory.
    pub fn file(config: StashConfig) -> Self {
        init_tracing();
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let stash = Stash::open_file(config, &temp_dir.path().join("stash.cbor"))
            .expect("Failed to open file stash");
        Self {
            stash,
            temp_dir: Some(temp_dir),
        }
    }

    /// Reopens a file-backed stash on the same file with a new config.
    ///
    /// Returns `None` for in-memory fixtures.
    pub fn reopen(&self, config: StashConfig) -> Option<Stash> {
        let path = self.path()?;
        Some(Stash::open_file(config, &path).expect("Failed to reopen file stash"))
    }

    /// Returns the store file path if file-based, None if in-memory.
    pub fn path(&self) -> Option<PathBuf> {
        self.temp_dir.as_ref().map(|d| d.path().join("stash.cbor"))
    }
}

impl std::ops::Deref for TestStash {
    type Target = Stash;

    fn deref(&self) -> &Self::Target {
        &self.stash
    }
}

/// Runs a test with a fresh in-memory stash.
pub fn with_memory_stash<F, R>(config: StashConfig, f: F) -> R
where
    F: FnOnce(&Stash) -> R,
{
    let fixture = TestStash::memory(config);
    f(&fixture.stash)
}

/// Runs a test with a fresh file-backed stash.
pub fn with_file_stash<F, R>(config: StashConfig, f: F) -> R
where
    F: FnOnce(&Stash) -> R,
{
    let fixture = TestStash::file(config);
    f(&fixture.stash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_fixture_works() {
        let fixture = TestStash::memory(StashConfig::default());
        fixture.set("k", "v").unwrap();
        assert_eq!(fixture.get("k").unwrap().as_deref(), Some("v"));
        assert!(fixture.path().is_none());
    }

    #[test]
    fn file_fixture_reopens() {
        let fixture = TestStash::file(StashConfig::default());
        fixture.set("k", "v").unwrap();

        let reopened = fixture.reopen(StashConfig::default()).unwrap();
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn with_helpers_return_values() {
        let got = with_memory_stash(StashConfig::default(), |stash| {
            stash.set("a", "1").unwrap();
            stash.get("a").unwrap()
        });
        assert_eq!(got.as_deref(), Some("1"));
    }
}
