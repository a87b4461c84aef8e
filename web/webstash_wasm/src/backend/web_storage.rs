//! `localStorage` / `sessionStorage` adapter.

use super::is_window_object;
use crate::error::describe;
use webstash_storage::{BackendKind, StorageAdapter, StorageError, StorageResult};
use web_sys::Storage;

/// Adapter over one of the page's Web Storage areas.
#[derive(Debug, Clone, Copy)]
pub struct WebStorage {
    kind: BackendKind,
}

impl WebStorage {
    /// Creates an adapter for the durable or session area.
    ///
    /// A cookie kind yields an adapter that is never available.
    #[must_use]
    pub fn new(kind: BackendKind) -> Self {
        Self { kind }
    }

    fn area(&self) -> StorageResult<Storage> {
        let window = web_sys::window().ok_or(StorageError::unavailable(self.kind))?;
        let area = match self.kind {
            BackendKind::Durable => window.local_storage(),
            BackendKind::Session => window.session_storage(),
            BackendKind::Cookie => Ok(None),
        };
        area.ok()
            .flatten()
            .ok_or(StorageError::unavailable(self.kind))
    }
}

impl StorageAdapter for WebStorage {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn is_available(&self) -> bool {
        self.kind != BackendKind::Cookie && is_window_object(self.kind.name())
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .area()?
            .get_item(key)
            .map_err(|_| StorageError::unavailable(self.kind))?;
        Ok(value.filter(|v| !v.is_empty()))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.area()?
            .set_item(key, value)
            .map_err(|e| StorageError::write_failed(self.kind, describe(&e)))
    }
}
