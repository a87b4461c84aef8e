//! Error types for storage operations.

use crate::kind::BackendKind;
use std::io;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
///
/// A missing value is not an error: adapters report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend facility is not present in this environment.
    #[error("storage backend unavailable: {backend}")]
    Unavailable {
        /// The backend that could not be reached.
        backend: BackendKind,
    },

    /// The backend refused the write.
    #[error("write to {backend} failed: {reason}")]
    WriteFailed {
        /// The backend that rejected the write.
        backend: BackendKind,
        /// Why the write was rejected.
        reason: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Persisted store contents could not be decoded.
    #[error("storage corrupted: {0}")]
    Corrupted(String),

    /// The store lock could not be acquired.
    #[error("failed to lock store: {0}")]
    Lock(String),
}

impl StorageError {
    /// Creates an unavailable-backend error.
    pub fn unavailable(backend: BackendKind) -> Self {
        Self::Unavailable { backend }
    }

    /// Creates a write failure error.
    pub fn write_failed(backend: BackendKind, reason: impl Into<String>) -> Self {
        Self::WriteFailed {
            backend,
            reason: reason.into(),
        }
    }

    /// Returns true if this error means the backend is absent rather than broken.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}
