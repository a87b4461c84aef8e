//! Error types for webstash core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in webstash core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Storage adapter error.
    #[error("storage error: {0}")]
    Storage(#[from] webstash_storage::StorageError),

    /// Encryption failed.
    #[error("encryption failed: {message}")]
    EncryptionFailed {
        /// Description of the failure.
        message: String,
    },

    /// Decryption failed (wrong key or tampered value).
    #[error("decryption failed: {message}")]
    DecryptionFailed {
        /// Description of the failure.
        message: String,
    },

    /// Stored value is not in the encrypted envelope format.
    #[error("invalid ciphertext: {message}")]
    InvalidCiphertext {
        /// Description of what is wrong with the input.
        message: String,
    },

    /// Deriving a cipher key from the password failed.
    #[error("key derivation failed: {message}")]
    KeyDerivationFailed {
        /// Description of the failure.
        message: String,
    },

    /// Encryption was requested but no key could be resolved.
    #[error("encryption key missing for backend {backend}")]
    EncryptionKeyMissing {
        /// The backend the key was looked up on.
        backend: String,
    },

    /// A value write targeted the reserved encryption key name.
    #[error("'{name}' is reserved for the encryption key")]
    ReservedKey {
        /// The reserved name.
        name: String,
    },

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

impl CoreError {
    /// Creates an encryption failed error.
    pub fn encryption_failed(message: impl Into<String>) -> Self {
        Self::EncryptionFailed {
            message: message.into(),
        }
    }

    /// Creates a decryption failed error.
    pub fn decryption_failed(message: impl Into<String>) -> Self {
        Self::DecryptionFailed {
            message: message.into(),
        }
    }

    /// Creates an invalid ciphertext error.
    pub fn invalid_ciphertext(message: impl Into<String>) -> Self {
        Self::InvalidCiphertext {
            message: message.into(),
        }
    }

    /// Creates a key derivation failed error.
    pub fn key_derivation_failed(message: impl Into<String>) -> Self {
        Self::KeyDerivationFailed {
            message: message.into(),
        }
    }

    /// Creates a reserved key error.
    pub fn reserved_key(name: impl Into<String>) -> Self {
        Self::ReservedKey { name: name.into() }
    }

    /// Creates an encryption key missing error.
    pub fn encryption_key_missing(backend: impl Into<String>) -> Self {
        Self::EncryptionKeyMissing {
            backend: backend.into(),
        }
    }
}
