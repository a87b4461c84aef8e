//! Stash configuration.

use crate::error::CoreResult;
use serde::{Deserialize, Serialize};
use webstash_storage::DEFAULT_COOKIE_EXPIRY_DAYS;

/// Default reserved name under which the encryption key is persisted.
pub const DEFAULT_RESERVED_KEY_NAME: &str = "key";

/// Configuration for a [`Stash`](crate::Stash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StashConfig {
    /// Requested backend name (`localStorage`, `sessionStorage`, `cookie`).
    /// Anything else falls back to the dispatcher's fallback backend.
    pub backend_name: String,

    /// Whether values are encrypted at rest.
    pub encrypt: bool,

    /// Caller-supplied password. When empty and `encrypt` is set, a key is
    /// bootstrapped in the backend under `reserved_key_name`.
    pub key: String,

    /// Storage key under which a bootstrapped encryption key is persisted.
    pub reserved_key_name: String,

    /// Lifetime of cookie writes, in days.
    pub cookie_expiry_days: u32,

    /// Form whose fields are bound to storage, if any.
    pub form_element_id: Option<String>,
}

impl Default for StashConfig {
    fn default() -> Self {
        Self {
            backend_name: "localStorage".to_string(),
            encrypt: false,
            key: String::new(),
            reserved_key_name: DEFAULT_RESERVED_KEY_NAME.to_string(),
            cookie_expiry_days: DEFAULT_COOKIE_EXPIRY_DAYS,
            form_element_id: None,
        }
    }
}

impl StashConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the requested backend name.
    #[must_use]
    pub fn backend_name(mut self, name: impl Into<String>) -> Self {
        self.backend_name = name.into();
        self
    }

    /// Sets whether values are encrypted.
    #[must_use]
    pub const fn encrypt(mut self, value: bool) -> Self {
        self.encrypt = value;
        self
    }

    /// Sets a caller-supplied password.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Sets the reserved name for the bootstrapped key.
    #[must_use]
    pub fn reserved_key_name(mut self, name: impl Into<String>) -> Self {
        self.reserved_key_name = name.into();
        self
    }

    /// Sets the cookie lifetime in days.
    #[must_use]
    pub const fn cookie_expiry_days(mut self, days: u32) -> Self {
        self.cookie_expiry_days = days;
        self
    }

    /// Sets the bound form.
    #[must_use]
    pub fn form_element_id(mut self, id: impl Into<String>) -> Self {
        self.form_element_id = Some(id.into());
        self
    }
}
