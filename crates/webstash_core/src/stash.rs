//! The stash: one configured entry point over dispatch, keys and codec.

use crate::codec::ValueCodec;
use crate::config::StashConfig;
use crate::dispatcher::Dispatcher;
use crate::error::{CoreError, CoreResult};
use crate::keys::{KeyManager, KeyRequest};
use std::path::Path;
use webstash_storage::{CookieStore, FileStore, InMemoryCookieJar, InMemoryStore};

/// A single get or set against the configured backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Read the value stored under `name`.
    Get {
        /// Storage key.
        name: String,
    },
    /// Store `value` under `name`.
    Set {
        /// Storage key.
        name: String,
        /// Plaintext value.
        value: String,
    },
}

/// Outcome of a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Result of a get: the decoded value, if any.
    Value(Option<String>),
    /// A set completed.
    Stored,
}

/// Reads and writes named values through the configured backend,
/// encrypting them when configured to.
///
/// Every operation first makes sure an encryption key exists (when
/// encryption is on and no caller key was given), then encodes or decodes
/// the value and routes it through the [`Dispatcher`].
///
/// # Example
///
/// ```rust
/// use webstash_core::{Stash, StashConfig};
///
/// let stash = Stash::in_memory(StashConfig::new().encrypt(true));
/// stash.set("user", "alice").unwrap();
/// assert_eq!(stash.get("user").unwrap().as_deref(), Some("alice"));
/// ```
#[derive(Debug)]
pub struct Stash {
    config: StashConfig,
    dispatcher: Dispatcher,
    keys: KeyManager,
    codec: ValueCodec,
}

impl Stash {
    /// Creates a stash over the given dispatcher using the AES-GCM codec.
    #[must_use]
    pub fn new(config: StashConfig, dispatcher: Dispatcher) -> Self {
        let keys = KeyManager::new(config.reserved_key_name.clone());
        Self {
            config,
            dispatcher,
            keys,
            codec: ValueCodec::default(),
        }
    }

    /// Replaces the value codec.
    #[must_use]
    pub fn with_codec(mut self, codec: ValueCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Creates a stash whose three backends all live in memory.
    #[must_use]
    pub fn in_memory(config: StashConfig) -> Self {
        let cookies = CookieStore::new(Box::new(InMemoryCookieJar::new()))
            .with_expiry_days(config.cookie_expiry_days);
        let dispatcher = Dispatcher::new()
            .with_adapter(Box::new(InMemoryStore::durable()))
            .with_adapter(Box::new(InMemoryStore::session()))
            .with_adapter(Box::new(cookies));
        Self::new(config, dispatcher)
    }

    /// Creates a stash whose durable backend is persisted at `path`.
    /// Session and cookie scopes live in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the store file cannot be opened.
    pub fn open_file(config: StashConfig, path: &Path) -> CoreResult<Self> {
        let durable = FileStore::open_with_create_dirs(path)?;
        let cookies = CookieStore::new(Box::new(InMemoryCookieJar::new()))
            .with_expiry_days(config.cookie_expiry_days);
        let dispatcher = Dispatcher::new()
            .with_adapter(Box::new(durable))
            .with_adapter(Box::new(InMemoryStore::session()))
            .with_adapter(Box::new(cookies));
        Ok(Self::new(config, dispatcher))
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &StashConfig {
        &self.config
    }

    /// Returns the dispatcher.
    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Returns the key manager.
    #[must_use]
    pub fn key_manager(&self) -> &KeyManager {
        &self.keys
    }

    /// Returns the password currently protecting values, without
    /// bootstrapping one. `None` when encryption is off.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EncryptionKeyMissing`] if encryption is on, no
    /// caller key is set and no key has been bootstrapped yet.
    pub fn resolved_key(&self) -> CoreResult<Option<String>> {
        if !self.config.encrypt {
            return Ok(None);
        }
        if !self.config.key.is_empty() {
            return Ok(Some(self.config.key.clone()));
        }
        self.keys
            .require_key(&self.dispatcher, &self.config.backend_name)
            .map(Some)
    }

    fn prepare_key(&self) -> CoreResult<KeyRequest> {
        let mut request = KeyRequest {
            encrypt: self.config.encrypt,
            backend: self.config.backend_name.clone(),
            key: self.config.key.clone(),
        };
        self.keys.ensure(&self.dispatcher, &mut request)?;
        Ok(request)
    }

    /// Stores `value` under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is the reserved key name while encryption
    /// is on, or if key bootstrap, encryption or the write fails.
    pub fn set(&self, name: &str, value: &str) -> CoreResult<()> {
        if self.config.encrypt && name == self.keys.reserved_name() {
            return Err(CoreError::reserved_key(name));
        }
        let request = self.prepare_key()?;
        let stored = self.codec.encode(value, &request.key, request.encrypt)?;
        self.dispatcher
            .set_item(&self.config.backend_name, name, &stored)?;
        Ok(())
    }

    /// Reads the value stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if key bootstrap or the read fails, or if the
    /// stored value does not decrypt under the current key.
    pub fn get(&self, name: &str) -> CoreResult<Option<String>> {
        let request = self.prepare_key()?;
        self.dispatcher
            .get_item(&self.config.backend_name, name)?
            .map(|stored| self.codec.decode(&stored, &request.key, request.encrypt))
            .transpose()
    }

    /// Runs a single request.
    ///
    /// # Errors
    ///
    /// Returns whatever error [`get`](Self::get) or [`set`](Self::set)
    /// returns.
    pub fn handle(&self, request: Request) -> CoreResult<Response> {
        match request {
            Request::Get { name } => self.get(&name).map(Response::Value),
            Request::Set { name, value } => self.set(&name, &value).map(|()| Response::Stored),
        }
    }
}
