//! # webstash core
//!
//! One API to persist and retrieve named string values across the durable,
//! session and cookie stores, with optional encryption at rest.
//!
//! This crate provides:
//! - [`Dispatcher`] - backend selection with fall-back-over-failure
//! - [`KeyManager`] - generate-once, persist, reuse encryption key bootstrap
//! - [`ValueCodec`] - conditional encrypt/decrypt of stored values
//! - [`generate_identifier`] - RFC-4122 v4 identifiers used as key material
//! - [`Stash`] - a configured facade over all of the above
//! - [`FormBinding`] - load and save form fields through a stash
//!
//! ## Example
//!
//! ```rust
//! use webstash_core::{Stash, StashConfig};
//!
//! let stash = Stash::in_memory(StashConfig::new().backend_name("sessionStorage"));
//! stash.set("user", "alice").unwrap();
//! assert_eq!(stash.get("user").unwrap().as_deref(), Some("alice"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod cipher;
mod codec;
mod config;
mod dispatcher;
mod error;
mod form;
pub mod identifier;
mod keys;
mod stash;

pub use cipher::{AesGcmCipher, Cipher};
pub use codec::ValueCodec;
pub use config::{StashConfig, DEFAULT_RESERVED_KEY_NAME};
pub use dispatcher::Dispatcher;
pub use error::{CoreError, CoreResult};
pub use form::{FormBinding, FormFields, MapForm};
pub use identifier::{generate_identifier, generate_identifier_with};
pub use keys::{KeyManager, KeyRequest};
pub use stash::{Request, Response, Stash};

pub use webstash_storage::{BackendKind, StorageAdapter, StorageError, StorageResult};
