//! # webstash storage
//!
//! Storage adapter trait and native adapters for webstash.
//!
//! This crate provides the lowest-level storage abstraction. Adapters are
//! **opaque string stores** - they do not interpret or encrypt the values
//! they hold.
//!
//! ## Design Principles
//!
//! - Adapters are simple key/value stores (get, set, set-if-absent)
//! - Absence is `Ok(None)`, failure is `Err(StorageError)`
//! - A missing facility is reported, never panicked on
//! - Must be `Send + Sync` so a dispatcher can be shared
//!
//! ## Available Adapters
//!
//! - [`InMemoryStore`] - Durable or session scope held in memory
//! - [`FileStore`] - Durable scope persisted to disk
//! - [`CookieStore`] - Cookie scope over a pluggable [`CookieJar`]
//!
//! Browser adapters over `localStorage`, `sessionStorage` and
//! `document.cookie` live in the `webstash_wasm` crate.
//!
//! ## Example
//!
//! ```rust
//! use webstash_storage::{InMemoryStore, StorageAdapter};
//!
//! let store = InMemoryStore::session();
//! store.set("user", "alice").unwrap();
//! assert_eq!(store.get("user").unwrap().as_deref(), Some("alice"));
//! assert_eq!(store.get("missing").unwrap(), None);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod cookie;
mod error;
mod file;
mod kind;
mod memory;

pub use backend::StorageAdapter;
pub use cookie::{CookieJar, CookieStore, InMemoryCookieJar, DEFAULT_COOKIE_EXPIRY_DAYS};
pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use kind::BackendKind;
pub use memory::InMemoryStore;
