//! # webstash testkit
//!
//! Test utilities for webstash.
//!
//! This crate provides:
//! - Fixtures: fully populated dispatchers and stashes, in memory or on disk
//! - Property-based test generators using proptest
//! - Logging setup for tests
//!
//! ## Usage
//!
//! ```rust
//! use webstash_testkit::prelude::*;
//!
//! let fixture = TestStash::memory(StashConfig::new().encrypt(true));
//! fixture.set("user", "alice").unwrap();
//! assert_eq!(fixture.get("user").unwrap().as_deref(), Some("alice"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use webstash_core::{Dispatcher, Stash, StashConfig};
}

pub use fixtures::*;
pub use generators::*;
