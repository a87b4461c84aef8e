//! Property-based test generators using proptest.
//!
//! Provides strategies for generating backend names, storage keys and
//! values.

use proptest::prelude::*;
use webstash_storage::BackendKind;

/// Strategy for generating one of the three recognized backend names.
pub fn backend_name_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(BackendKind::ALL.to_vec()).prop_map(|kind| kind.name().to_string())
}

/// Strategy for generating backend names that are not recognized.
pub fn bogus_backend_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z]{0,16}")
        .expect("Invalid regex")
        .prop_filter("Name must not be a recognized backend", |s| {
            BackendKind::from_name(s).is_none()
        })
}

/// Strategy for generating storage keys that avoid the reserved key name.
pub fn storage_key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_.]{0,23}")
        .expect("Invalid regex")
        .prop_filter("Key must not be reserved", |s| s != "key")
}

/// Strategy for generating non-empty stored values.
pub fn value_strategy() -> impl Strategy<Value = String> {
    ".{1,128}"
}
