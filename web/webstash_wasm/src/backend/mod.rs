//! Browser storage adapters.
//!
//! This module provides the three browser-resident backends:
//! - `localStorage` and `sessionStorage` through [`WebStorage`]
//! - `document.cookie` through [`DocumentCookieJar`]
//!
//! Adapters hold no JS handles; every call looks the facility up on
//! `window` again, so they are `Send + Sync` and see the page as it is now.

mod cookie;
mod web_storage;

pub use cookie::DocumentCookieJar;
pub use web_storage::WebStorage;

use wasm_bindgen::JsValue;
use webstash_core::{Dispatcher, StashConfig};
use webstash_storage::{BackendKind, CookieStore};

/// Returns true if `window[name]` exists and is an object.
///
/// Reading the property can throw (storage disabled by privacy settings);
/// that counts as unavailable.
pub fn is_window_object(name: &str) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    js_sys::Reflect::get(&window, &JsValue::from_str(name))
        .map(|value| value.is_object())
        .unwrap_or(false)
}

/// Builds a dispatcher over the page's storage facilities.
pub fn browser_dispatcher(config: &StashConfig) -> Dispatcher {
    Dispatcher::new()
        .with_adapter(Box::new(WebStorage::new(BackendKind::Durable)))
        .with_adapter(Box::new(WebStorage::new(BackendKind::Session)))
        .with_adapter(Box::new(
            CookieStore::new(Box::new(DocumentCookieJar::new()))
                .with_expiry_days(config.cookie_expiry_days),
        ))
}
