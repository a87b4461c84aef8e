//! # webstash WASM
//!
//! WebAssembly bindings for webstash over the browser's own storage.
//!
//! This crate provides:
//! - `localStorage` and `sessionStorage` adapters
//! - A `document.cookie` jar for the cookie adapter
//! - Binding of HTML form fields to stored values
//! - JavaScript-friendly API via wasm-bindgen
//!
//! ## Backend Selection
//!
//! Callers name a backend per stash (`localStorage`, `sessionStorage`,
//! `cookie`). A name that is unknown, or whose `window` property is missing
//! or not an object, falls back to cookies.
//!
//! ## Usage
//!
//! ```javascript
//! import init, { WebStash, generateIdentifier } from 'webstash_wasm';
//!
//! async function main() {
//!     await init();
//!
//!     const stash = new WebStash({ encrypt: true, formElementId: "signup" });
//!     stash.set("user", "alice");
//!     console.log(stash.get("user"));
//!
//!     document.getElementById("signup").addEventListener("submit", () => stash.saveForm());
//!     stash.loadForm();
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod form;
mod stash;

pub use backend::{browser_dispatcher, DocumentCookieJar, WebStorage};
pub use error::*;
pub use form::HtmlFormFields;
pub use stash::*;

use wasm_bindgen::prelude::*;

/// Initialize the WASM module.
///
/// Routes Rust panics to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
