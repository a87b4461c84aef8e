//! Stash WASM bindings.
//!
//! This module provides the main JavaScript-facing API.

use crate::backend::{browser_dispatcher, is_window_object};
use crate::error::{WasmError, WasmResult};
use crate::form::HtmlFormFields;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use webstash_core::{generate_identifier, FormBinding, Stash, StashConfig, ValueCodec};

/// A configured stash over the page's storage.
///
/// ## Example
///
/// ```javascript
/// const stash = new WebStash({ backendName: "sessionStorage", encrypt: true });
/// stash.set("user", "alice");
/// stash.get("user"); // "alice"
/// ```
#[wasm_bindgen]
pub struct WebStash {
    inner: Stash,
}

#[wasm_bindgen]
impl WebStash {
    /// Creates a stash from an options object. Missing options take their
    /// defaults; `undefined` or `null` means all defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<WebStash, JsValue> {
        let config = parse_options(options)?;
        let dispatcher = browser_dispatcher(&config);
        Ok(WebStash {
            inner: Stash::new(config, dispatcher),
        })
    }

    /// Stores a value under `name`.
    pub fn set(&self, name: &str, value: &str) -> Result<(), JsValue> {
        self.inner.set(name, value).map_err(WasmError::from)?;
        Ok(())
    }

    /// Reads the value stored under `name`, or `undefined`.
    pub fn get(&self, name: &str) -> Result<Option<String>, JsValue> {
        Ok(self.inner.get(name).map_err(WasmError::from)?)
    }

    /// Fills the configured form from storage and returns the values found
    /// as a plain object.
    #[wasm_bindgen(js_name = loadForm)]
    pub fn load_form(&self) -> Result<JsValue, JsValue> {
        let mut form = self.form()?;
        let found = FormBinding::new(&self.inner)
            .load(&mut form)
            .map_err(WasmError::from)?;
        let object = found
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(WasmError::from)?;
        Ok(object)
    }

    /// Saves the configured form's non-empty fields and returns how many
    /// were stored.
    #[wasm_bindgen(js_name = saveForm)]
    pub fn save_form(&self) -> Result<u32, JsValue> {
        let form = self.form()?;
        let saved = FormBinding::new(&self.inner)
            .save(&form)
            .map_err(WasmError::from)?;
        Ok(u32::try_from(saved).unwrap_or(u32::MAX))
    }

    fn form(&self) -> WasmResult<HtmlFormFields> {
        let id = self
            .inner
            .config()
            .form_element_id
            .as_deref()
            .ok_or_else(|| WasmError::InvalidOptions("formElementId is not set".into()))?;
        HtmlFormFields::by_id(id)
    }
}

fn parse_options(options: JsValue) -> WasmResult<StashConfig> {
    if options.is_undefined() || options.is_null() {
        return Ok(StashConfig::default());
    }
    Ok(serde_wasm_bindgen::from_value(options)?)
}

/// Stores `value` under `key` on the named backend. Returns false on any
/// failure.
#[wasm_bindgen(js_name = setItem)]
pub fn set_item(backend: &str, key: &str, value: &str) -> bool {
    browser_dispatcher(&StashConfig::default()).set_item_flag(backend, key, value)
}

/// Reads `key` from the named backend. Returns `undefined` when absent or
/// on failure.
#[wasm_bindgen(js_name = getItem)]
pub fn get_item(backend: &str, key: &str) -> Option<String> {
    browser_dispatcher(&StashConfig::default()).get_item_flag(backend, key)
}

/// Returns true if `window[name]` is a usable storage object.
#[wasm_bindgen(js_name = validateStorage)]
pub fn validate_storage(name: &str) -> bool {
    is_window_object(name)
}

/// Generates an RFC-4122 v4 identifier, optionally truncated to `len`
/// hex digits.
#[wasm_bindgen(js_name = generateIdentifier)]
pub fn generate_identifier_js(len: Option<u32>) -> String {
    generate_identifier(len.map(|n| n as usize))
}

/// Encrypts `value` under `key` when `encrypt` is set and `key` is
/// non-empty; otherwise returns it unchanged.
#[wasm_bindgen]
pub fn encode(value: &str, key: &str, encrypt: bool) -> Result<String, JsValue> {
    Ok(ValueCodec::default()
        .encode(value, key, encrypt)
        .map_err(WasmError::from)?)
}

/// Reverses [`encode`].
#[wasm_bindgen]
pub fn decode(stored: &str, key: &str, encrypt: bool) -> Result<String, JsValue> {
    Ok(ValueCodec::default()
        .decode(stored, key, encrypt)
        .map_err(WasmError::from)?)
}
