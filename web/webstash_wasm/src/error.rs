//! Error types for WASM bindings.

use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Errors that can occur in the WASM bindings.
#[derive(Debug, Error)]
pub enum WasmError {
    /// Stash operation failed.
    #[error("stash error: {0}")]
    Stash(#[from] webstash_core::CoreError),

    /// Invalid options object.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// Form element missing or not a form.
    #[error("form not found: {0}")]
    FormNotFound(String),
}

impl From<WasmError> for JsValue {
    fn from(err: WasmError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for WasmError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        WasmError::InvalidOptions(err.to_string())
    }
}

/// Result type for WASM operations.
pub type WasmResult<T> = Result<T, WasmError>;

/// Renders a thrown JS value for an error message.
pub(crate) fn describe(val: &JsValue) -> String {
    val.as_string().unwrap_or_else(|| format!("{:?}", val))
}
