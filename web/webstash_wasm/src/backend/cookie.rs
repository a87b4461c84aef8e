//! `document.cookie` jar.

use crate::error::describe;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;
use webstash_storage::{BackendKind, CookieJar, StorageError, StorageResult};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Cookie jar over the page's `document.cookie`.
///
/// Names and values are URI-component encoded. Cookies are written with
/// `path=/` and a `max-age` derived from the expiry in days.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentCookieJar;

impl DocumentCookieJar {
    /// Creates the jar.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn document() -> StorageResult<HtmlDocument> {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
            .ok_or(StorageError::unavailable(BackendKind::Cookie))
    }
}

fn encode(raw: &str) -> String {
    String::from(js_sys::encode_uri_component(raw))
}

fn decode(raw: &str) -> String {
    js_sys::decode_uri_component(raw)
        .map(String::from)
        .unwrap_or_else(|_| raw.to_string())
}

/// Finds `name` in a `document.cookie` string.
pub(crate) fn find_cookie<'a>(header: &'a str, encoded_name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == encoded_name)
        .map(|(_, value)| value)
}

impl CookieJar for DocumentCookieJar {
    fn cookie(&self, name: &str) -> StorageResult<Option<String>> {
        let header = Self::document()?
            .cookie()
            .map_err(|_| StorageError::unavailable(BackendKind::Cookie))?;
        Ok(find_cookie(&header, &encode(name)).map(decode))
    }

    fn set_cookie(&self, name: &str, value: &str, expires_days: u32) -> StorageResult<()> {
        let max_age = u64::from(expires_days) * SECONDS_PER_DAY;
        let cookie = format!(
            "{}={}; max-age={max_age}; path=/",
            encode(name),
            encode(value)
        );
        Self::document()?
            .set_cookie(&cookie)
            .map_err(|e| StorageError::write_failed(BackendKind::Cookie, describe(&e)))
    }
}
