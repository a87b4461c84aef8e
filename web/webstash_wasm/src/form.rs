//! HTML form binding.

use crate::error::{WasmError, WasmResult};
use std::collections::BTreeSet;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use webstash_core::FormFields;

/// Input types whose values are never bound.
///
/// Checkboxes and radios carry their state in `checked`, not `value`.
const SKIPPED_INPUT_TYPES: [&str; 7] =
    ["submit", "button", "reset", "file", "image", "checkbox", "radio"];

/// The named controls of an HTML form.
pub struct HtmlFormFields {
    form: HtmlFormElement,
}

impl HtmlFormFields {
    /// Wraps a form element.
    pub fn new(form: HtmlFormElement) -> Self {
        Self { form }
    }

    /// Looks a form up by element id.
    ///
    /// # Errors
    ///
    /// Returns an error if no element has that id or it is not a form.
    pub fn by_id(id: &str) -> WasmResult<Self> {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|e| e.dyn_into::<HtmlFormElement>().ok())
            .map(Self::new)
            .ok_or_else(|| WasmError::FormNotFound(id.to_string()))
    }

    fn controls(&self) -> Vec<Control> {
        let elements = self.form.elements();
        (0..elements.length())
            .filter_map(|i| elements.item(i))
            .filter_map(Control::from_element)
            .filter(|c| !c.name().is_empty())
            .collect()
    }
}

enum Control {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
    Select(HtmlSelectElement),
}

impl Control {
    fn from_element(element: Element) -> Option<Self> {
        let element = match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => {
                let bound = !SKIPPED_INPUT_TYPES.contains(&input.type_().as_str());
                return bound.then_some(Self::Input(input));
            }
            Err(element) => element,
        };
        let element = match element.dyn_into::<HtmlTextAreaElement>() {
            Ok(area) => return Some(Self::TextArea(area)),
            Err(element) => element,
        };
        element.dyn_into::<HtmlSelectElement>().ok().map(Self::Select)
    }

    fn name(&self) -> String {
        match self {
            Self::Input(e) => e.name(),
            Self::TextArea(e) => e.name(),
            Self::Select(e) => e.name(),
        }
    }

    fn value(&self) -> String {
        match self {
            Self::Input(e) => e.value(),
            Self::TextArea(e) => e.value(),
            Self::Select(e) => e.value(),
        }
    }

    fn set_value(&self, value: &str) {
        match self {
            Self::Input(e) => e.set_value(value),
            Self::TextArea(e) => e.set_value(value),
            Self::Select(e) => e.set_value(value),
        }
    }
}

impl FormFields for HtmlFormFields {
    fn field_names(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.controls()
            .iter()
            .map(Control::name)
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }

    fn value(&self, name: &str) -> Option<String> {
        self.controls()
            .into_iter()
            .find(|c| c.name() == name)
            .map(|c| c.value())
    }

    fn set_value(&mut self, name: &str, value: &str) {
        if let Some(control) = self.controls().into_iter().find(|c| c.name() == name) {
            control.set_value(value);
        }
    }
}
