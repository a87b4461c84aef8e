//! Binding of form fields to stored values.
//!
//! The core knows nothing about the DOM. A form is anything that can list
//! its named fields and read or write their values; the browser crate
//! implements [`FormFields`] over an HTML form element.

use crate::error::CoreResult;
use crate::stash::Stash;
use std::collections::BTreeMap;

/// A set of named, string-valued fields.
pub trait FormFields {
    /// Returns the names of all fields that can be bound.
    fn field_names(&self) -> Vec<String>;

    /// Returns the current value of a field.
    fn value(&self, name: &str) -> Option<String>;

    /// Replaces the value of a field. Unknown names are ignored.
    fn set_value(&mut self, name: &str, value: &str);
}

/// Loads stored values into a form and saves form values back.
///
/// When the stash is configured with a `form_element_id`, each field is
/// stored under `"{form_element_id}.{field}"`; otherwise under the bare
/// field name.
#[derive(Debug, Clone, Copy)]
pub struct FormBinding<'a> {
    stash: &'a Stash,
}

impl<'a> FormBinding<'a> {
    /// Creates a binding over the given stash.
    #[must_use]
    pub fn new(stash: &'a Stash) -> Self {
        Self { stash }
    }

    /// Returns the storage key used for a field.
    #[must_use]
    pub fn storage_key(&self, field: &str) -> String {
        match &self.stash.config().form_element_id {
            Some(form_id) => format!("{form_id}.{field}"),
            None => field.to_string(),
        }
    }

    /// Reads every field's stored value, writes it into the form, and
    /// returns the values found keyed by field name.
    ///
    /// Fields with nothing stored keep their current value.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while reading a field.
    pub fn load<F: FormFields + ?Sized>(
        &self,
        form: &mut F,
    ) -> CoreResult<BTreeMap<String, String>> {
        let mut found = BTreeMap::new();
        for field in form.field_names() {
            if let Some(value) = self.stash.get(&self.storage_key(&field))? {
                form.set_value(&field, &value);
                found.insert(field, value);
            }
        }
        tracing::debug!(fields = found.len(), "loaded form from storage");
        Ok(found)
    }

    /// Stores every field that has a non-empty value and returns how many
    /// were stored.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while storing a field.
    pub fn save<F: FormFields + ?Sized>(&self, form: &F) -> CoreResult<usize> {
        let mut saved = 0;
        for field in form.field_names() {
            match form.value(&field) {
                Some(value) if !value.is_empty() => {
                    self.stash.set(&self.storage_key(&field), &value)?;
                    saved += 1;
                }
                _ => {}
            }
        }
        tracing::debug!(fields = saved, "saved form to storage");
        Ok(saved)
    }
}

/// An in-memory form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapForm {
    fields: BTreeMap<String, String>,
}

impl MapForm {
    /// Creates a form with the given fields, all empty.
    #[must_use]
    pub fn with_fields<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: names.into_iter().map(|n| (n.into(), String::new())).collect(),
        }
    }

    /// Sets a field value, adding the field if needed.
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

impl FormFields for MapForm {
    fn field_names(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    fn value(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    fn set_value(&mut self, name: &str, value: &str) {
        if let Some(slot) = self.fields.get_mut(name) {
            *slot = value.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StashConfig;

    #[test]
    fn save_then_load_roundtrip() {
        let stash = Stash::in_memory(StashConfig::new().form_element_id("signup"));
        let binding = FormBinding::new(&stash);

        let filled = MapForm::with_fields(["email", "name"])
            .with_value("email", "alice@example.com")
            .with_value("name", "Alice");
        assert_eq!(binding.save(&filled).unwrap(), 2);

        let mut blank = MapForm::with_fields(["email", "name", "phone"]);
        let found = binding.load(&mut blank).unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(blank.value("email").as_deref(), Some("alice@example.com"));
        assert_eq!(blank.value("phone").as_deref(), Some(""));
    }

    #[test]
    fn storage_key_uses_form_id() {
        let stash = Stash::in_memory(StashConfig::new().form_element_id("signup"));
        assert_eq!(FormBinding::new(&stash).storage_key("email"), "signup.email");

        let bare = Stash::in_memory(StashConfig::default());
        assert_eq!(FormBinding::new(&bare).storage_key("email"), "email");
    }

    #[test]
    fn empty_fields_are_not_saved() {
        let stash = Stash::in_memory(StashConfig::default());
        let form = MapForm::with_fields(["email"]).with_value("name", "Alice");

        assert_eq!(FormBinding::new(&stash).save(&form).unwrap(), 1);
        assert_eq!(stash.get("email").unwrap(), None);
    }

    #[test]
    fn encrypted_form_roundtrip() {
        let stash = Stash::in_memory(StashConfig::new().encrypt(true).form_element_id("f"));
        let binding = FormBinding::new(&stash);

        binding
            .save(&MapForm::default().with_value("card", "4111"))
            .unwrap();
        let raw = stash
            .dispatcher()
            .get_item("localStorage", "f.card")
            .unwrap()
            .unwrap();
        assert_ne!(raw, "4111");

        let mut form = MapForm::with_fields(["card"]);
        binding.load(&mut form).unwrap();
        assert_eq!(form.value("card").as_deref(), Some("4111"));
    }

    #[test]
    fn set_value_ignores_unknown_fields() {
        let mut form = MapForm::with_fields(["a"]);
        form.set_value("b", "x");
        assert_eq!(form.field_names(), vec!["a".to_string()]);
    }
}
