//! Form values shared between widgets and the submit path.
//!
//! Dropdowns mirror their selection into a named hidden field so the form can
//! be submitted without asking each widget for its value.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::{Map, Value};

/// Named field values of one form. Cloning shares the same storage.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    fields: Rc<RefCell<BTreeMap<String, String>>>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle to `name`, registering it empty if unknown.
    pub fn field(&self, name: impl Into<String>) -> FieldBinding {
        let name = name.into();
        self.fields.borrow_mut().entry(name.clone()).or_default();
        FieldBinding {
            form: self.clone(),
            name,
        }
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.fields.borrow().get(name).cloned()
    }

    pub fn set(&self, name: &str, value: impl Into<String>) {
        self.fields
            .borrow_mut()
            .insert(name.to_string(), value.into());
    }

    /// Snapshot of every field.
    pub fn values(&self) -> BTreeMap<String, String> {
        self.fields.borrow().clone()
    }

    /// Fields as a JSON object, for JSON request bodies.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .borrow()
            .iter()
            .map(|(name, value)| (name.clone(), Value::String(value.clone())))
            .collect();
        Value::Object(map)
    }

    /// Non-empty fields encoded as a query string.
    pub fn to_query(&self) -> String {
        let fields = self.fields.borrow();
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (name, value) in fields.iter().filter(|(_, value)| !value.is_empty()) {
            serializer.append_pair(name, value);
        }
        serializer.finish()
    }
}

/// Hidden-field handle a widget writes its value through.
#[derive(Debug, Clone)]
pub struct FieldBinding {
    form: FormState,
    name: String,
}

impl FieldBinding {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> String {
        self.form.get(&self.name).unwrap_or_default()
    }

    pub fn set(&self, value: &str) {
        self.form.set(&self.name, value);
    }

    pub fn clear(&self) {
        self.form.set(&self.name, "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn binding_writes_through_to_form() {
        let form = FormState::new();
        let field = form.field("regional_id");
        assert_eq!(form.get("regional_id").as_deref(), Some(""));

        field.set("12");
        assert_eq!(form.get("regional_id").as_deref(), Some("12"));
        assert_eq!(field.value(), "12");

        field.clear();
        assert_eq!(field.value(), "");
    }

    #[test]
    fn registering_twice_keeps_value() {
        let form = FormState::new();
        form.field("status").set("active");
        let again = form.field("status");
        assert_eq!(again.value(), "active");
    }

    #[test]
    fn query_skips_empty_fields_and_encodes() {
        let form = FormState::new();
        form.field("institution_id").set("3");
        form.field("regional_id");
        form.field("q").set("rak besi & meja");
        assert_eq!(form.to_query(), "institution_id=3&q=rak+besi+%26+meja");
    }

    #[test]
    fn json_includes_every_field() {
        let form = FormState::new();
        form.field("status").set("broken");
        form.field("regional_id");
        assert_eq!(
            form.to_json(),
            serde_json::json!({ "regional_id": "", "status": "broken" })
        );
    }
}
