//! Minimal widgets satisfying the options contract.

use crate::options::{Form, ValueHolder};
use nc_core::NodeError;
use serde_json::{Map, Value};

/// A single value input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputField {
    value: Value,
}

impl InputField {
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}

impl ValueHolder for InputField {
    fn value(&self) -> Value {
        self.value.clone()
    }

    fn set_value(&mut self, value: Value) -> Result<(), NodeError> {
        self.value = value;
        Ok(())
    }
}

type SubmitCallback = Box<dyn FnMut(&Map<String, Value>) -> Result<(), NodeError>>;

/// A named set of fields with submit listeners.
#[derive(Default)]
pub struct FieldSet {
    fields: Map<String, Value>,
    on_submit: Vec<SubmitCallback>,
}

impl FieldSet {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            on_submit: Vec::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Called in registration order on every submit; the first failure
    /// stops the rest.
    pub fn on_submit(
        &mut self,
        callback: impl FnMut(&Map<String, Value>) -> Result<(), NodeError> + 'static,
    ) {
        self.on_submit.push(Box::new(callback));
    }
}

impl Form for FieldSet {
    fn values(&self) -> Map<String, Value> {
        self.fields.clone()
    }

    /// Merges into the existing fields; fields not mentioned keep their value.
    fn set_values(&mut self, values: Map<String, Value>) -> Result<(), NodeError> {
        self.fields.extend(values);
        Ok(())
    }

    fn submit(&mut self) -> Result<(), NodeError> {
        for callback in &mut self.on_submit {
            callback(&self.fields)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for FieldSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSet")
            .field("fields", &self.fields)
            .field("on_submit", &self.on_submit.len())
            .finish()
    }
}
