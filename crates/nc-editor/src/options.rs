//! The options slot of options-bearing nodes.
//!
//! A slot holds one of three cases, each readable and writable through the
//! same `read`/`write` pair:
//!
//! | Case      | `read`                    | `write`                                   |
//! |-----------|---------------------------|-------------------------------------------|
//! | `Value`   | the holder's value        | bare value, or the `default` of `{default: v}` |
//! | `Form`    | the field map             | bulk-assign fields, then submit           |
//! | `Payload` | the payload itself        | replace the payload                       |

use nc_core::NodeError;
use serde_json::{Map, Value};

/// A single input widget.
pub trait ValueHolder {
    fn value(&self) -> Value;
    fn set_value(&mut self, value: Value) -> Result<(), NodeError>;
}

/// A structured multi-field form.
pub trait Form {
    fn values(&self) -> Map<String, Value>;
    fn set_values(&mut self, values: Map<String, Value>) -> Result<(), NodeError>;
    /// Run the form's submit pathway so dependent UI picks up new values.
    fn submit(&mut self) -> Result<(), NodeError>;
}

pub enum Options {
    Value(Box<dyn ValueHolder>),
    Form(Box<dyn Form>),
    Payload(Value),
}

impl Options {
    pub fn read(&self) -> Value {
        match self {
            Self::Value(holder) => holder.value(),
            Self::Form(form) => Value::Object(form.values()),
            Self::Payload(payload) => payload.clone(),
        }
    }

    pub fn write(&mut self, value: Value) -> Result<(), NodeError> {
        match self {
            Self::Value(holder) => {
                let value = match value {
                    Value::Object(ref map) if map.get("default").is_some_and(|d| !is_empty(d)) => {
                        map["default"].clone()
                    }
                    other => other,
                };
                holder.set_value(value)
            }
            Self::Form(form) => match value {
                Value::Object(map) => {
                    form.set_values(map)?;
                    form.submit()
                }
                other => Err(NodeError::InvalidState(format!(
                    "form options must be an object, got {other}"
                ))),
            },
            Self::Payload(payload) => {
                *payload = value;
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(h) => f.debug_tuple("Value").field(&h.value()).finish(),
            Self::Form(form) => f.debug_tuple("Form").field(&form.values()).finish(),
            Self::Payload(p) => f.debug_tuple("Payload").field(p).finish(),
        }
    }
}

/// Builds a fresh options widget for a node kind.
pub type OptionsFactory = fn() -> Options;

/// An options slot, instantiated from its factory the first time it is needed.
#[derive(Debug)]
pub(crate) enum OptionsSlot {
    Pending(OptionsFactory),
    Ready(Options),
}

impl OptionsSlot {
    pub(crate) fn get_or_init(&mut self) -> &mut Options {
        if let Self::Pending(factory) = self {
            let factory = *factory;
            *self = Self::Ready(factory());
        }
        match self {
            Self::Ready(options) => options,
            Self::Pending(_) => unreachable!("slot initialized above"),
        }
    }

    pub(crate) fn get(&self) -> Option<&Options> {
        match self {
            Self::Ready(options) => Some(options),
            Self::Pending(_) => None,
        }
    }

    /// Current value; an uninstantiated slot reports its factory defaults.
    pub(crate) fn read(&self) -> Value {
        match self {
            Self::Ready(options) => options.read(),
            Self::Pending(factory) => factory().read(),
        }
    }
}

/// Null, empty strings, and empty collections carry no options data.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
