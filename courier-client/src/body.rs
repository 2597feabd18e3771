//! Request body representations.

use crate::{CourierError, Result};
use serde_json::Value;
use std::collections::BTreeMap;

/// Flat form body. Keys are kept sorted so encoding is deterministic.
pub type FormMap = BTreeMap<String, String>;

/// The body of a request, in exactly one shape at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Body {
    /// No body.
    #[default]
    Empty,
    /// JSON-like tree of mappings, sequences and scalars.
    Tree(Value),
    /// SOAP envelope kept as unparsed text.
    Xml(String),
    /// Normalized URL-encoded form.
    Form(FormMap),
    /// Any other text.
    Raw(String),
}

impl Body {
    /// Classify a configured body value.
    ///
    /// Strings starting with `<` are treated as XML, other strings as raw text.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => Body::Empty,
            Value::String(text) if text.trim_start().starts_with('<') => Body::Xml(text),
            Value::String(text) => Body::Raw(text),
            other => Body::Tree(other),
        }
    }

    /// Short name of the active shape, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Body::Empty => "empty",
            Body::Tree(Value::Object(_)) => "mapping",
            Body::Tree(Value::Array(_)) => "sequence",
            Body::Tree(_) => "scalar",
            Body::Xml(_) => "xml",
            Body::Form(_) => "form",
            Body::Raw(_) => "text",
        }
    }

    /// Check if there is no body.
    pub fn is_empty(&self) -> bool {
        matches!(self, Body::Empty)
    }

    /// True for tree bodies rooted at a mapping or a sequence.
    pub fn is_structured(&self) -> bool {
        matches!(self, Body::Tree(Value::Object(_) | Value::Array(_)))
    }

    /// Text content of `Xml` and `Raw` bodies.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Xml(text) | Body::Raw(text) => Some(text),
            _ => None,
        }
    }

    /// View the body as a JSON value.
    pub fn to_value(&self) -> Value {
        match self {
            Body::Empty => Value::Null,
            Body::Tree(value) => value.clone(),
            Body::Xml(text) | Body::Raw(text) => Value::String(text.clone()),
            Body::Form(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Body::from_value(value)
    }
}

/// Render a leaf value as text for form fields and XML elements.
///
/// Containers are not valid leaves in those contexts.
pub fn stringify(value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        Value::Array(_) => Err(CourierError::unsupported("text leaf", "sequence")),
        Value::Object(_) => Err(CourierError::unsupported("text leaf", "mapping")),
    }
}
