//! Flat URL-encoded form bodies.

use crate::body::stringify;
use crate::{Body, CourierError, FormMap, Result};
use serde_json::Value;

/// Normalizes bodies to [`Body::Form`] and writes form fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormMutator;

impl FormMutator {
    /// Set `key` to the text form of `value`, normalizing the body first.
    ///
    /// The body is only replaced once both normalization and stringification
    /// have succeeded.
    pub fn set(body: &mut Body, key: &str, value: &Value) -> Result<()> {
        if key.is_empty() {
            return Err(CourierError::InvalidPath(key.to_string()));
        }
        let mut map = Self::normalize(body)?;
        map.insert(key.to_string(), stringify(value)?);
        *body = Body::Form(map);
        Ok(())
    }

    /// Convert the current body to a flat string mapping.
    ///
    /// An empty body counts as the empty form.
    pub fn normalize(body: &Body) -> Result<FormMap> {
        match body {
            Body::Empty => Ok(FormMap::new()),
            Body::Form(map) => Ok(map.clone()),
            Body::Raw(text) | Body::Xml(text) => Self::parse(text),
            Body::Tree(Value::Object(fields)) => fields
                .iter()
                .map(|(k, v)| stringify(v).map(|text| (k.clone(), text)))
                .collect(),
            Body::Tree(_) => Err(CourierError::unsupported("form encoding", body.kind())),
        }
    }

    /// Percent-decode a URL-encoded string. The first value wins when a key
    /// repeats.
    pub fn parse(text: &str) -> Result<FormMap> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(text)
            .map_err(|e| CourierError::Serialization(format!("invalid URL-encoded body: {}", e)))?;

        let mut map = FormMap::new();
        for (key, value) in pairs {
            map.entry(key).or_insert(value);
        }
        Ok(map)
    }

    /// Percent-encode a form mapping as `k=v` pairs joined by `&`.
    pub fn encode(map: &FormMap) -> Result<String> {
        serde_urlencoded::to_string(map).map_err(|e| CourierError::Serialization(e.to_string()))
    }
}
