// Declarative request model

use crate::validation::{ConfigValidator, Validate};
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// A single configured header.
///
/// `comment` is informational only and never sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderEntry {
    #[serde(rename = "Comentario", alias = "comment", default)]
    pub comment: String,
    #[serde(rename = "Nombre", alias = "name")]
    pub name: String,
    #[serde(rename = "Valor", alias = "value")]
    pub value: String,
}

impl HeaderEntry {
    /// Create a header entry with no comment.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            comment: String::new(),
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Everything needed to describe one HTTP request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Initial body, in any shape.
    #[serde(rename = "Body", alias = "body", default)]
    pub body: Value,
    /// Ordered header list; duplicates resolve last-write-wins.
    #[serde(rename = "Header", alias = "headers", default)]
    pub headers: Vec<HeaderEntry>,
    #[serde(rename = "Method", alias = "method")]
    pub method: String,
    #[serde(rename = "URL", alias = "url")]
    pub url: String,
    /// Timeout in seconds.
    #[serde(
        rename = "Timeout",
        alias = "timeout",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub timeout: Option<u64>,
}

impl RequestConfig {
    /// Create a configuration with no headers and no body.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            body: Value::Null,
            headers: Vec::new(),
            method: method.into(),
            url: url.into(),
            timeout: None,
        }
    }

    /// Append a header entry.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(HeaderEntry::new(name, value));
        self
    }

    /// Replace the initial body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    /// Set the timeout in seconds.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// The configured timeout, if any.
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

impl Validate for RequestConfig {
    fn validate(&self) -> Result<()> {
        ConfigValidator::is_method(&self.method, "Method")?;
        ConfigValidator::is_url(&self.url, "URL")?;
        ConfigValidator::positive(self.timeout, "Timeout")?;
        for header in &self.headers {
            ConfigValidator::not_empty(&header.name, "Header name")?;
        }
        Ok(())
    }
}
