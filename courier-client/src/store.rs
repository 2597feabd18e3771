//! Body and header state with mutation dispatch.

use crate::form::FormMutator;
use crate::headers::{CONTENT_TYPE, SOAP_ACTION};
use crate::path::{Path, PathMutator};
use crate::soap::SoapMutator;
use crate::{Body, CourierError, HeaderSet, Result, stringify};
use serde_json::Value;
use tracing::debug;

/// Which mutator handles `set_body`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationMode {
    /// Path writes into a JSON-like tree.
    Tree,
    /// Element content replacement inside a SOAP envelope.
    Soap,
    /// Flat form field assignment.
    Form,
}

impl MutationMode {
    /// Resolve the mode from the headers and current body.
    pub fn resolve(headers: &HeaderSet, body: &Body) -> Self {
        if headers.contains(SOAP_ACTION) {
            return MutationMode::Soap;
        }
        match headers.get(CONTENT_TYPE) {
            Some(ct) if ct.to_ascii_lowercase().contains("json") => MutationMode::Tree,
            None if matches!(body, Body::Empty | Body::Tree(_)) => MutationMode::Tree,
            _ => MutationMode::Form,
        }
    }
}

/// Current body and headers of a request.
#[derive(Debug, Clone, Default)]
pub struct BodyStore {
    body: Body,
    headers: HeaderSet,
    tree: PathMutator,
}

impl BodyStore {
    /// Create a store around an initial body and header set.
    pub fn new(body: Body, headers: HeaderSet) -> Self {
        Self {
            body,
            headers,
            tree: PathMutator::new(),
        }
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    /// Replace the whole body.
    pub fn replace_body(&mut self, body: Body) {
        self.tree.reset();
        self.body = body;
    }

    /// Set or overwrite a header.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.set(name, value);
    }

    /// Remove a header, returning its previous value.
    pub fn remove_header(&mut self, name: &str) -> Option<String> {
        self.headers.remove(name)
    }

    /// The mode the next `set_body` would use.
    pub fn mode(&self) -> MutationMode {
        MutationMode::resolve(&self.headers, &self.body)
    }

    /// Write `value` at `path` using the mutator for the current mode.
    ///
    /// On error the body is left as it was.
    pub fn set_body(&mut self, path: &str, value: Value) -> Result<()> {
        let mode = self.mode();
        debug!(path, ?mode, body = self.body.kind(), "Setting body field");

        match mode {
            MutationMode::Tree => {
                let path = Path::parse(path)?;
                self.tree.set(&mut self.body, &path, value)
            }
            MutationMode::Soap => {
                let path = Path::parse(path)?;
                let text = stringify(&value)?;
                let updated = match &self.body {
                    Body::Xml(xml) => Body::Xml(SoapMutator::set(xml, &path, &text)?),
                    Body::Raw(raw) => Body::Raw(SoapMutator::set(raw, &path, &text)?),
                    other => {
                        return Err(CourierError::unsupported("SOAP body", other.kind()));
                    }
                };
                self.body = updated;
                Ok(())
            }
            MutationMode::Form => FormMutator::set(&mut self.body, path, &value),
        }
    }
}
