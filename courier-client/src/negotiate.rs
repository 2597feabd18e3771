//! Content type resolution and body serialization.

use crate::form::FormMutator;
use crate::headers::{CONTENT_TYPE, SOAP_ACTION};
use crate::{Body, CourierError, HeaderSet, Result};
use bytes::Bytes;
use serde_json::Value;

// Content types produced by negotiation
pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_XML: &str = "application/xml";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Wire encoding selected from a content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    Json,
    Xml,
    Form,
}

impl WireFormat {
    /// Classify a content type by substring. XML wins over JSON, and
    /// anything unrecognized is sent as a form.
    pub fn from_content_type(content_type: &str) -> Self {
        let lower = content_type.to_ascii_lowercase();
        if lower.contains("xml") {
            WireFormat::Xml
        } else if lower.contains("json") {
            WireFormat::Json
        } else {
            WireFormat::Form
        }
    }
}

/// Result of negotiation: what goes into `Content-Type` and the body bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Negotiated {
    /// `None` when there is neither an explicit header nor a body.
    pub content_type: Option<String>,
    /// `None` for an empty body.
    pub body: Option<Bytes>,
}

/// Picks the wire content type and serializes the body to match.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentNegotiator;

impl ContentNegotiator {
    /// Resolve the content type.
    ///
    /// Precedence: explicit `Content-Type` header, then a `SOAPAction`
    /// header, then the body shape.
    pub fn content_type(headers: &HeaderSet, body: &Body) -> Option<String> {
        if let Some(explicit) = headers.get(CONTENT_TYPE) {
            return Some(explicit.to_string());
        }
        if headers.contains(SOAP_ACTION) {
            return Some(APPLICATION_XML.to_string());
        }
        match body {
            Body::Empty => None,
            _ if body.is_structured() => Some(APPLICATION_JSON.to_string()),
            _ => Some(FORM_URLENCODED.to_string()),
        }
    }

    /// Resolve the content type and serialize the body for it.
    pub fn negotiate(headers: &HeaderSet, body: &Body) -> Result<Negotiated> {
        let content_type = Self::content_type(headers, body);
        let bytes = match (&content_type, body) {
            (_, Body::Empty) | (None, _) => None,
            (Some(ct), body) => Some(Self::serialize(body, WireFormat::from_content_type(ct))?),
        };

        Ok(Negotiated {
            content_type,
            body: bytes,
        })
    }

    /// Serialize a body in the given wire format.
    pub fn serialize(body: &Body, format: WireFormat) -> Result<Bytes> {
        match format {
            WireFormat::Xml => match body.as_text() {
                Some(text) => Ok(Bytes::from(text.to_string())),
                None => Err(CourierError::unsupported("xml encoding", body.kind())),
            },
            WireFormat::Json => serde_json::to_vec(&body.to_value())
                .map(Bytes::from)
                .map_err(|e| CourierError::Serialization(e.to_string())),
            WireFormat::Form => match body {
                Body::Raw(text) | Body::Xml(text) => {
                    FormMutator::parse(text)?;
                    Ok(Bytes::from(text.clone()))
                }
                Body::Tree(Value::Object(_)) | Body::Form(_) | Body::Empty => {
                    let map = FormMutator::normalize(body)?;
                    Ok(Bytes::from(FormMutator::encode(&map)?))
                }
                Body::Tree(_) => Err(CourierError::unsupported("form encoding", body.kind())),
            },
        }
    }
}
