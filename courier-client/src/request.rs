//! Immutable request snapshot.

use crate::negotiate::ContentNegotiator;
use crate::{BodyStore, CourierError, Result};
use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method, header};
use std::time::Duration;
use url::Url;

/// Everything needed to send one request, captured at a single point in time.
///
/// Later header or body mutations on the manager do not affect a prepared
/// request.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Bytes>,
    timeout: Option<Duration>,
}

impl PreparedRequest {
    /// Negotiate the body and build wire headers from the store.
    pub(crate) fn build(
        method: &Method,
        url: &Url,
        store: &BodyStore,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let negotiated = ContentNegotiator::negotiate(store.headers(), store.body())?;

        let mut headers = HeaderMap::with_capacity(store.headers().len() + 1);
        for (name, value) in store.headers().iter() {
            headers.insert(header_name(name)?, header_value(name, value)?);
        }
        if let Some(content_type) = &negotiated.content_type
            && !headers.contains_key(header::CONTENT_TYPE)
        {
            headers.insert(
                header::CONTENT_TYPE,
                header_value(header::CONTENT_TYPE.as_str(), content_type)?,
            );
        }

        Ok(Self {
            method: method.clone(),
            url: url.clone(),
            headers,
            body: negotiated.body,
            timeout,
        })
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Wire headers, including the negotiated content type.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The `Content-Type` that will be sent, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// Serialized body bytes.
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Body as text, if it is valid UTF-8.
    pub fn body_text(&self) -> Option<&str> {
        self.body.as_ref().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Per-request timeout, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn into_reqwest(self, client: &reqwest::Client) -> Result<reqwest::Request> {
        let mut request = client
            .request(self.method, self.url)
            .headers(self.headers);

        if let Some(body) = self.body {
            request = request.body(body);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        Ok(request.build()?)
    }
}

fn header_name(name: &str) -> Result<HeaderName> {
    HeaderName::try_from(name).map_err(|e| CourierError::InvalidHeader {
        name: name.to_string(),
        message: e.to_string(),
    })
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::try_from(value).map_err(|e| CourierError::InvalidHeader {
        name: name.to_string(),
        message: e.to_string(),
    })
}
