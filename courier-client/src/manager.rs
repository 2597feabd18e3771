//! The request manager: configuration, mutation and execution in one place.

use crate::{
    Body, BodyStore, ClientConfig, CourierError, ExecutionState, Executor, HeaderSet,
    MutationMode, PreparedRequest, Response, Result,
};
use courier_config::RequestConfig;
use http::Method;
use parking_lot::Mutex;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Builds one HTTP request from configuration, lets callers patch headers
/// and body fields, then sends it.
///
/// All methods take `&self`; share the manager through an `Arc` to cancel
/// from another task.
#[derive(Debug)]
pub struct RequestManager {
    method: Method,
    url: Url,
    timeout: Mutex<Option<Duration>>,
    store: Mutex<BodyStore>,
    executor: Executor,
}

impl RequestManager {
    /// Create a manager from a request configuration with default transport
    /// settings.
    pub fn new(config: RequestConfig) -> Result<Self> {
        Self::with_client_config(config, ClientConfig::default())
    }

    /// Create a manager with explicit transport settings.
    pub fn with_client_config(config: RequestConfig, client: ClientConfig) -> Result<Self> {
        let method = Method::from_bytes(config.method.trim().to_uppercase().as_bytes())
            .map_err(|_| CourierError::InvalidMethod(config.method.clone()))?;
        let url = Url::parse(&config.url).map_err(|e| CourierError::InvalidUrl(e.to_string()))?;
        let timeout = config.timeout_duration();

        let headers: HeaderSet = config
            .headers
            .into_iter()
            .map(|h| (h.name, h.value))
            .collect();
        let body = Body::from_value(config.body);

        debug!(%method, %url, body = body.kind(), headers = headers.len(), "Request manager created");

        Ok(Self {
            method,
            url,
            timeout: Mutex::new(timeout),
            store: Mutex::new(BodyStore::new(body, headers)),
            executor: Executor::new(client)?,
        })
    }

    /// Load configuration from a file path or a literal JSON string.
    pub fn from_source(input: &str) -> Result<Self> {
        Self::new(courier_config::load_validated(input)?)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Set or overwrite a header.
    pub fn set_header(&self, name: impl Into<String>, value: impl Into<String>) {
        self.store.lock().set_header(name, value);
    }

    /// Remove a header, returning its previous value.
    pub fn remove_header(&self, name: &str) -> Option<String> {
        self.store.lock().remove_header(name)
    }

    /// Write `value` at `path` in the body.
    ///
    /// The mutator is chosen from the headers and current body (see
    /// [`MutationMode`]). On error the body is unchanged.
    pub fn set_body(&self, path: &str, value: impl Into<Value>) -> Result<()> {
        self.store.lock().set_body(path, value.into())
    }

    /// Replace the whole body.
    pub fn replace_body(&self, value: Value) {
        self.store.lock().replace_body(Body::from_value(value));
    }

    /// Override the request timeout.
    pub fn set_timeout(&self, timeout: Option<Duration>) {
        *self.timeout.lock() = timeout;
    }

    /// Snapshot of the current body.
    pub fn body(&self) -> Body {
        self.store.lock().body().clone()
    }

    /// Snapshot of the current headers.
    pub fn headers(&self) -> HeaderSet {
        self.store.lock().headers().clone()
    }

    /// The mode the next `set_body` would use.
    pub fn mode(&self) -> MutationMode {
        self.store.lock().mode()
    }

    /// State of the most recent execution.
    pub fn state(&self) -> ExecutionState {
        self.executor.state()
    }

    /// Negotiate and freeze the request as it would be sent now.
    pub fn prepare(&self) -> Result<PreparedRequest> {
        let store = self.store.lock();
        PreparedRequest::build(&self.method, &self.url, &store, *self.timeout.lock())
    }

    /// Send the request.
    ///
    /// The body and headers are snapshotted under the mutation lock once the
    /// execution has started, so concurrent `set_body` calls cannot affect the
    /// request in flight. A snapshot failure leaves the state `Failed`.
    pub async fn execute(&self) -> Result<Response> {
        self.executor.execute(|| self.prepare()).await
    }

    /// Send the request and flatten the outcome to `(text, status)`.
    ///
    /// Failures become `(message, 0)`; cancellation yields
    /// `("request cancelled", 0)`.
    pub async fn execute_text(&self) -> (String, u16) {
        match self.execute().await {
            Ok(response) => response.into_parts(),
            Err(e) => (e.to_string(), 0),
        }
    }

    /// Cancel the in-flight request, if any. Idempotent.
    pub fn cancel(&self) {
        self.executor.cancel();
    }
}
