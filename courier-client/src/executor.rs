//! Cancellable single-shot request execution.

use crate::{ClientConfig, CourierError, PreparedRequest, Response, Result};
use parking_lot::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Lifecycle of the most recent execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    /// Nothing has run yet.
    Idle,
    /// A request is in flight.
    Running,
    /// The last request returned a response.
    Completed,
    /// The last request was cancelled.
    Cancelled,
    /// The last request failed.
    Failed,
}

/// Sends prepared requests one at a time under a fresh cancellation token.
#[derive(Debug)]
pub struct Executor {
    inner: reqwest::Client,
    config: ClientConfig,
    state: Mutex<ExecutionState>,
    active: Mutex<Option<CancellationToken>>,
}

impl Executor {
    /// Create an executor with the given transport configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let inner = config.build_client()?;
        Ok(Self {
            inner,
            config,
            state: Mutex::new(ExecutionState::Idle),
            active: Mutex::new(None),
        })
    }

    /// Get the transport configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// State of the most recent execution.
    pub fn state(&self) -> ExecutionState {
        *self.state.lock()
    }

    /// Build a request with `prepare` and send it, reading the response body.
    ///
    /// Returns [`CourierError::Busy`] without calling `prepare` if another
    /// execution is running. A `prepare` failure settles the state to
    /// [`ExecutionState::Failed`] and nothing is sent.
    pub async fn execute<F>(&self, prepare: F) -> Result<Response>
    where
        F: FnOnce() -> Result<PreparedRequest>,
    {
        let token = self.begin()?;
        let mut guard = Inflight::new(self);

        let outcome = match prepare() {
            Ok(request) => self.run(request, &token).await,
            Err(e) => {
                warn!(error = %e, "HTTP request could not be prepared");
                Err(e)
            }
        };

        guard.finish(&outcome);
        outcome
    }

    /// Cancel the in-flight execution, if any.
    ///
    /// Safe to call at any time and any number of times.
    pub fn cancel(&self) {
        if let Some(token) = self.active.lock().as_ref() {
            token.cancel();
        }
    }

    fn begin(&self) -> Result<CancellationToken> {
        let mut state = self.state.lock();
        if *state == ExecutionState::Running {
            return Err(CourierError::Busy);
        }
        *state = ExecutionState::Running;

        let token = CancellationToken::new();
        *self.active.lock() = Some(token.clone());
        Ok(token)
    }

    fn end(&self, state: ExecutionState) {
        self.active.lock().take();
        *self.state.lock() = state;
    }

    async fn run(&self, request: PreparedRequest, token: &CancellationToken) -> Result<Response> {
        let timeout = request.timeout().or(self.config.default_timeout);
        let method = request.method().clone();
        let url = request.url().clone();
        let mut request = request.into_reqwest(&self.inner)?;
        if request.timeout().is_none() {
            *request.timeout_mut() = timeout;
        }

        debug!(%method, %url, "Sending HTTP request");

        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => Err(CourierError::Cancelled),
            result = self.send(request, timeout) => result,
        };

        match &outcome {
            Ok(response) => debug!(status = %response.status(), "Received HTTP response"),
            Err(CourierError::Cancelled) => warn!(%method, %url, "HTTP request cancelled"),
            Err(e) => warn!(%method, %url, error = %e, "HTTP request failed"),
        }

        outcome
    }

    async fn send(&self, request: reqwest::Request, timeout: Option<Duration>) -> Result<Response> {
        let map_err = |e: reqwest::Error| match timeout {
            Some(limit) if e.is_timeout() => CourierError::Timeout(limit),
            _ => CourierError::Transport(e),
        };

        let response = self.inner.execute(request).await.map_err(map_err)?;
        Response::from_reqwest(response).await.map_err(|e| match e {
            CourierError::Transport(e) => map_err(e),
            other => other,
        })
    }
}

/// Puts the executor back to a settled state even if the execute future is
/// dropped mid-flight.
struct Inflight<'a> {
    executor: &'a Executor,
    done: bool,
}

impl<'a> Inflight<'a> {
    fn new(executor: &'a Executor) -> Self {
        Self {
            executor,
            done: false,
        }
    }

    fn finish(&mut self, outcome: &Result<Response>) {
        let state = match outcome {
            Ok(_) => ExecutionState::Completed,
            Err(CourierError::Cancelled) => ExecutionState::Cancelled,
            Err(_) => ExecutionState::Failed,
        };
        self.executor.end(state);
        self.done = true;
    }
}

impl Drop for Inflight<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.executor.end(ExecutionState::Cancelled);
        }
    }
}
