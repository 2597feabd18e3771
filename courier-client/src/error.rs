//! Courier error types.

use std::time::Duration;
use thiserror::Error;

/// Result type for Courier operations.
pub type Result<T> = std::result::Result<T, CourierError>;

/// Errors raised while mutating, negotiating or executing a request.
#[derive(Debug, Error)]
pub enum CourierError {
    /// Path is empty or contains an empty segment.
    #[error("Invalid path: {0:?}")]
    InvalidPath(String),

    /// A scalar node was reached while segments remained.
    #[error("Cannot navigate path {path:?}: segment {segment:?} is not a container")]
    PathNavigation {
        /// Full path being written.
        path: String,
        /// Segment at which the walk stopped.
        segment: String,
    },

    /// A sequence was addressed with a non-numeric segment.
    #[error("Invalid sequence index: {0:?}")]
    InvalidIndex(String),

    /// A sequence index was past the end.
    #[error("Index {index} out of range for sequence of length {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Sequence length.
        len: usize,
    },

    /// The current body shape cannot be handled by the requested operation.
    #[error("Unsupported body type for {operation}: {found}")]
    UnsupportedBodyType {
        /// What was being attempted.
        operation: &'static str,
        /// Shape actually found.
        found: String,
    },

    /// No `soapenv:Body` / `soap:Body` envelope in the XML body.
    #[error("SOAP envelope body not found")]
    EnvelopeNotFound,

    /// Target element not present inside the envelope body.
    #[error("Tag <{0}> not found inside the SOAP body")]
    TagNotFound(String),

    /// Target element has no closing tag.
    #[error("Closing tag </{0}> not found")]
    CloseTagNotFound(String),

    /// Opening tag is never terminated with `>`.
    #[error("Malformed opening tag <{0}")]
    MalformedTag(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid HTTP method.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// Header name or value not representable on the wire.
    #[error("Invalid header {name}: {message}")]
    InvalidHeader {
        /// Header name.
        name: String,
        /// Reason.
        message: String,
    },

    /// Body serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Request timed out.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Request was cancelled while in flight.
    #[error("request cancelled")]
    Cancelled,

    /// An execution is already running on this manager.
    #[error("An execution is already running")]
    Busy,

    /// Underlying HTTP transport error.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Configuration could not be loaded or validated.
    #[error(transparent)]
    Config(#[from] courier_config::ConfigError),
}

impl CourierError {
    pub(crate) fn unsupported(operation: &'static str, found: impl Into<String>) -> Self {
        Self::UnsupportedBodyType {
            operation,
            found: found.into(),
        }
    }

    /// Check if this error came from a `set_body` call.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::InvalidPath(_)
                | Self::PathNavigation { .. }
                | Self::InvalidIndex(_)
                | Self::IndexOutOfRange { .. }
                | Self::UnsupportedBodyType { .. }
                | Self::EnvelopeNotFound
                | Self::TagNotFound(_)
                | Self::CloseTagNotFound(_)
                | Self::MalformedTag(_)
        )
    }

    /// Check if this is a cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Check if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_)) || matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Check if this is a connection error.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_connect())
    }
}
