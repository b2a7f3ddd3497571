//! Client-side error types.

use std::time::Duration;
use thiserror::Error;

/// Result type alias using [`ClientError`].
pub type ClientResult<T> = Result<T, ClientError>;

/// Failures on the calling side of a request.
///
/// Only transport-level failures appear here; routing-level failures
/// (400/404/500) are delivered as ordinary response payloads and never
/// reject a call.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The underlying transport failed to carry the message.
    #[error("transport error: {message}")]
    Transport {
        /// Human-readable error message.
        message: String,
        /// The underlying error, when one exists.
        #[source]
        source: Option<anyhow::Error>,
    },

    /// No reply arrived within the bounded wait.
    #[error("timed out after {after:?} waiting for a reply")]
    Timeout {
        /// How long the call waited.
        after: Duration,
    },

    /// The reply channel closed before a reply arrived.
    #[error("connection closed: {message}")]
    Closed {
        /// Human-readable error message.
        message: String,
    },

    /// A reply arrived but its envelope had the wrong shape.
    #[error("malformed reply envelope: {message}")]
    Envelope {
        /// Human-readable error message.
        message: String,
    },

    /// A reply payload arrived but could not be decoded.
    #[error("failed to decode response payload")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Creates a transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a transport error carrying its underlying cause.
    pub fn transport_with_source(
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Creates a timeout error.
    #[must_use]
    pub const fn timeout(after: Duration) -> Self {
        Self::Timeout { after }
    }

    /// Creates a closed-connection error.
    #[must_use]
    pub fn closed(message: impl Into<String>) -> Self {
        Self::Closed {
            message: message.into(),
        }
    }

    /// Creates a malformed-envelope error.
    #[must_use]
    pub fn envelope(message: impl Into<String>) -> Self {
        Self::Envelope {
            message: message.into(),
        }
    }
}
