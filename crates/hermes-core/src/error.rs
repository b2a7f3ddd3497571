//! Error types for Hermes.
//!
//! This module provides [`HermesError`], the standard error type used
//! throughout the router, and [`ErrorObject`], the serializable error item
//! carried on the wire inside a response envelope.
//!
//! The taxonomy is deliberately small. `Validation`, `NotFound` and `Handler`
//! are the three failure classes the dispatch engine converts into responses;
//! `Contract` marks misuse of the engine itself (for example finalizing a
//! response twice) and is returned to the calling code rather than sent over
//! any wire.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using [`HermesError`].
pub type HermesResult<T> = Result<T, HermesError>;

/// Categories of errors for classification and status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Malformed inbound input (missing or mistyped method/path).
    Validation,
    /// No route entry matched the request.
    NotFound,
    /// A handler failed while processing a matched request.
    Handler,
    /// Misuse of the engine API by the calling code; never sent on the wire.
    Contract,
}

impl ErrorCategory {
    /// Returns the status code a response for this category carries.
    #[must_use]
    pub const fn default_status_code(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Handler | Self::Contract => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the wire title for this category.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Validation => "Bad Request",
            Self::NotFound => "Not Found",
            Self::Handler => "Internal Error",
            Self::Contract => "Contract Violation",
        }
    }
}

/// Standard error type for Hermes.
///
/// # Example
///
/// ```
/// use hermes_core::HermesError;
///
/// fn check_path(path: &serde_json::Value) -> Result<(), HermesError> {
///     if !path.is_string() {
///         return Err(HermesError::validation("request path must be a string"));
///     }
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum HermesError {
    /// Inbound input failed validation.
    #[error("validation error: {message}")]
    Validation {
        /// Human-readable error message.
        message: String,
    },

    /// No route matched the request.
    #[error("not found: {message}")]
    NotFound {
        /// Human-readable error message.
        message: String,
    },

    /// A handler failed while processing a request.
    #[error("handler error: {message}")]
    Handler {
        /// Human-readable error message.
        message: String,
        /// The underlying error, when one exists.
        #[source]
        source: Option<anyhow::Error>,
    },

    /// The engine API was misused by the calling code.
    #[error("contract violation: {message}")]
    Contract {
        /// Human-readable error message.
        message: String,
    },
}

impl HermesError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates a handler error.
    #[must_use]
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a handler error carrying its underlying cause.
    pub fn handler_with_source(
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Handler {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Creates a contract-violation error.
    #[must_use]
    pub fn contract(message: impl Into<String>) -> Self {
        Self::Contract {
            message: message.into(),
        }
    }

    /// Returns the error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Handler { .. } => ErrorCategory::Handler,
            Self::Contract { .. } => ErrorCategory::Contract,
        }
    }

    /// Returns the status code a response for this error carries.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.category().default_status_code()
    }

    /// Returns the wire title for this error.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.category().title()
    }

    /// Returns the bare message, without the category prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message }
            | Self::NotFound { message }
            | Self::Handler { message, .. }
            | Self::Contract { message } => message,
        }
    }
}

/// One serializable error item inside a response envelope.
///
/// The shape follows the JSON API error object: a short `title` naming the
/// failure class and a `detail` describing this particular occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// Short, stable name of the failure class (e.g. "Not Found").
    pub title: String,
    /// Occurrence-specific detail.
    pub detail: String,
}

impl ErrorObject {
    /// Creates a new error object.
    #[must_use]
    pub fn new(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
        }
    }
}
