//! # Hermes Core
//!
//! Core types for the Hermes transport-agnostic request router.
//!
//! This crate provides the value objects shared by the dispatch engine and
//! the client:
//!
//! - [`Request`] - One inbound call: verb, path, headers, optional body, and
//!   the parameters/query captured during dispatch
//! - [`Response`] - Mutable builder collecting status, headers and payload,
//!   finalized exactly once through a completion callback
//! - [`ResponsePayload`] - The serialized snapshot handed to that callback
//! - [`Verb`] - The closed set of supported request methods
//! - [`Headers`] - Case-normalized header map
//! - [`HermesError`] - Standard error taxonomy

#![doc(html_root_url = "https://docs.rs/hermes-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod headers;
mod request;
mod response;
mod verb;

pub use error::{ErrorCategory, ErrorObject, HermesError, HermesResult};
pub use headers::Headers;
pub use request::Request;
pub use response::{Response, ResponseCallback, ResponsePayload};
pub use verb::Verb;
