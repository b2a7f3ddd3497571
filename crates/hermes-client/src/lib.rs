//! # Hermes Client
//!
//! The calling side of the Hermes transport-agnostic router.
//!
//! A [`Client`] builds a [`Request`](hermes_core::Request) from a
//! [`RequestSpec`], transmits it through a [`Controller`], and resolves to
//! the decoded [`ResponsePayload`](hermes_core::ResponsePayload), without
//! knowing which transport carried the exchange.
//!
//! A [`Controller`] adapts one concrete transport's round-trip primitive to
//! a single `request(message, options)` capability. Two reference adapters
//! are provided: [`SessionController`] for transports with a correlated
//! request/reply session, and [`AckController`] for transports whose send
//! resolves with a (timeout-bounded) acknowledgment.
//!
//! Transport-level failures (timeout, disconnect) surface as [`ClientError`]
//! values; routing-level failures are ordinary non-2xx payloads delivered
//! through the same decoded envelope. There are no retries here; retrying
//! is the caller's decision.

#![doc(html_root_url = "https://docs.rs/hermes-client/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod controller;
mod error;

pub use client::{Client, RequestSpec};
pub use controller::{
    AckController, AckTransport, BoxFuture, CallOptions, Controller, RequestSession,
    SessionController,
};
pub use error::{ClientError, ClientResult};
