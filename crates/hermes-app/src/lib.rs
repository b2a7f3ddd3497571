//! # Hermes App
//!
//! The dispatch engine of the Hermes transport-agnostic router.
//!
//! An [`App`] owns an ordered table of registered entries: method-specific
//! route handlers and method-agnostic middleware. Raw inbound messages enter
//! through [`App::receive`], which parses them into a
//! [`Request`](hermes_core::Request), walks the table in registration order,
//! drives the middleware/handler chain, and guarantees that exactly one
//! finalized [`Response`](hermes_core::Response) reaches the completion
//! callback.
//!
//! The engine is transport-agnostic by construction: it consumes
//! already-deserialized message objects and hands the reply back through a
//! callback, so the same routing code runs identically over a duplex socket,
//! a pub/sub event, or any other point-to-point channel.

#![doc(html_root_url = "https://docs.rs/hermes-app/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
mod handler;

pub use app::App;
pub use handler::{BoxFuture, Handler, HandlerFuture, Next};
