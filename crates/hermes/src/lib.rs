//! # Hermes
//!
//! **Transport-agnostic request router for message-oriented channels**
//!
//! Hermes routes in-memory request objects (method, path, headers, body) the
//! way an HTTP framework routes HTTP, except the bytes never have to be
//! HTTP. The same routing and handler code runs identically whether the
//! underlying channel is a duplex socket, a pub/sub event, or any other
//! point-to-point message transport:
//!
//! - An [`App`](hermes_app::App) owns an ordered table of routes and
//!   middleware; raw inbound messages enter through `receive` and exactly one
//!   finalized response reaches the completion callback.
//! - A [`Client`](hermes_client::Client) issues requests over a pluggable
//!   [`Controller`](hermes_client::Controller) and resolves to the decoded
//!   response payload.
//!
//! ## Quick Start
//!
//! ```rust
//! use hermes::prelude::*;
//! use serde_json::json;
//!
//! fn get_apple<'a>(
//!     req: &'a Request,
//!     res: &'a mut Response,
//!     _next: &'a Next,
//! ) -> HandlerFuture<'a> {
//!     Box::pin(async move {
//!         let id = req.param("id").unwrap_or_default().to_string();
//!         res.data("Apple", id, json!({ "flavor": "sweet" })).send()?;
//!         Ok(())
//!     })
//! }
//!
//! # tokio_test::block_on(async {
//! let mut app = App::new();
//! app.get("/apples/:id", get_apple);
//!
//! app.receive(json!({ "method": "GET", "path": "/apples/3444" }), |payload| {
//!     assert_eq!(payload.status, 200);
//! })
//! .await;
//! # });
//! ```

#![doc(html_root_url = "https://docs.rs/hermes/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use hermes_core as core;

// Re-export the dispatch engine
pub use hermes_app as app;

// Re-export the path matcher
pub use hermes_router as router;

// Re-export the client side
pub use hermes_client as client;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use hermes::prelude::*;
/// ```
pub mod prelude {
    pub use hermes_core::{
        ErrorCategory, ErrorObject, Headers, HermesError, HermesResult, Request, Response,
        ResponsePayload, Verb,
    };

    pub use hermes_router::{Params, PathPattern};

    pub use hermes_app::{App, Handler, HandlerFuture, Next};

    pub use hermes_client::{
        AckController, AckTransport, CallOptions, Client, ClientError, ClientResult, Controller,
        RequestSession, RequestSpec, SessionController,
    };
}
